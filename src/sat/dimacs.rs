#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! DIMACS CNF parsing.
//!
//! Comment lines (`c`) and the problem line (`p cnf <vars> <clauses>`) are
//! honoured; a `%` line ends the data, as in competition files. Clauses are
//! zero-terminated token sequences and may span lines.

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected a literal, found '{token}'")]
    InvalidToken { line: usize, token: String },

    #[error("unterminated clause at end of input")]
    UnterminatedClause,
}

/// Parses DIMACS CNF from a reader. The variable count is the larger of the
/// header's declaration and the largest variable actually used.
///
/// # Errors
///
/// Fails on I/O errors, non-integer literal tokens, and a trailing clause
/// with no terminating `0`.
pub fn parse_dimacs<R: BufRead, L: Literal>(reader: R) -> Result<Cnf<L>, DimacsError> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut declared_vars = 0_usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None | Some(&"c") => continue,
            Some(&"%") => break,
            Some(&"p") => {
                // p cnf <vars> <clauses>; the clause count is not needed.
                declared_vars = tokens
                    .nth(2)
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(0);
                continue;
            }
            Some(_) => {}
        }

        for token in tokens {
            let lit: i32 = token.parse().map_err(|_| DimacsError::InvalidToken {
                line: line_no + 1,
                token: token.to_owned(),
            })?;

            if lit == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                current.push(lit);
            }
        }
    }

    if !current.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }

    let mut cnf: Cnf<L> = Cnf::new(clauses);
    cnf.num_vars = cnf.num_vars.max(declared_vars);
    Ok(cnf)
}

/// Parses a DIMACS CNF file from disk.
///
/// # Errors
///
/// As [`parse_dimacs`], plus failing to open the file.
pub fn parse_file<L: Literal>(path: impl AsRef<Path>) -> Result<Cnf<L>, DimacsError> {
    let file = File::open(path)?;
    parse_dimacs(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;
    use std::io::Cursor;

    fn parse(input: &str) -> Result<Cnf<PackedLiteral>, DimacsError> {
        parse_dimacs(Cursor::new(input))
    }

    #[test]
    fn test_basic() {
        let cnf = parse("c comment\np cnf 3 2\n1 -3 0\n2 3 -1 0\n").unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[0].len(), 2);
        assert_eq!(cnf[1][2].to_i32(), -1);
    }

    #[test]
    fn test_clause_spanning_lines() {
        let cnf = parse("p cnf 4 1\n1 2\n3 4 0\n").unwrap();
        assert_eq!(cnf.len(), 1);
        assert_eq!(cnf[0].len(), 4);
    }

    #[test]
    fn test_header_can_exceed_used_vars() {
        let cnf = parse("p cnf 10 1\n1 0\n").unwrap();
        assert_eq!(cnf.num_vars, 10);
    }

    #[test]
    fn test_percent_trailer() {
        let cnf = parse("p cnf 2 1\n1 2 0\n%\n0\n").unwrap();
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_invalid_token() {
        let err = parse("1 x 0\n");
        assert!(matches!(
            err,
            Err(DimacsError::InvalidToken { line: 1, .. })
        ));
    }

    #[test]
    fn test_unterminated_clause() {
        let err = parse("p cnf 2 1\n1 2\n");
        assert!(matches!(err, Err(DimacsError::UnterminatedClause)));
    }
}
