#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver-facing API: verdicts, solve limits and the entry points.

use crate::sat::assignment::Solutions;
use crate::sat::cdcl::Cdcl;
use crate::sat::cnf::{Cnf, MalformedClauseError};
use crate::sat::literal::{Literal, PackedLiteral};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The outcome of a solve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable(Solutions),
    Unsatisfiable,
    /// A limit or cancellation fired before the search finished. Never
    /// returned unless the caller configured one.
    Unknown,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Satisfiable(s) => Some(s),
            _ => None,
        }
    }
}

/// Caller-imposed bounds on a solve call. The search checks these between
/// iterations (once per conflict and once per decision) and gives up with
/// [`Verdict::Unknown`] when one is exceeded.
#[derive(Debug, Clone, Default)]
pub struct Limits {
    /// Abort after this many conflicts.
    pub max_conflicts: Option<u64>,
    /// Abort when the learned-clause count reaches this bound.
    pub max_learnt: Option<usize>,
    /// External cancellation flag; set it from another thread to abort.
    pub interrupt: Option<Arc<AtomicBool>>,
}

impl Limits {
    #[must_use]
    pub fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

pub trait Solver<L: Literal = PackedLiteral>: Sized {
    fn new(cnf: Cnf<L>) -> Self;

    fn solve(&mut self) -> Verdict;

    /// The current assignment snapshot.
    fn solutions(&self) -> Solutions;
}

/// Solves a CNF instance over `num_vars` variables. Clauses are sequences of
/// nonzero DIMACS-encoded literals.
///
/// # Errors
///
/// Fails with [`MalformedClauseError`] before any search if a clause contains
/// literal 0 or references a variable beyond `num_vars`.
pub fn solve(num_vars: usize, clauses: &[Vec<i32>]) -> Result<Verdict, MalformedClauseError> {
    solve_with_limits(num_vars, clauses, Limits::default())
}

/// Like [`solve`], with caller-imposed [`Limits`].
///
/// # Errors
///
/// Fails with [`MalformedClauseError`] on invalid input, as [`solve`].
pub fn solve_with_limits(
    num_vars: usize,
    clauses: &[Vec<i32>],
    limits: Limits,
) -> Result<Verdict, MalformedClauseError> {
    let cnf: Cnf = Cnf::checked(num_vars, clauses)?;
    let mut solver: Cdcl = Cdcl::with_limits(cnf, limits);
    Ok(solver.solve())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_chain() {
        let verdict = solve(3, &[vec![1], vec![-1, 2], vec![-2, 3]]).unwrap();
        let Verdict::Satisfiable(s) = verdict else {
            panic!("expected SAT");
        };
        assert!(s.value(1));
        assert!(s.value(2));
        assert!(s.value(3));
    }

    #[test]
    fn test_direct_conflict() {
        let verdict = solve(1, &[vec![1], vec![-1]]).unwrap();
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn test_empty_clause_set() {
        let verdict = solve(4, &[]).unwrap();
        let Verdict::Satisfiable(s) = verdict else {
            panic!("expected SAT");
        };
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let verdict = solve(2, &[vec![1], vec![]]).unwrap();
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }

    #[test]
    fn test_malformed_zero_literal() {
        let err = solve(2, &[vec![1, 0]]);
        assert!(matches!(
            err,
            Err(MalformedClauseError::ZeroLiteral { clause: 0 })
        ));
    }

    #[test]
    fn test_malformed_out_of_range() {
        let err = solve(2, &[vec![3]]);
        assert!(matches!(
            err,
            Err(MalformedClauseError::VariableOutOfRange { .. })
        ));
    }

    #[test]
    fn test_conflict_budget_yields_unknown() {
        // Pigeonhole 4 pigeons / 3 holes is UNSAT but needs some search; a
        // budget of one conflict cannot finish it.
        let clauses = pigeonhole(4, 3);
        let limits = Limits {
            max_conflicts: Some(1),
            ..Limits::default()
        };
        let verdict = solve_with_limits(12, &clauses, limits).unwrap();
        assert_eq!(verdict, Verdict::Unknown);
    }

    #[test]
    fn test_interrupt_flag() {
        let flag = Arc::new(AtomicBool::new(true));
        let limits = Limits {
            interrupt: Some(flag),
            ..Limits::default()
        };
        let verdict = solve_with_limits(12, &pigeonhole(4, 3), limits).unwrap();
        assert_eq!(verdict, Verdict::Unknown);
    }

    fn pigeonhole(pigeons: usize, holes: usize) -> Vec<Vec<i32>> {
        let var = |p: usize, h: usize| (p * holes + h + 1) as i32;
        let mut clauses = Vec::new();
        for p in 0..pigeons {
            clauses.push((0..holes).map(|h| var(p, h)).collect());
        }
        for h in 0..holes {
            for p in 0..pigeons {
                for q in (p + 1)..pigeons {
                    clauses.push(vec![-var(p, h), -var(q, h)]);
                }
            }
        }
        clauses
    }
}
