#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as a SAT problem.
//!
//! The grid is an explicit caller-supplied value; nothing here holds puzzle
//! state beyond the `Grid` passed around.

pub mod solver;

pub use solver::{decode, encode, solve, NUM_VARS};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected 9 rows, found {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {found} cells, expected 9")]
    WrongRowLength { row: usize, found: usize },

    #[error("row {row}: '{cell}' is not a digit or blank")]
    InvalidCell { row: usize, cell: String },
}

/// A 9x9 Sudoku grid. Cells hold 0 (blank) or a digit 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid([[u8; 9]; 9]);

impl Grid {
    #[must_use]
    pub const fn new(cells: [[u8; 9]; 9]) -> Self {
        Self(cells)
    }

    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    pub const fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.0[row][col] = digit;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8; 9]> {
        self.0.iter()
    }

    /// Whether every cell is filled with a digit 1-9.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().flatten().all(|&d| (1..=9).contains(&d))
    }
}

impl From<[[u8; 9]; 9]> for Grid {
    fn from(cells: [[u8; 9]; 9]) -> Self {
        Self::new(cells)
    }
}

impl From<Grid> for [[u8; 9]; 9] {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses one row per non-empty line. Cells are whitespace-separated
    /// digits, or a bare 9-character string; `0` and `.` mean blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() != 9 {
            return Err(GridError::WrongRowCount(lines.len()));
        }

        let mut cells = [[0_u8; 9]; 9];
        for (row, line) in lines.iter().enumerate() {
            let tokens: Vec<String> = if line.split_whitespace().count() == 1 {
                line.trim().chars().map(String::from).collect()
            } else {
                line.split_whitespace().map(String::from).collect()
            };

            if tokens.len() != 9 {
                return Err(GridError::WrongRowLength {
                    row,
                    found: tokens.len(),
                });
            }

            for (col, token) in tokens.iter().enumerate() {
                cells[row][col] = match token.as_str() {
                    "." => 0,
                    t => t.parse().map_err(|_| GridError::InvalidCell {
                        row,
                        cell: t.to_owned(),
                    })?,
                };
                if cells[row][col] > 9 {
                    return Err(GridError::InvalidCell {
                        row,
                        cell: token.clone(),
                    });
                }
            }
        }

        Ok(Self(cells))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for (col, &digit) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if digit == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{digit}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
