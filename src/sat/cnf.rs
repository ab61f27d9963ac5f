#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause database.
//!
//! Clauses are held in a single arena and addressed by `usize` refs; original
//! clauses occupy the prefix `0..non_learnt_idx` and learned clauses the
//! suffix. Refs into the prefix are stable for the lifetime of a solve;
//! learned refs may be remapped when the database is reduced.

use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, PackedLiteral};
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Search depth at which a variable was assigned. Level 0 holds assignments
/// forced without any free decision.
pub type DecisionLevel = usize;

/// Raised when an input clause fails eager validation, before any search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedClauseError {
    #[error("clause {clause} contains literal 0")]
    ZeroLiteral { clause: usize },

    #[error("clause {clause} references variable {variable}, but only {num_vars} are declared")]
    VariableOutOfRange {
        clause: usize,
        variable: u32,
        num_vars: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cnf<L: Literal = PackedLiteral> {
    pub clauses: Vec<Clause<L>>,
    pub num_vars: usize,
    pub non_learnt_idx: usize,
}

impl<L: Literal> Cnf<L> {
    /// Builds a formula from DIMACS-style integer clauses, deriving the
    /// variable count from the largest magnitude seen.
    #[must_use]
    pub fn new(clauses: Vec<Vec<i32>>) -> Self {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);

        let clauses: Vec<Clause<L>> = clauses.into_iter().map(Clause::new).collect();
        let non_learnt_idx = clauses.len();

        Self {
            clauses,
            num_vars,
            non_learnt_idx,
        }
    }

    /// Builds a formula over exactly `num_vars` variables, validating every
    /// literal first. Zero literals and out-of-range variables are rejected
    /// here so that search never sees them.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedClauseError`] for the first offending clause.
    pub fn checked(num_vars: usize, clauses: &[Vec<i32>]) -> Result<Self, MalformedClauseError> {
        for (i, clause) in clauses.iter().enumerate() {
            for &lit in clause {
                if lit == 0 {
                    return Err(MalformedClauseError::ZeroLiteral { clause: i });
                }
                if lit.unsigned_abs() as usize > num_vars {
                    return Err(MalformedClauseError::VariableOutOfRange {
                        clause: i,
                        variable: lit.unsigned_abs(),
                        num_vars,
                    });
                }
            }
        }

        let clauses: Vec<Clause<L>> = clauses.iter().map(|c| Clause::new(c.clone())).collect();
        let non_learnt_idx = clauses.len();

        Ok(Self {
            clauses,
            num_vars,
            non_learnt_idx,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn num_learnt(&self) -> usize {
        self.len() - self.non_learnt_idx
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause<L>> {
        self.clauses.iter()
    }

    /// Appends a learned clause and returns its ref. Learned literals must
    /// stay within the formula's variable range; the watch tables are sized
    /// from `num_vars` and are never regrown.
    pub fn add_learnt(&mut self, clause: Clause<L>) -> usize {
        debug_assert!(clause.is_learnt());
        debug_assert!(clause
            .iter()
            .all(|l| (l.variable() as usize) <= self.num_vars));
        self.clauses.push(clause);
        self.len() - 1
    }
}

impl<L: Literal> Index<usize> for Cnf<L> {
    type Output = Clause<L>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl<L: Literal> IndexMut<usize> for Cnf<L> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.clauses[index]
    }
}
