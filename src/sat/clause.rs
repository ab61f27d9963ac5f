#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause representation.
//!
//! The two watched literals of a clause are, by convention, always the
//! literals at positions 0 and 1; propagation maintains this by swapping
//! literals in place. Learned clauses carry an activity score used when the
//! clause database is reduced.

use crate::sat::literal::{Literal, PackedLiteral};
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clause<L: Literal = PackedLiteral> {
    pub literals: SmallVec<[L; 8]>,
    activity: f64,
    learnt: bool,
}

impl<L: Literal> Clause<L> {
    #[must_use]
    pub fn new(literals: Vec<i32>) -> Self {
        Self {
            literals: literals.into_iter().map(L::from_i32).collect(),
            activity: 0.0,
            learnt: false,
        }
    }

    #[must_use]
    pub fn learnt(literals: SmallVec<[L; 8]>) -> Self {
        Self {
            literals,
            activity: 0.0,
            learnt: true,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    #[must_use]
    pub const fn is_learnt(&self) -> bool {
        self.learnt
    }

    /// Whether the clause contains a variable in both polarities. Legal but
    /// vacuous; stored as given.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|&l| self.literals.contains(&l.negated()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.literals.swap(i, j);
    }

    #[must_use]
    pub const fn activity(&self) -> f64 {
        self.activity
    }

    pub fn bump_activity(&mut self, amount: f64) {
        self.activity += amount;
    }

    pub fn decay_activity(&mut self, factor: f64) {
        self.activity *= factor;
    }
}

impl<L: Literal> Index<usize> for Clause<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal> IndexMut<usize> for Clause<L> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}

impl<L: Literal> From<Vec<i32>> for Clause<L> {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl<L: Literal> From<&[i32]> for Clause<L> {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type C = Clause;

    #[test]
    fn test_new() {
        let clause = C::new(vec![1, -2, 3]);
        assert_eq!(clause.len(), 3);
        assert!(!clause.is_learnt());
        assert!(!clause.is_unit());
        assert_eq!(clause[1].to_i32(), -2);
    }

    #[test]
    fn test_swap() {
        let mut clause = C::new(vec![1, 2, 3]);
        clause.swap(0, 2);
        assert_eq!(clause[0].to_i32(), 3);
        assert_eq!(clause[2].to_i32(), 1);
    }

    #[test]
    fn test_tautology() {
        assert!(C::new(vec![1, -1, 2]).is_tautology());
        assert!(!C::new(vec![1, 2]).is_tautology());
    }

    #[test]
    fn test_activity() {
        let mut clause = C::new(vec![1, 2]);
        clause.bump_activity(1.0);
        clause.bump_activity(1.0);
        clause.decay_activity(0.5);
        assert!((clause.activity() - 1.0).abs() < f64::EPSILON);
    }
}
