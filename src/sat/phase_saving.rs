#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;

/// Chooses the polarity for a decision variable.
pub trait PhaseSelector: Clone + std::fmt::Debug {
    fn new(num_vars: usize) -> Self;

    /// Records the value a variable held when its assignment was undone.
    fn save<L: Literal>(&mut self, lit: L);

    /// The polarity to try next for `var`.
    fn next_phase(&self, var: Variable) -> bool;

    fn reset(&mut self);
}

/// Last-assigned-phase caching. Variables that have never been assigned
/// default to the negative polarity.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SavedPhases(BitVec);

impl PhaseSelector for SavedPhases {
    fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars + 1, false))
    }

    fn save<L: Literal>(&mut self, lit: L) {
        self.0.set(lit.variable() as usize, lit.polarity());
    }

    fn next_phase(&self, var: Variable) -> bool {
        self.0.get(var as usize).unwrap_or(false)
    }

    fn reset(&mut self) {
        // BitVec::clear zeroes every bit without shrinking.
        self.0.clear();
    }
}

/// Uniformly random polarities. Useful for experiments; not the default.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RandomPhases;

impl PhaseSelector for RandomPhases {
    fn new(_: usize) -> Self {
        Self
    }

    fn save<L: Literal>(&mut self, _: L) {}

    fn next_phase(&self, _: Variable) -> bool {
        fastrand::bool()
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    #[test]
    fn test_default_negative() {
        let phases = SavedPhases::new(5);
        assert!(!phases.next_phase(1));
        assert!(!phases.next_phase(5));
    }

    #[test]
    fn test_save_and_recall() {
        let mut phases = SavedPhases::new(5);
        phases.save(PackedLiteral::new(3, true));
        assert!(phases.next_phase(3));
        assert!(!phases.next_phase(2));

        phases.save(PackedLiteral::new(3, false));
        assert!(!phases.next_phase(3));
    }
}
