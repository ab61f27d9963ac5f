#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::literal::{Literal, Variable};
use core::ops::{Index, IndexMut};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    #[must_use]
    pub const fn value(self) -> Option<bool> {
        match self {
            Self::Assigned(b) => Some(b),
            Self::Unassigned => None,
        }
    }
}

/// A complete satisfying assignment, indexed by variable id (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(Vec<bool>);

impl Solutions {
    #[must_use]
    pub fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    /// Number of variables covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value of a variable. Variables outside the instance read as false.
    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self.0.get(var as usize).copied().unwrap_or(false)
    }

    /// Whether a DIMACS-encoded literal is true under this assignment.
    #[must_use]
    pub fn check(&self, lit: i32) -> bool {
        let value = self.value(lit.unsigned_abs());
        if lit > 0 {
            value
        } else {
            !value
        }
    }

    /// Variables assigned true, in ascending order.
    pub fn true_vars(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, &b)| if b { Some(i as Variable) } else { None })
    }
}

pub trait Assignment: Clone + Debug {
    fn new(num_vars: usize) -> Self;

    fn set(&mut self, var: Variable, value: bool);
    fn unassign(&mut self, var: Variable);
    fn var_value(&self, var: Variable) -> Option<bool>;

    fn assign<L: Literal>(&mut self, lit: L) {
        self.set(lit.variable(), lit.polarity());
    }

    fn literal_value<L: Literal>(&self, lit: L) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| if lit.polarity() { b } else { !b })
    }

    fn is_assigned(&self, var: Variable) -> bool {
        self.var_value(var).is_some()
    }

    fn num_assigned(&self) -> usize;

    /// Number of variables tracked.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn all_assigned(&self) -> bool {
        self.num_assigned() == self.len()
    }

    /// Snapshot of the current (complete) assignment. Unassigned variables
    /// read as false, which only matters for instances with unconstrained
    /// variables.
    fn solutions(&self) -> Solutions;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment {
    states: Vec<VarState>,
    assigned: usize,
}

impl Assignment for VecAssignment {
    fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars + 1],
            assigned: 0,
        }
    }

    fn set(&mut self, var: Variable, value: bool) {
        let slot = &mut self.states[var as usize];
        if slot.is_unassigned() {
            self.assigned += 1;
        }
        *slot = VarState::Assigned(value);
    }

    fn unassign(&mut self, var: Variable) {
        let slot = &mut self.states[var as usize];
        if slot.is_assigned() {
            self.assigned -= 1;
        }
        *slot = VarState::Unassigned;
    }

    fn var_value(&self, var: Variable) -> Option<bool> {
        self.states.get(var as usize).and_then(|s| s.value())
    }

    fn num_assigned(&self) -> usize {
        self.assigned
    }

    fn len(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    fn solutions(&self) -> Solutions {
        Solutions::new(
            self.states
                .iter()
                .map(|s| s.value().unwrap_or(false))
                .collect(),
        )
    }
}

impl Index<Variable> for VecAssignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.states[index as usize]
    }
}

impl IndexMut<Variable> for VecAssignment {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.states[index as usize]
    }
}
