#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Decision variable selection.
//!
//! `Vsids` is the solver's default: per-variable activity scores bumped when
//! a variable appears in conflict analysis and decayed multiplicatively after
//! every conflict, so recently conflicting variables are preferred.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

pub trait VariableSelection: Clone + Debug {
    fn new(num_vars: usize, vars: &[Variable]) -> Self;

    /// The next unassigned variable to branch on, or `None` when every
    /// variable is assigned.
    fn pick<A: Assignment>(&self, assignment: &A) -> Option<Variable>;

    fn bump(&mut self, var: Variable);

    fn bumps<T: IntoIterator<Item = Variable>>(&mut self, vars: T) {
        for var in vars {
            self.bump(var);
        }
    }

    fn decay(&mut self, factor: f64);
}

pub const DEFAULT_DECAY: f64 = 0.95;

/// Variable State Independent Decaying Sum.
#[derive(Debug, Clone, PartialEq, Default, PartialOrd)]
pub struct Vsids(Vec<f64>);

impl Vsids {
    #[must_use]
    pub fn activity(&self, var: Variable) -> f64 {
        self.0[var as usize]
    }
}

impl VariableSelection for Vsids {
    fn new(num_vars: usize, vars: &[Variable]) -> Self {
        let mut vsids = Self(vec![0.0; num_vars + 1]);
        vsids.bumps(vars.iter().copied());
        vsids
    }

    /// Highest activity wins; the scan runs in ascending variable order, so
    /// ties go to the smallest id.
    fn pick<A: Assignment>(&self, assignment: &A) -> Option<Variable> {
        let mut max = f64::MIN;
        let mut max_var = None;

        for (i, &activity) in self.0.iter().enumerate().skip(1) {
            let var = i as Variable;
            if activity > max && !assignment.is_assigned(var) {
                max = activity;
                max_var = Some(var);
            }
        }
        max_var
    }

    fn bump(&mut self, var: Variable) {
        self.0[var as usize] += 1.0;
    }

    fn decay(&mut self, factor: f64) {
        for activity in &mut self.0 {
            *activity *= factor;
        }
    }
}

impl Index<Variable> for Vsids {
    type Output = f64;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}

impl IndexMut<Variable> for Vsids {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}

/// Branches on the smallest unassigned variable id. Baseline for tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedOrder(usize);

impl VariableSelection for FixedOrder {
    fn new(num_vars: usize, _: &[Variable]) -> Self {
        Self(num_vars)
    }

    fn pick<A: Assignment>(&self, assignment: &A) -> Option<Variable> {
        (1..=self.0 as Variable).find(|&v| !assignment.is_assigned(v))
    }

    fn bump(&mut self, _: Variable) {}

    fn decay(&mut self, _: f64) {}
}
