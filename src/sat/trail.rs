#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The assignment trail.
//!
//! An append-only log of every assignment made during search, in order, with
//! the decision level and antecedent of each. Decision levels are
//! non-decreasing along the trail, so backtracking is a suffix truncation.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::DecisionLevel;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use crate::sat::phase_saving::PhaseSelector;
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::Index;

/// Why a variable was assigned: a free decision, or the clause that forced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Copy, Hash, PartialOrd, Ord)]
pub enum Reason {
    #[default]
    Decision,
    Clause(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step<L: Literal> {
    pub lit: L,
    pub level: DecisionLevel,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail<L: Literal = PackedLiteral> {
    steps: Vec<Step<L>>,
    /// Propagation head: steps below this index have had their watchers
    /// scanned.
    pub head: usize,
    level_of: Vec<DecisionLevel>,
}

impl<L: Literal> Trail<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            steps: Vec::with_capacity(num_vars),
            head: 0,
            level_of: vec![0; num_vars + 1],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step<L>> {
        self.steps.iter()
    }

    /// The level at which `var` was assigned. Meaningless for unassigned
    /// variables.
    #[must_use]
    pub fn level_of(&self, var: Variable) -> DecisionLevel {
        self.level_of[var as usize]
    }

    /// Records `lit` as assigned at `level` and applies it to `assignment`.
    /// Assigning at enqueue time keeps the trail and the assignment in
    /// lockstep.
    pub fn assign<A: Assignment>(
        &mut self,
        assignment: &mut A,
        lit: L,
        level: DecisionLevel,
        reason: Reason,
    ) {
        debug_assert!(!assignment.is_assigned(lit.variable()));
        debug_assert!(self.steps.last().is_none_or(|s| s.level <= level));

        assignment.assign(lit);
        self.level_of[lit.variable() as usize] = level;
        self.steps.push(Step { lit, level, reason });
    }

    /// Undoes every assignment made above `level`, saving each variable's
    /// last value as its phase. The trail suffix is removed exactly; entries
    /// at or below `level` are untouched.
    pub fn backtrack_to<A: Assignment, P: PhaseSelector>(
        &mut self,
        assignment: &mut A,
        phases: &mut P,
        level: DecisionLevel,
    ) {
        while let Some(step) = self.steps.last() {
            if step.level <= level {
                break;
            }
            phases.save(step.lit);
            assignment.unassign(step.lit.variable());
            self.level_of[step.lit.variable() as usize] = 0;
            self.steps.pop();
        }
        self.head = self.steps.len();
    }

    /// Learned-clause refs currently serving as the antecedent of an assigned
    /// variable. These must survive database reduction.
    #[must_use]
    pub fn locked_clauses(&self, non_learnt_idx: usize) -> FxHashSet<usize> {
        self.steps
            .iter()
            .filter_map(|s| match s.reason {
                Reason::Clause(c_ref) if c_ref >= non_learnt_idx => Some(c_ref),
                _ => None,
            })
            .collect()
    }

    /// Rewrites learned antecedent refs after the clause database has been
    /// compacted. Every locked ref must be present in `map`.
    pub fn remap_reasons(&mut self, map: &FxHashMap<usize, usize>, non_learnt_idx: usize) {
        for step in &mut self.steps {
            if let Reason::Clause(c_ref) = step.reason {
                if c_ref >= non_learnt_idx {
                    step.reason = Reason::Clause(map[&c_ref]);
                }
            }
        }
    }
}

impl<L: Literal> Index<usize> for Trail<L> {
    type Output = Step<L>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.steps[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::VecAssignment;
    use crate::sat::phase_saving::SavedPhases;

    type T = Trail;

    fn lit(v: i32) -> PackedLiteral {
        PackedLiteral::from_i32(v)
    }

    #[test]
    fn test_assign() {
        let mut trail = T::new(3);
        let mut a = VecAssignment::new(3);

        trail.assign(&mut a, lit(1), 0, Reason::Clause(0));
        trail.assign(&mut a, lit(-2), 1, Reason::Decision);

        assert_eq!(trail.len(), 2);
        assert_eq!(trail.level_of(2), 1);
        assert_eq!(a.var_value(1), Some(true));
        assert_eq!(a.var_value(2), Some(false));
    }

    #[test]
    fn test_backtrack_removes_exact_suffix() {
        let mut trail = T::new(4);
        let mut a = VecAssignment::new(4);
        let mut phases = SavedPhases::new(4);

        trail.assign(&mut a, lit(1), 0, Reason::Clause(0));
        trail.assign(&mut a, lit(2), 1, Reason::Decision);
        trail.assign(&mut a, lit(3), 1, Reason::Clause(1));
        trail.assign(&mut a, lit(4), 2, Reason::Decision);

        trail.backtrack_to(&mut a, &mut phases, 1);

        assert_eq!(trail.len(), 3);
        assert!(a.is_assigned(1));
        assert!(a.is_assigned(2));
        assert!(a.is_assigned(3));
        assert!(!a.is_assigned(4));
        assert_eq!(trail.head, 3);

        trail.backtrack_to(&mut a, &mut phases, 0);
        assert_eq!(trail.len(), 1);
        assert!(a.is_assigned(1));
        assert!(!a.is_assigned(2));
    }

    #[test]
    fn test_backtrack_saves_phases() {
        let mut trail = T::new(2);
        let mut a = VecAssignment::new(2);
        let mut phases = SavedPhases::new(2);

        trail.assign(&mut a, lit(1), 1, Reason::Decision);
        trail.backtrack_to(&mut a, &mut phases, 0);

        assert!(phases.next_phase(1));
    }

    #[test]
    fn test_locked_clauses() {
        let mut trail = T::new(3);
        let mut a = VecAssignment::new(3);

        trail.assign(&mut a, lit(1), 0, Reason::Clause(0));
        trail.assign(&mut a, lit(2), 1, Reason::Decision);
        trail.assign(&mut a, lit(3), 1, Reason::Clause(5));

        let locked = trail.locked_clauses(2);
        assert!(locked.contains(&5));
        assert!(!locked.contains(&0));
    }
}
