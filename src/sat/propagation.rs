#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Watched-literal unit propagation.
//!
//! Every clause of length two or more is watched by exactly two of its
//! literals, held at positions 0 and 1. A clause is only examined when one of
//! its watched literals becomes false; it then either finds a replacement
//! watch, becomes unit (the other watch is forced), or conflicts.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::{Cnf, DecisionLevel};
use crate::sat::literal::Literal;
use crate::sat::trail::{Reason, Trail};
use smallvec::SmallVec;

enum ClauseStatus<L: Literal> {
    /// The clause is satisfied or found a new watch; nothing to do.
    Quiet,
    /// All literals but one are false; the survivor must be made true.
    Unit(L),
    /// Every literal is false.
    Conflict,
}

/// Watch lists indexed densely by literal, plus the propagation counter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedLiterals {
    watches: Vec<SmallVec<[usize; 6]>>,
    pub num_propagations: u64,
}

impl WatchedLiterals {
    #[must_use]
    pub fn new<L: Literal>(cnf: &Cnf<L>) -> Self {
        let mut this = Self {
            watches: vec![SmallVec::new(); 2 * (cnf.num_vars + 1)],
            num_propagations: 0,
        };
        for (c_ref, clause) in cnf.iter().enumerate() {
            this.attach(clause, c_ref);
        }
        this
    }

    /// Starts watching `clause` through its first two literals. Unit and
    /// empty clauses are not watched; the controller handles them at level 0.
    pub fn attach<L: Literal>(&mut self, clause: &Clause<L>, c_ref: usize) {
        if clause.len() < 2 {
            return;
        }
        self.watches[clause[0].index()].push(c_ref);
        self.watches[clause[1].index()].push(c_ref);
    }

    /// Discards all watch lists and re-attaches every clause. Used after the
    /// clause database has been compacted.
    pub fn rebuild<L: Literal>(&mut self, cnf: &Cnf<L>) {
        for list in &mut self.watches {
            list.clear();
        }
        for (c_ref, clause) in cnf.iter().enumerate() {
            self.attach(clause, c_ref);
        }
    }

    #[must_use]
    pub fn watchers<L: Literal>(&self, lit: L) -> &[usize] {
        &self.watches[lit.index()]
    }

    /// Runs Boolean constraint propagation to fixpoint, draining the trail
    /// from its head. Every forced literal is pushed onto the trail with the
    /// forcing clause as its antecedent. Returns the conflicting clause ref
    /// as soon as one is found.
    pub fn propagate<L: Literal, A: Assignment>(
        &mut self,
        cnf: &mut Cnf<L>,
        trail: &mut Trail<L>,
        assignment: &mut A,
        level: DecisionLevel,
    ) -> Option<usize> {
        while trail.head < trail.len() {
            let lit = trail[trail.head].lit;
            trail.head += 1;
            self.num_propagations += 1;

            let false_lit = lit.negated();
            let watchers = self.watches[false_lit.index()].clone();

            for &c_ref in &watchers {
                match self.process_clause(cnf, assignment, false_lit, c_ref) {
                    ClauseStatus::Quiet => {}
                    ClauseStatus::Unit(unit) => {
                        trail.assign(assignment, unit, level, Reason::Clause(c_ref));
                    }
                    ClauseStatus::Conflict => return Some(c_ref),
                }
            }
        }

        None
    }

    /// Handles one watcher of a freshly falsified literal.
    fn process_clause<L: Literal, A: Assignment>(
        &mut self,
        cnf: &mut Cnf<L>,
        assignment: &A,
        false_lit: L,
        c_ref: usize,
    ) -> ClauseStatus<L> {
        // Normalize so the falsified watch sits at position 1.
        if cnf[c_ref][0] == false_lit {
            cnf[c_ref].swap(0, 1);
        }

        let first = cnf[c_ref][0];
        if assignment.literal_value(first) == Some(true) {
            return ClauseStatus::Quiet;
        }

        let replacement = cnf[c_ref]
            .literals
            .iter()
            .skip(2)
            .position(|&l| assignment.literal_value(l) != Some(false));

        if let Some(offset) = replacement {
            let new_idx = offset + 2;
            cnf[c_ref].swap(1, new_idx);
            let new_watch = cnf[c_ref][1];
            self.watches[new_watch.index()].push(c_ref);
            self.watches[false_lit.index()].retain(|i| *i != c_ref);
            return ClauseStatus::Quiet;
        }

        match assignment.literal_value(first) {
            None => ClauseStatus::Unit(first),
            Some(false) => ClauseStatus::Conflict,
            Some(true) => unreachable!("satisfied clause handled above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::VecAssignment;
    use crate::sat::literal::PackedLiteral;

    fn lit(v: i32) -> PackedLiteral {
        PackedLiteral::from_i32(v)
    }

    fn setup(clauses: Vec<Vec<i32>>) -> (Cnf, Trail, VecAssignment, WatchedLiterals) {
        let cnf: Cnf = Cnf::new(clauses);
        let trail = Trail::new(cnf.num_vars);
        let assignment = VecAssignment::new(cnf.num_vars);
        let watched = WatchedLiterals::new(&cnf);
        (cnf, trail, assignment, watched)
    }

    #[test]
    fn test_chain_propagation() {
        let (mut cnf, mut trail, mut a, mut w) = setup(vec![vec![-1, 2], vec![-2, 3]]);

        trail.assign(&mut a, lit(1), 0, Reason::Decision);
        let conflict = w.propagate(&mut cnf, &mut trail, &mut a, 0);

        assert_eq!(conflict, None);
        assert_eq!(a.var_value(2), Some(true));
        assert_eq!(a.var_value(3), Some(true));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn test_conflict_detection() {
        let (mut cnf, mut trail, mut a, mut w) = setup(vec![vec![-1, 2], vec![-1, -2]]);

        trail.assign(&mut a, lit(1), 1, Reason::Decision);
        let conflict = w.propagate(&mut cnf, &mut trail, &mut a, 1);

        assert_eq!(conflict, Some(1));
    }

    #[test]
    fn test_finds_replacement_watch() {
        let (mut cnf, mut trail, mut a, mut w) = setup(vec![vec![1, 2, 3]]);

        trail.assign(&mut a, lit(-1), 1, Reason::Decision);
        let conflict = w.propagate(&mut cnf, &mut trail, &mut a, 1);

        assert_eq!(conflict, None);
        // Nothing was forced; the clause still has two non-false watches.
        assert_eq!(trail.len(), 1);
        assert!(w.watchers(lit(3)).contains(&0));
    }

    #[test]
    fn test_antecedent_recorded() {
        let (mut cnf, mut trail, mut a, mut w) = setup(vec![vec![-1, 2]]);

        trail.assign(&mut a, lit(1), 1, Reason::Decision);
        w.propagate(&mut cnf, &mut trail, &mut a, 1);

        assert_eq!(trail[1].reason, Reason::Clause(0));
        assert_eq!(trail[1].level, 1);
    }
}
