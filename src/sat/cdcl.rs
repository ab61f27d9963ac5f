#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The CDCL search controller.
//!
//! Drives the propagate / analyse / decide loop: propagation either runs to
//! fixpoint (then a decision is made, or the instance is satisfied) or stops
//! at a conflict (then a clause is learned and the trail backtracks to the
//! asserting level). Restarts and clause-database reduction are applied
//! between iterations, as are the caller's limits.

use crate::sat::assignment::{Assignment, Solutions, VecAssignment};
use crate::sat::clause::Clause;
use crate::sat::clause_management::{ActivityClauseManagement, ClauseManagement};
use crate::sat::cnf::{Cnf, DecisionLevel};
use crate::sat::conflict_analysis::{analyse, Conflict};
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use crate::sat::phase_saving::{PhaseSelector, SavedPhases};
use crate::sat::propagation::WatchedLiterals;
use crate::sat::restarter::{Geometric, Restarter};
use crate::sat::solver::{Limits, Solver, Verdict};
use crate::sat::trail::{Reason, Trail};
use crate::sat::variable_selection::{VariableSelection, Vsids, DEFAULT_DECAY};
use log::debug;

/// Counters accumulated over one solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: usize,
    pub learnt: usize,
    pub removed: usize,
}

#[derive(Debug, Clone)]
pub struct Cdcl<
    L: Literal = PackedLiteral,
    A: Assignment = VecAssignment,
    V: VariableSelection = Vsids,
    R: Restarter = Geometric<2>,
    M: ClauseManagement = ActivityClauseManagement,
> {
    pub cnf: Cnf<L>,
    pub assignment: A,
    pub trail: Trail<L>,
    watches: WatchedLiterals,
    selector: V,
    phases: SavedPhases,
    restarter: R,
    clause_db: M,
    limits: Limits,
    decision_level: DecisionLevel,
    pub stats: Stats,
}

impl<L, A, V, R, M> Cdcl<L, A, V, R, M>
where
    L: Literal,
    A: Assignment,
    V: VariableSelection,
    R: Restarter,
    M: ClauseManagement,
{
    #[must_use]
    pub fn with_limits(cnf: Cnf<L>, limits: Limits) -> Self {
        let watches = WatchedLiterals::new(&cnf);
        let occurrences: Vec<Variable> = cnf
            .iter()
            .flat_map(|c| c.iter().map(|l| l.variable()))
            .collect();
        let selector = V::new(cnf.num_vars, &occurrences);
        let assignment = A::new(cnf.num_vars);
        let trail = Trail::new(cnf.num_vars);
        let phases = SavedPhases::new(cnf.num_vars);

        Self {
            assignment,
            trail,
            watches,
            selector,
            phases,
            restarter: R::new(),
            clause_db: M::new(),
            cnf,
            limits,
            decision_level: 0,
            stats: Stats::default(),
        }
    }

    #[must_use]
    pub const fn decision_level(&self) -> DecisionLevel {
        self.decision_level
    }

    fn backtrack(&mut self, level: DecisionLevel) {
        self.trail
            .backtrack_to(&mut self.assignment, &mut self.phases, level);
        self.decision_level = level;
    }

    /// Seeds level 0 with the original unit clauses. Returns `false` on an
    /// immediate contradiction between units.
    fn assert_initial_units(&mut self) -> bool {
        for c_ref in 0..self.cnf.non_learnt_idx {
            if !self.cnf[c_ref].is_unit() {
                continue;
            }
            let lit = self.cnf[c_ref][0];
            match self.assignment.literal_value(lit) {
                None => {
                    self.trail
                        .assign(&mut self.assignment, lit, 0, Reason::Clause(c_ref));
                }
                Some(false) => return false,
                Some(true) => {}
            }
        }
        true
    }

    /// Stores a learned clause, backtracks, and asserts its first literal.
    fn learn(&mut self, clause: Clause<L>, bt_level: DecisionLevel, used: &[usize]) {
        let lit = clause[0];
        let learnt_ref = self.cnf.add_learnt(clause);
        self.watches.attach(&self.cnf[learnt_ref], learnt_ref);
        self.backtrack(bt_level);
        self.trail
            .assign(&mut self.assignment, lit, bt_level, Reason::Clause(learnt_ref));
        self.clause_db.on_conflict(&mut self.cnf, learnt_ref, used);
    }

    fn out_of_budget(&self) -> bool {
        self.limits
            .max_conflicts
            .is_some_and(|max| self.stats.conflicts >= max)
            || self
                .limits
                .max_learnt
                .is_some_and(|max| self.cnf.num_learnt() >= max)
            || self.limits.interrupted()
    }

    fn search(&mut self) -> Verdict {
        if self.cnf.iter().any(Clause::is_empty) {
            return Verdict::Unsatisfiable;
        }
        if !self.assert_initial_units() {
            return Verdict::Unsatisfiable;
        }

        loop {
            if let Some(c_ref) = self.watches.propagate(
                &mut self.cnf,
                &mut self.trail,
                &mut self.assignment,
                self.decision_level,
            ) {
                self.stats.conflicts += 1;

                let (conflict, to_bump, used) =
                    analyse(&self.cnf, &self.trail, c_ref, self.decision_level);
                self.selector.bumps(to_bump);
                self.selector.decay(DEFAULT_DECAY);

                match conflict {
                    Conflict::Ground => return Verdict::Unsatisfiable,
                    Conflict::Unit(clause) => self.learn(clause, 0, &used),
                    Conflict::Learned(bt_level, clause) => self.learn(clause, bt_level, &used),
                }

                if self.out_of_budget() {
                    return Verdict::Unknown;
                }

                if self.restarter.should_restart() {
                    self.stats.restarts += 1;
                    debug!(
                        "restart {} after {} conflicts",
                        self.stats.restarts, self.stats.conflicts
                    );
                    self.backtrack(0);
                }

                if self.clause_db.should_reduce(&self.cnf) {
                    self.clause_db
                        .reduce(&mut self.cnf, &mut self.trail, &mut self.watches);
                }
            } else {
                if self.assignment.all_assigned() {
                    return Verdict::Satisfiable(self.solutions());
                }

                if self.limits.interrupted() {
                    return Verdict::Unknown;
                }

                let Some(var) = self.selector.pick(&self.assignment) else {
                    return Verdict::Satisfiable(self.solutions());
                };
                let polarity = self.phases.next_phase(var);

                self.decision_level += 1;
                self.stats.decisions += 1;
                self.trail.assign(
                    &mut self.assignment,
                    L::new(var, polarity),
                    self.decision_level,
                    Reason::Decision,
                );
            }
        }
    }
}

impl<L, A, V, R, M> Solver<L> for Cdcl<L, A, V, R, M>
where
    L: Literal,
    A: Assignment,
    V: VariableSelection,
    R: Restarter,
    M: ClauseManagement,
{
    fn new(cnf: Cnf<L>) -> Self {
        Self::with_limits(cnf, Limits::default())
    }

    fn solve(&mut self) -> Verdict {
        let verdict = self.search();
        self.stats.propagations = self.watches.num_propagations;
        self.stats.learnt = self.cnf.num_learnt();
        self.stats.removed = self.clause_db.num_removed();
        verdict
    }

    fn solutions(&self) -> Solutions {
        self.assignment.solutions()
    }
}
