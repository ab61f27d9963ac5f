#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Learned-clause database reduction.
//!
//! Clause learning is unbounded, so the database is periodically reduced:
//! once the learned count exceeds a growing threshold, the lowest-activity
//! half of the learned clauses is dropped. Clauses currently serving as the
//! antecedent of an assigned variable are never removed. Original clauses are
//! never touched.

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::propagation::WatchedLiterals;
use crate::sat::trail::Trail;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::fmt::Debug;

const CLAUSE_DECAY: f64 = 0.999;

pub trait ClauseManagement: Clone + Debug {
    fn new() -> Self;

    /// Called once per conflict with the ref of the freshly learned clause
    /// and the refs of the clauses resolution was performed with.
    fn on_conflict<L: Literal>(&mut self, cnf: &mut Cnf<L>, learnt_ref: usize, used: &[usize]);

    fn should_reduce<L: Literal>(&self, cnf: &Cnf<L>) -> bool;

    /// Removes low-activity learned clauses, compacts the database, remaps
    /// antecedent refs on the trail and rebuilds the watch lists.
    fn reduce<L: Literal>(
        &mut self,
        cnf: &mut Cnf<L>,
        trail: &mut Trail<L>,
        watches: &mut WatchedLiterals,
    );

    fn num_removed(&self) -> usize;
}

/// Activity-ordered reduction with a threshold that grows by half after each
/// pass, so the database is allowed to get larger as search goes deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityClauseManagement {
    limit: usize,
    num_removed: usize,
}

impl ActivityClauseManagement {
    const INITIAL_LIMIT: usize = 2000;
}

impl ClauseManagement for ActivityClauseManagement {
    fn new() -> Self {
        Self {
            limit: Self::INITIAL_LIMIT,
            num_removed: 0,
        }
    }

    fn on_conflict<L: Literal>(&mut self, cnf: &mut Cnf<L>, learnt_ref: usize, used: &[usize]) {
        cnf[learnt_ref].bump_activity(1.0);
        // Learned clauses that keep feeding resolution stay hot; original
        // clauses carry no activity worth tracking.
        for &c_ref in used {
            if c_ref >= cnf.non_learnt_idx {
                cnf[c_ref].bump_activity(1.0);
            }
        }
        for clause in &mut cnf.clauses[cnf.non_learnt_idx..] {
            clause.decay_activity(CLAUSE_DECAY);
        }
    }

    fn should_reduce<L: Literal>(&self, cnf: &Cnf<L>) -> bool {
        cnf.num_learnt() > self.limit
    }

    fn reduce<L: Literal>(
        &mut self,
        cnf: &mut Cnf<L>,
        trail: &mut Trail<L>,
        watches: &mut WatchedLiterals,
    ) {
        let start = cnf.non_learnt_idx;
        let locked = trail.locked_clauses(start);

        let mut candidates: Vec<(usize, f64)> = (start..cnf.len())
            .filter(|c_ref| !locked.contains(c_ref))
            .map(|c_ref| (c_ref, cnf[c_ref].activity()))
            .collect();

        let num_to_remove = candidates.len() / 2;
        if num_to_remove == 0 {
            return;
        }

        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        let removed: FxHashSet<usize> = candidates
            .iter()
            .take(num_to_remove)
            .map(|&(c_ref, _)| c_ref)
            .collect();

        let mut map = FxHashMap::default();
        let mut kept = Vec::with_capacity(cnf.len() - start - num_to_remove);
        for old in start..cnf.len() {
            if !removed.contains(&old) {
                map.insert(old, start + kept.len());
                kept.push(cnf.clauses[old].clone());
            }
        }

        cnf.clauses.truncate(start);
        cnf.clauses.extend(kept);

        trail.remap_reasons(&map, start);
        watches.rebuild(cnf);

        self.num_removed += num_to_remove;
        self.limit = self.limit + self.limit / 2;

        debug!(
            "reduced clause db: removed {num_to_remove}, kept {}, next limit {}",
            cnf.num_learnt(),
            self.limit
        );
    }

    fn num_removed(&self) -> usize {
        self.num_removed
    }
}

/// Keeps every learned clause. Baseline for tests and small instances.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoClauseManagement;

impl ClauseManagement for NoClauseManagement {
    fn new() -> Self {
        Self
    }

    fn on_conflict<L: Literal>(&mut self, _: &mut Cnf<L>, _: usize, _: &[usize]) {}

    fn should_reduce<L: Literal>(&self, _: &Cnf<L>) -> bool {
        false
    }

    fn reduce<L: Literal>(&mut self, _: &mut Cnf<L>, _: &mut Trail<L>, _: &mut WatchedLiterals) {}

    fn num_removed(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::{Assignment, VecAssignment};
    use crate::sat::clause::Clause;
    use crate::sat::literal::PackedLiteral;
    use crate::sat::trail::Reason;
    use smallvec::smallvec;

    fn learnt(lits: &[i32]) -> Clause {
        Clause::learnt(lits.iter().map(|&l| PackedLiteral::from_i32(l)).collect())
    }

    #[test]
    fn test_reduce_drops_low_activity_half() {
        let mut cnf: Cnf = Cnf::new(vec![vec![1, 2], vec![3, 4]]);
        let hot = cnf.add_learnt(learnt(&[-1, 3]));
        cnf.add_learnt(learnt(&[-2, 4]));
        cnf.add_learnt(learnt(&[-3, 4]));
        cnf.add_learnt(learnt(&[-4, 1]));
        cnf[hot].bump_activity(10.0);

        let mut trail = Trail::new(4);
        let mut watches = WatchedLiterals::new(&cnf);
        let mut cm = ActivityClauseManagement::new();

        cm.reduce(&mut cnf, &mut trail, &mut watches);

        assert_eq!(cm.num_removed(), 2);
        assert_eq!(cnf.num_learnt(), 2);
        // The bumped clause survived.
        let expected: smallvec::SmallVec<[PackedLiteral; 8]> =
            smallvec![PackedLiteral::from_i32(-1), PackedLiteral::from_i32(3)];
        assert!(cnf.clauses.iter().any(|c| c.literals == expected));
    }

    #[test]
    fn test_locked_clauses_survive() {
        let mut cnf: Cnf = Cnf::new(vec![vec![1, 2], vec![3, 4]]);
        let locked_ref = cnf.add_learnt(learnt(&[-1, 3]));
        cnf.add_learnt(learnt(&[-2, 4]));
        cnf.add_learnt(learnt(&[-3, 4]));

        let mut trail: Trail = Trail::new(4);
        let mut a = VecAssignment::new(4);
        trail.assign(
            &mut a,
            PackedLiteral::from_i32(3),
            0,
            Reason::Clause(locked_ref),
        );

        let mut watches = WatchedLiterals::new(&cnf);
        let mut cm = ActivityClauseManagement::new();
        cm.reduce(&mut cnf, &mut trail, &mut watches);

        // The antecedent was kept and its trail ref still points at it.
        let Reason::Clause(new_ref) = trail[0].reason else {
            panic!("reason lost");
        };
        assert_eq!(cnf[new_ref][0], PackedLiteral::from_i32(-1));
    }

    #[test]
    fn test_on_conflict_bumps_resolution_antecedents() {
        let mut cnf: Cnf = Cnf::new(vec![vec![1, 2], vec![3, 4]]);
        let antecedent = cnf.add_learnt(learnt(&[-1, 3]));
        let fresh = cnf.add_learnt(learnt(&[-2, 4]));

        let mut cm = ActivityClauseManagement::new();
        cm.on_conflict(&mut cnf, fresh, &[0, antecedent]);

        // The learned antecedent is bumped (then decayed once); the original
        // clause is left alone.
        assert!((cnf[antecedent].activity() - CLAUSE_DECAY).abs() < f64::EPSILON);
        assert!((cnf[fresh].activity() - CLAUSE_DECAY).abs() < f64::EPSILON);
        assert!(cnf[0].activity().abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_grows() {
        let mut cnf: Cnf = Cnf::new(vec![vec![1, 2], vec![3, 4]]);
        for _ in 0..4 {
            cnf.add_learnt(learnt(&[-1, 3]));
        }
        let mut trail = Trail::new(4);
        let mut watches = WatchedLiterals::new(&cnf);

        let mut cm = ActivityClauseManagement::new();
        assert!(!cm.should_reduce(&cnf));
        cm.reduce(&mut cnf, &mut trail, &mut watches);
        assert_eq!(
            cm,
            ActivityClauseManagement {
                limit: 3000,
                num_removed: 2,
            }
        );
    }
}
