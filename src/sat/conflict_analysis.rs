#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! First-UIP conflict analysis.
//!
//! Starting from the conflicting clause, literals assigned at the current
//! decision level are resolved out in reverse trail order using their
//! antecedent clauses, until a single current-level literal remains: the
//! first unique implication point. The learned clause is the negation of the
//! UIP plus the accumulated lower-level literals, and the backtrack level is
//! the second-highest level among them.

use crate::sat::clause::Clause;
use crate::sat::cnf::{Cnf, DecisionLevel};
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use crate::sat::trail::{Reason, Trail};
use smallvec::{smallvec, SmallVec};

/// Outcome of analysing a conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum Conflict<L: Literal = PackedLiteral> {
    /// Conflict with no free decision in play: the formula is unsatisfiable.
    Ground,
    /// The learned clause is a unit; assert it at level 0.
    Unit(Clause<L>),
    /// Backtrack to the level, then assert the clause's first literal. The
    /// asserting literal sits at position 0 and the backtrack-level literal
    /// at position 1, so both watches are immediately correct.
    Learned(DecisionLevel, Clause<L>),
}

/// Analyses the conflict `c_ref`, returning the learned clause, the
/// variables that took part in resolution (for variable-activity bumping)
/// and the clause refs resolved with (for clause-activity bumping).
#[must_use]
pub fn analyse<L: Literal>(
    cnf: &Cnf<L>,
    trail: &Trail<L>,
    c_ref: usize,
    current_level: DecisionLevel,
) -> (Conflict<L>, Vec<Variable>, Vec<usize>) {
    if current_level == 0 {
        return (Conflict::Ground, Vec::new(), Vec::new());
    }

    let mut seen = vec![false; cnf.num_vars + 1];
    let mut to_bump: Vec<Variable> = Vec::new();
    let mut used: Vec<usize> = vec![c_ref];
    let mut lower: SmallVec<[L; 8]> = SmallVec::new();
    let mut path_count = 0_usize;
    let mut trail_idx = trail.len();
    let mut resolved: Option<L> = None;
    let mut reason_ref = c_ref;

    loop {
        let clause = &cnf[reason_ref];

        // For an antecedent, position 0 is the literal being resolved out.
        for &q in clause.iter().skip(usize::from(resolved.is_some())) {
            let var = q.variable();
            let level = trail.level_of(var);

            // Level-0 assignments are globally fixed; their negations can
            // never hold, so they are dropped from the learned clause.
            if !seen[var as usize] && level > 0 {
                seen[var as usize] = true;
                to_bump.push(var);
                if level >= current_level {
                    path_count += 1;
                } else {
                    lower.push(q);
                }
            }
        }

        // Most recent marked assignment on the trail is the next resolvent.
        loop {
            assert!(
                trail_idx > 0,
                "conflict clause has no literal at the current decision level"
            );
            trail_idx -= 1;
            if seen[trail[trail_idx].lit.variable() as usize] {
                break;
            }
        }

        let step = &trail[trail_idx];
        seen[step.lit.variable() as usize] = false;
        resolved = Some(step.lit);
        path_count -= 1;

        if path_count == 0 {
            break;
        }

        reason_ref = match step.reason {
            Reason::Clause(r) => r,
            Reason::Decision => {
                unreachable!("resolved past the decision literal without reaching a UIP")
            }
        };
        used.push(reason_ref);
    }

    let Some(uip) = resolved else {
        unreachable!("conflict analysis terminated without a UIP")
    };

    let mut literals: SmallVec<[L; 8]> = smallvec![uip.negated()];
    literals.extend(lower);

    if literals.len() == 1 {
        return (Conflict::Unit(Clause::learnt(literals)), to_bump, used);
    }

    // Second-highest level in the clause is the backtrack target; move that
    // literal into the second watch position.
    let mut bt_level = 0;
    let mut bt_idx = 1;
    for (i, l) in literals.iter().enumerate().skip(1) {
        let level = trail.level_of(l.variable());
        if level > bt_level {
            bt_level = level;
            bt_idx = i;
        }
    }
    literals.swap(1, bt_idx);

    (
        Conflict::Learned(bt_level, Clause::learnt(literals)),
        to_bump,
        used,
    )
}
