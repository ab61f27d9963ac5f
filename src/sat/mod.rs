#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The SAT solver core.

pub mod assignment;
pub mod cdcl;
pub mod clause;
pub mod clause_management;
pub mod cnf;
pub mod conflict_analysis;
pub mod dimacs;
pub mod literal;
pub mod phase_saving;
pub mod propagation;
pub mod restarter;
pub mod solver;
pub mod trail;
pub mod variable_selection;

pub use assignment::Solutions;
pub use cdcl::Cdcl;
pub use cnf::{Cnf, MalformedClauseError};
pub use literal::{Literal, PackedLiteral};
pub use solver::{solve, solve_with_limits, Limits, Solver, Verdict};
