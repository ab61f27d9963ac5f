#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A CDCL SAT solver with watched-literal propagation, first-UIP clause
//! learning, VSIDS branching and restarts, plus a Sudoku front end that
//! encodes puzzles to CNF.

/// The `sat` module implements the SAT solver, which determines the
/// satisfiability of Boolean formulas in conjunctive normal form.
pub mod sat;

/// The `sudoku` module encodes 9x9 Sudoku puzzles to CNF and decodes
/// models back into solved grids.
pub mod sudoku;
