#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Direct CNF encoding of Sudoku.
//!
//! Variable `row*81 + col*9 + digit + 1` (all zero-based) is true when the
//! cell holds `digit + 1`. Four clause families: each cell holds a digit, and
//! each row, column and box holds each digit, every one as an at-least-one
//! clause plus pairwise at-most-one clauses; clues become unit clauses. This
//! is the standard direct encoding, redundancy and all; the solver treats it
//! as ordinary CNF.

use crate::sat::assignment::Solutions;
use crate::sat::solver::{solve_with_limits, Limits, Verdict};
use crate::sudoku::Grid;
use itertools::Itertools;

/// One boolean per (row, col, digit) triple.
pub const NUM_VARS: usize = 9 * 9 * 9;

fn var(row: usize, col: usize, digit: usize) -> i32 {
    (row * 81 + col * 9 + digit + 1) as i32
}

/// Appends an at-least-one clause and the pairwise at-most-one clauses for a
/// group of nine variables.
fn exactly_one(clauses: &mut Vec<Vec<i32>>, group: &[i32; 9]) {
    clauses.push(group.to_vec());
    for (i, &a) in group.iter().enumerate() {
        for &b in &group[i + 1..] {
            clauses.push(vec![-a, -b]);
        }
    }
}

/// Encodes a grid into CNF clauses over [`NUM_VARS`] variables.
#[must_use]
pub fn encode(grid: &Grid) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();

    // Each cell holds exactly one digit.
    for (row, col) in (0..9).cartesian_product(0..9) {
        let group: [i32; 9] = std::array::from_fn(|digit| var(row, col, digit));
        exactly_one(&mut clauses, &group);
    }

    for digit in 0..9 {
        // Each digit appears exactly once per row.
        for row in 0..9 {
            let group: [i32; 9] = std::array::from_fn(|col| var(row, col, digit));
            exactly_one(&mut clauses, &group);
        }

        // Exactly once per column.
        for col in 0..9 {
            let group: [i32; 9] = std::array::from_fn(|row| var(row, col, digit));
            exactly_one(&mut clauses, &group);
        }

        // Exactly once per 3x3 box.
        for (box_row, box_col) in (0..3).cartesian_product(0..3) {
            let group: [i32; 9] = std::array::from_fn(|i| {
                var(box_row * 3 + i / 3, box_col * 3 + i % 3, digit)
            });
            exactly_one(&mut clauses, &group);
        }
    }

    // Pin the clues.
    for (row, col) in (0..9).cartesian_product(0..9) {
        let clue = grid.get(row, col);
        if clue != 0 {
            clauses.push(vec![var(row, col, clue as usize - 1)]);
        }
    }

    clauses
}

/// Decodes a satisfying assignment back into a filled grid.
#[must_use]
pub fn decode(solutions: &Solutions) -> Grid {
    let mut grid = Grid::default();
    for v in solutions.true_vars() {
        let id = (v - 1) as usize;
        let (row, col, digit) = (id / 81, (id % 81) / 9, (id % 81) % 9);
        if row < 9 {
            grid.set(row, col, digit as u8 + 1);
        }
    }
    grid
}

/// Solves a puzzle. `None` means the clues are contradictory (or, with
/// non-default limits, that the search was cut off).
#[must_use]
pub fn solve(grid: &Grid) -> Option<Grid> {
    solve_with(grid, Limits::default())
}

/// [`solve`] with caller-imposed limits.
#[must_use]
pub fn solve_with(grid: &Grid, limits: Limits) -> Option<Grid> {
    let clauses = encode(grid);
    // The encoding only produces valid literals over NUM_VARS variables.
    match solve_with_limits(NUM_VARS, &clauses, limits).ok()? {
        Verdict::Satisfiable(solutions) => Some(decode(&solutions)),
        Verdict::Unsatisfiable | Verdict::Unknown => None,
    }
}
