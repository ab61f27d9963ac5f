//! End-to-end checks of the solver through its public API: models are
//! verified against the input clauses, verdicts are cross-checked against
//! brute-force enumeration on small instances, and the Sudoku front end is
//! exercised on real puzzles.

use satori::sat::assignment::Solutions;
use satori::sat::solver::{solve, solve_with_limits, Limits, Verdict};
use satori::sudoku::{self, Grid};
use std::str::FromStr;

fn assert_model_satisfies(clauses: &[Vec<i32>], solutions: &Solutions) {
    for clause in clauses {
        assert!(
            clause.iter().any(|&lit| solutions.check(lit)),
            "clause {clause:?} violated by model"
        );
    }
}

/// Checks satisfiability by enumerating all assignments. Only viable for
/// small variable counts.
fn brute_force_sat(num_vars: usize, clauses: &[Vec<i32>]) -> bool {
    (0..(1u32 << num_vars)).any(|bits| {
        clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let var = lit.unsigned_abs() as usize;
                let value = bits & (1 << (var - 1)) != 0;
                value == (lit > 0)
            })
        })
    })
}

fn pigeonhole(pigeons: i32, holes: i32) -> Vec<Vec<i32>> {
    let var = |p: i32, h: i32| p * holes + h + 1;
    let mut clauses = Vec::new();
    for p in 0..pigeons {
        clauses.push((0..holes).map(|h| var(p, h)).collect());
    }
    for h in 0..holes {
        for p1 in 0..pigeons {
            for p2 in (p1 + 1)..pigeons {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    clauses
}

fn random_3sat(num_vars: i32, num_clauses: usize, seed: u64) -> Vec<Vec<i32>> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..num_clauses)
        .map(|_| {
            let mut vars = Vec::with_capacity(3);
            while vars.len() < 3 {
                let var = rng.i32(1..=num_vars);
                if !vars.contains(&var) {
                    vars.push(var);
                }
            }
            vars.into_iter()
                .map(|var| if rng.bool() { var } else { -var })
                .collect()
        })
        .collect()
}

#[test]
fn sat_models_satisfy_every_clause() {
    let clauses = random_3sat(15, 40, 7);
    let verdict = solve(15, &clauses).unwrap();
    if let Verdict::Satisfiable(solutions) = &verdict {
        assert_model_satisfies(&clauses, solutions);
    }
}

#[test]
fn verdicts_match_brute_force_on_random_instances() {
    for seed in 0..30 {
        let clauses = random_3sat(10, 43, seed);
        let verdict = solve(10, &clauses).unwrap();
        let expected = brute_force_sat(10, &clauses);
        match verdict {
            Verdict::Satisfiable(solutions) => {
                assert!(expected, "solver found a model for an UNSAT instance");
                assert_model_satisfies(&clauses, &solutions);
            }
            Verdict::Unsatisfiable => {
                assert!(!expected, "solver missed a model, seed {seed}");
            }
            Verdict::Unknown => panic!("no limits were set"),
        }
    }
}

#[test]
fn solving_twice_agrees() {
    let clauses = random_3sat(12, 50, 11);
    let first = solve(12, &clauses).unwrap();
    let second = solve(12, &clauses).unwrap();
    assert_eq!(first.is_sat(), second.is_sat());
}

#[test]
fn pigeonhole_is_unsatisfiable() {
    let clauses = pigeonhole(5, 4);
    let verdict = solve(20, &clauses).unwrap();
    assert_eq!(verdict, Verdict::Unsatisfiable);
}

#[test]
fn conflict_budget_yields_unknown() {
    let clauses = pigeonhole(7, 6);
    let limits = Limits {
        max_conflicts: Some(5),
        ..Limits::default()
    };
    let verdict = solve_with_limits(42, &clauses, limits).unwrap();
    assert_eq!(verdict, Verdict::Unknown);
}

#[test]
fn sudoku_puzzle_solves_end_to_end() {
    let puzzle = "\
        ..3.2.6..\n\
        9..3.5..1\n\
        ..18.64..\n\
        ..81.29..\n\
        7.......8\n\
        ..67.82..\n\
        ..26.95..\n\
        8..2.3..9\n\
        ..5.1.3..";
    let grid = Grid::from_str(puzzle).unwrap();
    let solved = sudoku::solver::solve(&grid).expect("puzzle is solvable");

    assert!(solved.is_complete());
    // Clues survive into the solution.
    for row in 0..9 {
        for col in 0..9 {
            if grid.get(row, col) != 0 {
                assert_eq!(solved.get(row, col), grid.get(row, col));
            }
        }
    }
    // Each row, column and box holds nine distinct digits.
    for i in 0..9 {
        let mut row_seen = [false; 10];
        let mut col_seen = [false; 10];
        let mut box_seen = [false; 10];
        for j in 0..9 {
            row_seen[solved.get(i, j) as usize] = true;
            col_seen[solved.get(j, i) as usize] = true;
            box_seen[solved.get(i / 3 * 3 + j / 3, i % 3 * 3 + j % 3) as usize] = true;
        }
        assert!(row_seen[1..].iter().all(|&s| s));
        assert!(col_seen[1..].iter().all(|&s| s));
        assert!(box_seen[1..].iter().all(|&s| s));
    }
}

#[test]
fn solved_grid_is_a_fixed_point() {
    let puzzle = "\
        534678912\n\
        672195348\n\
        198342567\n\
        859761423\n\
        426853791\n\
        713924856\n\
        961537284\n\
        287419635\n\
        345286179";
    let grid = Grid::from_str(puzzle).unwrap();
    let solved = sudoku::solver::solve(&grid).expect("a valid full grid satisfies its encoding");
    assert_eq!(solved, grid);
}

#[test]
fn contradictory_clues_have_no_solution() {
    let mut grid = Grid::default();
    grid.set(0, 0, 5);
    grid.set(0, 8, 5);
    assert_eq!(sudoku::solver::solve(&grid), None);
}
