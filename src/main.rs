//! # satori
//!
//! `satori` is a command-line CDCL SAT solver. It parses and solves problems
//! in CNF (Conjunctive Normal Form) DIMACS format, and includes a Sudoku
//! solver that converts puzzles to CNF.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a DIMACS file
//! satori problem.cnf
//!
//! # Same, printing the model and statistics
//! satori file --path problem.cnf --print-solution --stats
//!
//! # Solve a Sudoku puzzle (one row per line, '.' or '0' for blanks)
//! satori sudoku --path puzzle.txt
//!
//! # Give up after a conflict budget
//! satori file --path hard.cnf --max-conflicts 100000
//! ```
//!
//! Verdicts are reported in the DIMACS convention: an `s` line carrying
//! `SATISFIABLE`, `UNSATISFIABLE` or `UNKNOWN`, and with `--print-solution`
//! a `v` line carrying the model terminated by `0`.

use clap::{Args, Parser, Subcommand};
use satori::sat::assignment::Solutions;
use satori::sat::cdcl::{Cdcl, Stats};
use satori::sat::cnf::Cnf;
use satori::sat::dimacs::parse_file;
use satori::sat::literal::Literal;
use satori::sat::solver::{Limits, Solver, Verdict};
use satori::sudoku::{self, Grid};
use std::str::FromStr;
use std::time::Duration;

/// Defines the command-line interface. Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "satori", version, about = "A CDCL SAT solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    #[arg(global = true)]
    path: Option<String>,

    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(short, long)]
        path: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku puzzle by converting it into a CNF formula.
    Sudoku {
        /// Path to the puzzle file: nine lines of nine cells, blanks given
        /// as '.' or '0', optionally space-separated.
        #[arg(short, long)]
        path: String,

        #[command(flatten)]
        common: CommonOptions,
    },
}

/// Common command-line options shared across subcommands.
#[derive(Args, Debug, Default)]
struct CommonOptions {
    /// Verify the found model against the original formula.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Print solving statistics after the verdict.
    #[arg(short, long, default_value_t = false)]
    stats: bool,

    /// Print the satisfying assignment as a DIMACS `v` line.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,

    /// Give up with verdict UNKNOWN after this many conflicts.
    #[arg(short, long)]
    max_conflicts: Option<u64>,
}

impl CommonOptions {
    fn limits(&self) -> Limits {
        Limits {
            max_conflicts: self.max_conflicts,
            ..Limits::default()
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // A bare path without a subcommand defaults to solving a DIMACS file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            run_dimacs(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => run_dimacs(&path, &common),
        Some(Commands::Sudoku { path, common }) => run_sudoku(&path, &common),
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn run_dimacs(path: &str, common: &CommonOptions) {
    let time = std::time::Instant::now();
    let cnf: Cnf = parse_file(path).unwrap_or_else(|e| {
        eprintln!("Failed to parse {path}: {e}");
        std::process::exit(1);
    });
    let parse_time = time.elapsed();

    let (verdict, stats, solve_time) = run_solver(cnf.clone(), common.limits());

    report(&verdict, common);
    if common.verify {
        if let Verdict::Satisfiable(solutions) = &verdict {
            verify_model(&cnf, solutions);
        }
    }
    if common.stats {
        print_stats(&cnf, &stats, parse_time, solve_time);
    }

    std::process::exit(exit_code(&verdict));
}

fn run_sudoku(path: &str, common: &CommonOptions) {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {path}: {e}");
        std::process::exit(1);
    });
    let grid = Grid::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Failed to parse {path}: {e}");
        std::process::exit(1);
    });
    println!("Puzzle:\n{grid}");

    let time = std::time::Instant::now();
    let clauses = sudoku::solver::encode(&grid);
    let cnf: Cnf = Cnf::checked(sudoku::solver::NUM_VARS, &clauses).unwrap_or_else(|e| {
        eprintln!("Encoding error: {e}");
        std::process::exit(1);
    });
    let parse_time = time.elapsed();

    let (verdict, stats, solve_time) = run_solver(cnf.clone(), common.limits());

    report(&verdict, common);
    match &verdict {
        Verdict::Satisfiable(solutions) => {
            if common.verify {
                verify_model(&cnf, solutions);
            }
            println!("Solution:\n{}", sudoku::solver::decode(solutions));
        }
        Verdict::Unsatisfiable => println!("Puzzle has no solution"),
        Verdict::Unknown => println!("Gave up before finding a solution"),
    }
    if common.stats {
        print_stats(&cnf, &stats, parse_time, solve_time);
    }

    std::process::exit(exit_code(&verdict));
}

fn run_solver(cnf: Cnf, limits: Limits) -> (Verdict, Stats, Duration) {
    let time = std::time::Instant::now();
    let mut solver: Cdcl = Cdcl::with_limits(cnf, limits);
    let verdict = solver.solve();
    (verdict, solver.stats, time.elapsed())
}

fn report(verdict: &Verdict, common: &CommonOptions) {
    match verdict {
        Verdict::Satisfiable(solutions) => {
            println!("s SATISFIABLE");
            if common.print_solution {
                print_model(solutions);
            }
        }
        Verdict::Unsatisfiable => println!("s UNSATISFIABLE"),
        Verdict::Unknown => println!("s UNKNOWN"),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn print_model(solutions: &Solutions) {
    print!("v");
    for var in 1..=solutions.len() {
        if solutions.value(var as u32) {
            print!(" {var}");
        } else {
            print!(" -{var}");
        }
    }
    println!(" 0");
}

/// Checks every clause against the model and aborts on a violation.
fn verify_model(cnf: &Cnf, solutions: &Solutions) {
    let ok = cnf.iter().all(|clause| {
        clause
            .iter()
            .any(|lit| solutions.value(lit.variable()) == lit.polarity())
    });
    println!("Verified: {ok}");
    assert!(ok, "model failed verification");
}

fn print_stats(cnf: &Cnf, stats: &Stats, parse_time: Duration, solve_time: Duration) {
    println!("Variables:    {}", cnf.num_vars);
    println!("Clauses:      {}", cnf.non_learnt_idx);
    println!("Parse time:   {parse_time:?}");
    println!("Solve time:   {solve_time:?}");
    println!("Conflicts:    {}", stats.conflicts);
    println!("Decisions:    {}", stats.decisions);
    println!("Propagations: {}", stats.propagations);
    println!("Restarts:     {}", stats.restarts);
    println!("Learnt:       {}", stats.learnt);
    println!("Removed:      {}", stats.removed);
}

const fn exit_code(verdict: &Verdict) -> i32 {
    match verdict {
        Verdict::Satisfiable(_) => 10,
        Verdict::Unsatisfiable => 20,
        Verdict::Unknown => 0,
    }
}
