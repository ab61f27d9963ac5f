#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Restart scheduling.
//!
//! A restart abandons the current search path (backtrack to level 0) while
//! keeping learned clauses and heuristic state. The default schedule is
//! geometric: each interval is the previous one multiplied by a constant
//! factor, so restarts become progressively rarer.

use std::fmt::Debug;

/// Decides, once per conflict, whether the solver should restart.
pub trait Restarter: Debug + Clone {
    fn new() -> Self;

    /// Conflicts remaining until the next restart.
    fn restarts_in(&self) -> usize;

    /// Total restarts performed so far.
    fn num_restarts(&self) -> usize;

    /// Advances to the next interval. Called when the countdown hits zero.
    fn restart(&mut self);

    /// Counts down one conflict; triggers and reschedules at zero.
    fn should_restart(&mut self) -> bool;
}

/// Base interval for the growing schedules.
const INITIAL_INTERVAL: usize = 64;

/// Geometric schedule: intervals `I, I*N, I*N^2, ...` with `I = 64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometric<const N: usize> {
    restarts: usize,
    restarts_in: usize,
    interval: usize,
}

impl<const N: usize> Restarter for Geometric<N> {
    fn new() -> Self {
        Self {
            restarts: 0,
            restarts_in: INITIAL_INTERVAL,
            interval: INITIAL_INTERVAL,
        }
    }

    fn restarts_in(&self) -> usize {
        self.restarts_in
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }

    fn restart(&mut self) {
        self.restarts += 1;
        self.interval = self.interval.saturating_mul(N);
        self.restarts_in = self.interval;
    }

    fn should_restart(&mut self) -> bool {
        if self.restarts_in == 0 {
            self.restart();
            true
        } else {
            self.restarts_in -= 1;
            false
        }
    }
}

/// Luby schedule: intervals `u_1*N, u_2*N, ...` over the Luby sequence
/// 1, 1, 2, 1, 1, 2, 4, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Luby<const N: usize> {
    restarts: usize,
    restarts_in: usize,
    next: usize,
}

impl<const N: usize> Luby<N> {
    fn luby(x: usize) -> usize {
        let mut k = 1_usize;
        while (1 << k) - 1 < x {
            k += 1;
        }
        if x == (1 << k) - 1 {
            1 << (k - 1)
        } else {
            Self::luby(x - (1 << (k - 1)) + 1)
        }
    }
}

impl<const N: usize> Restarter for Luby<N> {
    fn new() -> Self {
        Self {
            restarts: 0,
            restarts_in: N,
            next: 2,
        }
    }

    fn restarts_in(&self) -> usize {
        self.restarts_in
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }

    fn restart(&mut self) {
        self.restarts += 1;
        self.restarts_in = Self::luby(self.next) * N;
        self.next += 1;
    }

    fn should_restart(&mut self) -> bool {
        if self.restarts_in == 0 {
            self.restart();
            true
        } else {
            self.restarts_in -= 1;
            false
        }
    }
}

/// Never restarts. Disables the policy entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Never;

impl Restarter for Never {
    fn new() -> Self {
        Self
    }

    fn restarts_in(&self) -> usize {
        usize::MAX
    }

    fn num_restarts(&self) -> usize {
        0
    }

    fn restart(&mut self) {}

    fn should_restart(&mut self) -> bool {
        false
    }
}
