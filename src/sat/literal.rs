#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal representations.
//!
//! A literal is a variable paired with a polarity. The solver is generic over
//! the concrete representation; `PackedLiteral` (polarity in the top bit) is
//! the default throughout the crate.

use core::ops::Not;
use std::fmt::Debug;
use std::hash::Hash;

/// Variable identifier, 1-based. Slot 0 is never a valid variable.
pub type Variable = u32;

pub trait Literal: Copy + Debug + Eq + Hash + Default {
    fn new(var: Variable, polarity: bool) -> Self;
    fn variable(self) -> Variable;

    /// `true` for a positive literal, `false` for a negated one.
    fn polarity(self) -> bool;

    #[must_use]
    fn negated(self) -> Self;

    fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// Dense index usable for per-literal tables such as watch lists.
    fn index(self) -> usize {
        ((self.variable() as usize) << 1) | usize::from(self.polarity())
    }

    /// Builds a literal from its DIMACS encoding: sign = polarity,
    /// magnitude = variable id. Zero is not a literal and must be rejected
    /// before this is called.
    #[must_use]
    fn from_i32(value: i32) -> Self {
        debug_assert_ne!(value, 0);
        Self::new(value.unsigned_abs(), value.is_positive())
    }

    /// The DIMACS encoding of this literal.
    fn to_i32(self) -> i32 {
        let v = i32::try_from(self.variable()).unwrap_or(i32::MAX);
        if self.polarity() {
            v
        } else {
            -v
        }
    }
}

/// Literal packed into a single `u32`: variable in the low 31 bits, polarity
/// in the top bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self((var & 0x7FFF_FFFF) | (u32::from(polarity) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & 0x7FFF_FFFF
    }

    fn polarity(self) -> bool {
        (self.0 >> 31) != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ (1 << 31))
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// Literal stored as `2 * var + polarity`, i.e. its own dense index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DoubleLiteral(u32);

impl Literal for DoubleLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var * 2 + u32::from(polarity))
    }

    fn variable(self) -> Variable {
        self.0 / 2
    }

    fn polarity(self) -> bool {
        self.0 % 2 != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Not for DoubleLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
