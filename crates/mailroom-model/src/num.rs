// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Mail Numeric Trait
//!
//! Unified numeric bounds for floors and simulation ticks. Every component of
//! the mailroom stack is generic over a signed primitive integer so that an
//! embedding simulation can pick `i32` for a small building or `i64` for a
//! long-running clock without touching the selection code.
//!
//! `ToPrimitive` is required because the scoring model evaluates waiting
//! times with a fractional exponent and therefore works in `f64`.

use num_traits::{PrimInt, Signed, ToPrimitive};
use std::hash::Hash;

/// A trait alias for the integer types usable as floors and ticks.
/// These are usually the signed integer types `i8`, `i16`, `i32`, `i64` and `isize`.
pub trait MailNumeric:
    PrimInt + Signed + ToPrimitive + std::fmt::Debug + std::fmt::Display + Hash + Send + Sync
{
    /// Converts the value to `f64`, saturating to the nearest representable value.
    #[inline]
    fn as_f64(self) -> f64 {
        // Every signed primitive fits into f64 (possibly losing precision).
        self.to_f64().unwrap_or(0.0)
    }

    /// Returns `|self - other|` as `u64` without overflowing `Self`.
    ///
    /// Saturates at `u64::MAX` for distances that do not fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mailroom_model::num::MailNumeric;
    ///
    /// assert_eq!((-100i8).abs_diff_u64(100), 200);
    /// assert_eq!(i64::MIN.abs_diff_u64(i64::MAX), u64::MAX);
    /// ```
    #[inline]
    fn abs_diff_u64(self, other: Self) -> u64 {
        match (self.to_i128(), other.to_i128()) {
            (Some(a), Some(b)) => u64::try_from(a.abs_diff(b)).unwrap_or(u64::MAX),
            _ => u64::MAX,
        }
    }
}

impl<T> MailNumeric for T where
    T: PrimInt + Signed + ToPrimitive + std::fmt::Debug + std::fmt::Display + Hash + Send + Sync
{
}
