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

//! Simulated time.
//!
//! The selector is handed `now` explicitly; only the sorter reads the clock,
//! and it additionally needs the last delivery time to decide whether a
//! partially filled tube should leave even though no good batch was found.

use crate::num::MailNumeric;

/// Read-only view of the simulation clock.
pub trait Clock<T> {
    /// Returns the current simulated tick.
    fn now(&self) -> T;

    /// Returns the tick after which no new mail is expected.
    fn last_delivery_time(&self) -> T;

    /// Returns `true` once the clock has moved past the last delivery time.
    #[inline]
    fn is_past_last_delivery(&self) -> bool
    where
        T: PartialOrd,
    {
        self.now() > self.last_delivery_time()
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SimulationClock<T> {
    now: T,
    last_delivery_time: T,
}

impl<T> SimulationClock<T>
where
    T: MailNumeric,
{
    /// Creates a clock at tick zero.
    #[inline]
    pub fn new(last_delivery_time: T) -> Self {
        Self {
            now: T::zero(),
            last_delivery_time,
        }
    }

    /// Creates a clock at `now`.
    #[inline]
    pub fn starting_at(now: T, last_delivery_time: T) -> Self {
        Self {
            now,
            last_delivery_time,
        }
    }

    /// Advances the clock by one tick and returns the new time.
    #[inline]
    pub fn tick(&mut self) -> T {
        self.advance(T::one())
    }

    /// Advances the clock by `ticks`, saturating at the type bounds.
    #[inline]
    pub fn advance(&mut self, ticks: T) -> T {
        self.now = self.now.saturating_add(ticks);
        self.now
    }

    /// Jumps to `now`.
    #[inline]
    pub fn set(&mut self, now: T) {
        self.now = now;
    }
}

impl<T> Clock<T> for SimulationClock<T>
where
    T: MailNumeric,
{
    #[inline]
    fn now(&self) -> T {
        self.now
    }

    #[inline]
    fn last_delivery_time(&self) -> T {
        self.last_delivery_time
    }
}

impl<T> std::fmt::Display for SimulationClock<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SimulationClock(now: {}, last_delivery: {})",
            self.now, self.last_delivery_time
        )
    }
}
