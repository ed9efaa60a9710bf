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

use crate::{batch::Batch, stats::SelectionStatistics};
use mailroom_model::num::MailNumeric;

/// Why a batch selection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionTermination {
    /// The pool was empty; nothing was scored.
    EmptyPool,
    /// No pending item fits the requested capacity and direction.
    NoEligibleItems,
    /// Every candidate was grown to a leaf.
    Exhausted,
    /// A monitor stopped the search. The string explains why.
    Aborted(String),
}

impl std::fmt::Display for SelectionTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionTermination::EmptyPool => write!(f, "Empty Pool"),
            SelectionTermination::NoEligibleItems => write!(f, "No Eligible Items"),
            SelectionTermination::Exhausted => write!(f, "Exhausted"),
            SelectionTermination::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the selector after termination.
#[derive(Debug, Clone)]
pub struct SelectionOutcome<T> {
    batch: Batch<T>,
    termination: SelectionTermination,
    statistics: SelectionStatistics,
}

impl<T> SelectionOutcome<T>
where
    T: MailNumeric,
{
    #[inline]
    pub fn new(batch: Batch<T>, termination: SelectionTermination, statistics: SelectionStatistics) -> Self {
        Self {
            batch,
            termination,
            statistics,
        }
    }

    /// An outcome without a batch.
    #[inline]
    pub fn empty(termination: SelectionTermination, statistics: SelectionStatistics) -> Self {
        Self::new(Batch::empty(), termination, statistics)
    }

    /// Returns the selected batch.
    #[inline]
    pub fn batch(&self) -> &Batch<T> {
        &self.batch
    }

    /// Consumes the outcome and returns the selected batch.
    #[inline]
    pub fn into_batch(self) -> Batch<T> {
        self.batch
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination(&self) -> &SelectionTermination {
        &self.termination
    }

    /// Returns the selection statistics.
    #[inline]
    pub fn statistics(&self) -> &SelectionStatistics {
        &self.statistics
    }

    /// Returns `true` if nothing was selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}

impl<T> std::fmt::Display for SelectionOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SelectionOutcome(batch: {}, termination: {}, evaluations: {})",
            self.batch, self.termination, self.statistics.evaluations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome() {
        let outcome = SelectionOutcome::<i64>::empty(SelectionTermination::EmptyPool, SelectionStatistics::default());
        assert!(outcome.is_empty());
        assert_eq!(outcome.termination(), &SelectionTermination::EmptyPool);
        assert_eq!(outcome.statistics().evaluations, 0);
        assert!(format!("{}", outcome).contains("Empty Pool"));
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(format!("{}", SelectionTermination::Exhausted), "Exhausted");
        assert_eq!(
            format!("{}", SelectionTermination::Aborted("limit".to_string())),
            "Aborted: limit"
        );
        assert_eq!(
            format!("{}", SelectionTermination::NoEligibleItems),
            "No Eligible Items"
        );
    }
}
