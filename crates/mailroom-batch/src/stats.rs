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

use std::time::Duration;

/// Statistics collected during one batch selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStatistics {
    /// Number of items in the pool when the selection started.
    pub pool_size: u64,
    /// Single-item candidates pushed at the start of the search.
    pub seeds: u64,
    /// Candidates popped from the work stack.
    pub candidates_explored: u64,
    /// Candidates scored (seeds and extensions).
    pub evaluations: u64,
    /// Extensions pushed because they did not lower the efficiency.
    pub extensions_pushed: u64,
    /// Extensions skipped because they would cross the mailroom.
    pub prunings_direction: u64,
    /// Extensions skipped because they would overflow the carrier.
    pub prunings_capacity: u64,
    /// Extensions discarded because they lowered the efficiency.
    pub prunings_efficiency: u64,
    /// Candidates recorded as finished.
    pub leaves: u64,
    /// The largest candidate popped.
    pub max_depth: u64,
    /// Total time spent in the selector.
    pub time_total: Duration,
}

impl SelectionStatistics {
    #[inline]
    pub fn on_seed(&mut self) {
        self.seeds = self.seeds.saturating_add(1);
    }

    #[inline]
    pub fn on_candidate_explored(&mut self, depth: usize) {
        self.candidates_explored = self.candidates_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_evaluation(&mut self) {
        self.evaluations = self.evaluations.saturating_add(1);
    }

    #[inline]
    pub fn on_extension_pushed(&mut self) {
        self.extensions_pushed = self.extensions_pushed.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_direction(&mut self) {
        self.prunings_direction = self.prunings_direction.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_capacity(&mut self) {
        self.prunings_capacity = self.prunings_capacity.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_efficiency(&mut self) {
        self.prunings_efficiency = self.prunings_efficiency.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf(&mut self) {
        self.leaves = self.leaves.saturating_add(1);
    }

    #[inline]
    pub fn set_pool_size(&mut self, size: usize) {
        self.pool_size = size as u64;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total number of pruned extensions.
    #[inline]
    pub fn prunings(&self) -> u64 {
        self.prunings_direction
            .saturating_add(self.prunings_capacity)
            .saturating_add(self.prunings_efficiency)
    }
}

impl std::fmt::Display for SelectionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Batch Selection Statistics:")?;
        writeln!(f, "  Pool size:              {}", self.pool_size)?;
        writeln!(f, "  Seeds:                  {}", self.seeds)?;
        writeln!(f, "  Candidates explored:    {}", self.candidates_explored)?;
        writeln!(f, "  Evaluations:            {}", self.evaluations)?;
        writeln!(f, "  Extensions pushed:      {}", self.extensions_pushed)?;
        writeln!(f, "  Prunings (direction):   {}", self.prunings_direction)?;
        writeln!(f, "  Prunings (capacity):    {}", self.prunings_capacity)?;
        writeln!(f, "  Prunings (efficiency):  {}", self.prunings_efficiency)?;
        writeln!(f, "  Leaves:                 {}", self.leaves)?;
        writeln!(f, "  Max depth reached:      {}", self.max_depth)?;
        writeln!(f, "  Total time:             {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_depth() {
        let mut s = SelectionStatistics::default();
        s.on_seed();
        s.on_candidate_explored(1);
        s.on_candidate_explored(3);
        s.on_candidate_explored(2);
        s.on_evaluation();
        s.on_evaluation();
        s.on_pruning_direction();
        s.on_pruning_capacity();
        s.on_pruning_efficiency();
        s.on_leaf();

        assert_eq!(s.seeds, 1);
        assert_eq!(s.candidates_explored, 3);
        assert_eq!(s.max_depth, 3);
        assert_eq!(s.evaluations, 2);
        assert_eq!(s.prunings(), 3);
        assert_eq!(s.leaves, 1);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut s = SelectionStatistics::default();
        s.set_pool_size(12);
        s.set_total_time(Duration::from_millis(3));
        let out = format!("{}", s);
        assert!(out.contains("Pool size:              12"));
        assert!(out.contains("Leaves:"));
    }
}
