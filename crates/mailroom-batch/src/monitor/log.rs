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

//! Logging monitor for batch selection
//!
//! `LogMonitor` emits `tracing` events for the lifecycle of one selection:
//! the request on entry, periodic progress lines while the stack is worked,
//! and a summary of the chosen batch on exit. Progress lines are throttled
//! by a time interval, and the clock is only read when the explored
//! candidate count matches `clock_check_mask`.

use crate::{
    batch::Batch,
    candidate::CandidateBatch,
    monitor::selection_monitor::{PruneReason, SelectionMonitor},
    pool::MailPool,
    selector::SelectionRequest,
    stats::SelectionStatistics,
};
use mailroom_model::num::MailNumeric;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_efficiency: Option<f64>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> LogMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_efficiency: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Best leaf efficiency seen in the current selection.
    #[inline]
    pub fn best_efficiency(&self) -> Option<f64> {
        self.best_efficiency
    }

    fn log_progress(&mut self, candidate: &CandidateBatch, stats: &SelectionStatistics) {
        let now = Instant::now();
        tracing::debug!(
            elapsed = ?now.duration_since(self.start_time),
            explored = stats.candidates_explored,
            evaluations = stats.evaluations,
            depth = candidate.len(),
            leaves = stats.leaves,
            pruned = stats.prunings(),
            best = ?self.best_efficiency,
            "batch selection progress"
        );
        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), 1023)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}ms, clock_check_mask: {})",
            self.log_interval.as_millis(),
            self.clock_check_mask
        )
    }
}

impl<T> SelectionMonitor<T> for LogMonitor<T>
where
    T: MailNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(
        &mut self,
        pool: &MailPool<T>,
        request: &SelectionRequest<T>,
        _statistics: &SelectionStatistics,
    ) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_efficiency = None;
        tracing::debug!(
            pool = pool.len(),
            capacity = request.capacity(),
            now = %request.now(),
            direction = ?request.direction(),
            "batch selection started"
        );
    }

    fn on_candidate(&mut self, candidate: &CandidateBatch, statistics: &SelectionStatistics) {
        if (statistics.candidates_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(candidate, statistics);
        }
    }

    fn on_prune(
        &mut self,
        _candidate: &CandidateBatch,
        _position: usize,
        _reason: PruneReason,
        _statistics: &SelectionStatistics,
    ) {
    }

    fn on_leaf(&mut self, candidate: &CandidateBatch, _statistics: &SelectionStatistics) {
        let efficiency = candidate.efficiency();
        if self.best_efficiency.is_none_or(|best| efficiency > best) {
            self.best_efficiency = Some(efficiency);
        }
    }

    fn on_exit_search(&mut self, batch: &Batch<T>, statistics: &SelectionStatistics) {
        tracing::debug!(
            items = batch.len(),
            size = batch.total_size(),
            efficiency = ?batch.efficiency(),
            evaluations = statistics.evaluations,
            leaves = statistics.leaves,
            elapsed = ?self.start_time.elapsed(),
            "batch selection finished"
        );
    }
}
