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

//! Evaluation limit monitor for batch selection
//!
//! `EvaluationLimitMonitor` stops the search once a fixed number of
//! candidates has been scored. The selector then treats every pending
//! candidate as a leaf, so the pool still yields a batch.

use crate::{
    batch::Batch,
    candidate::CandidateBatch,
    monitor::selection_monitor::{PruneReason, SearchCommand, SelectionMonitor},
    pool::MailPool,
    selector::SelectionRequest,
    stats::SelectionStatistics,
};
use mailroom_model::num::MailNumeric;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationLimitMonitor<T> {
    evaluation_limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> EvaluationLimitMonitor<T> {
    /// Creates a new `EvaluationLimitMonitor` with the specified limit.
    pub fn new(evaluation_limit: u64) -> Self {
        Self {
            evaluation_limit,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured limit.
    #[inline]
    pub fn evaluation_limit(&self) -> u64 {
        self.evaluation_limit
    }
}

impl<T> SelectionMonitor<T> for EvaluationLimitMonitor<T>
where
    T: MailNumeric,
{
    fn name(&self) -> &str {
        "EvaluationLimitMonitor"
    }

    fn on_enter_search(
        &mut self,
        _pool: &MailPool<T>,
        _request: &SelectionRequest<T>,
        _statistics: &SelectionStatistics,
    ) {
    }

    fn search_command(&mut self, statistics: &SelectionStatistics) -> SearchCommand {
        if statistics.evaluations >= self.evaluation_limit {
            SearchCommand::Terminate(format!(
                "evaluation limit of {} reached",
                self.evaluation_limit
            ))
        } else {
            SearchCommand::Continue
        }
    }

    fn on_candidate(&mut self, _candidate: &CandidateBatch, _statistics: &SelectionStatistics) {}

    fn on_prune(
        &mut self,
        _candidate: &CandidateBatch,
        _position: usize,
        _reason: PruneReason,
        _statistics: &SelectionStatistics,
    ) {
    }

    fn on_leaf(&mut self, _candidate: &CandidateBatch, _statistics: &SelectionStatistics) {}

    fn on_exit_search(&mut self, _batch: &Batch<T>, _statistics: &SelectionStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_before_limit_and_terminate_at_limit() {
        let mut monitor = EvaluationLimitMonitor::<i64>::new(3);
        let mut stats = SelectionStatistics::default();

        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        stats.on_evaluation();
        stats.on_evaluation();
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);

        stats.on_evaluation();
        match monitor.search_command(&stats) {
            SearchCommand::Terminate(msg) => assert!(msg.contains("3")),
            other => panic!("expected Terminate, got {}", other),
        }
        assert_eq!(monitor.evaluation_limit(), 3);
        assert_eq!(SelectionMonitor::<i64>::name(&monitor), "EvaluationLimitMonitor");
    }
}
