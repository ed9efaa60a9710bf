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

use crate::{
    batch::Batch,
    candidate::CandidateBatch,
    monitor::selection_monitor::{PruneReason, SearchCommand, SelectionMonitor},
    pool::MailPool,
    selector::SelectionRequest,
    stats::SelectionStatistics,
};
use mailroom_model::num::MailNumeric;

/// A no-operation monitor that implements the `SelectionMonitor` trait
/// but does nothing on any of the events, always returning `Continue` for the
/// search command.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T> {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> SelectionMonitor<T> for NoOperationMonitor<T>
where
    T: MailNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        _pool: &MailPool<T>,
        _request: &SelectionRequest<T>,
        _statistics: &SelectionStatistics,
    ) {
    }

    #[inline(always)]
    fn search_command(&mut self, _statistics: &SelectionStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_candidate(&mut self, _candidate: &CandidateBatch, _statistics: &SelectionStatistics) {}

    #[inline(always)]
    fn on_prune(
        &mut self,
        _candidate: &CandidateBatch,
        _position: usize,
        _reason: PruneReason,
        _statistics: &SelectionStatistics,
    ) {
    }

    #[inline(always)]
    fn on_leaf(&mut self, _candidate: &CandidateBatch, _statistics: &SelectionStatistics) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _batch: &Batch<T>, _statistics: &SelectionStatistics) {}
}
