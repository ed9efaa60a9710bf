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
    batch::Batch, candidate::CandidateBatch, pool::MailPool, selector::SelectionRequest,
    stats::SelectionStatistics,
};
use mailroom_model::num::MailNumeric;

/// Command returned by the monitor to control the search process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Continue the search process.
    Continue,
    /// Stop the search process. The candidates still pending become leaves.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate({})", reason),
        }
    }
}

/// Why an extension of a candidate was not pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneReason {
    /// The item lies on the other side of the mailroom.
    Direction,
    /// The item does not fit into the remaining capacity.
    Capacity,
    /// Adding the item would lower the efficiency.
    Efficiency,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Direction => write!(f, "Direction"),
            PruneReason::Capacity => write!(f, "Capacity"),
            PruneReason::Efficiency => write!(f, "Efficiency"),
        }
    }
}

/// Trait for monitoring and controlling a batch selection.
pub trait SelectionMonitor<T>
where
    T: MailNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the search begins, also for an empty pool.
    fn on_enter_search(
        &mut self,
        pool: &MailPool<T>,
        request: &SelectionRequest<T>,
        statistics: &SelectionStatistics,
    );

    /// Called at the beginning of every search loop iteration.
    fn search_command(&mut self, _statistics: &SelectionStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called when a candidate is popped from the work stack.
    fn on_candidate(&mut self, candidate: &CandidateBatch, statistics: &SelectionStatistics);

    /// Called when an extension of `candidate` by the item at `position` is discarded.
    fn on_prune(
        &mut self,
        candidate: &CandidateBatch,
        position: usize,
        reason: PruneReason,
        statistics: &SelectionStatistics,
    );

    /// Called when a candidate is recorded as finished.
    fn on_leaf(&mut self, candidate: &CandidateBatch, statistics: &SelectionStatistics);

    /// Called once the batch has been removed from the pool.
    fn on_exit_search(&mut self, batch: &Batch<T>, statistics: &SelectionStatistics);
}

impl<T> std::fmt::Debug for dyn SelectionMonitor<T>
where
    T: MailNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SelectionMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SelectionMonitor<T>
where
    T: MailNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SelectionMonitor({})", self.name())
    }
}
