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

//! Monitor fan-out for batch selection
//!
//! Provides `CompositeSelectionMonitor`, which forwards every event to its
//! children. This lets you combine logging and early stopping without
//! coupling either to the selector.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short‑circuits on the first non‑`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    batch::Batch,
    candidate::CandidateBatch,
    monitor::selection_monitor::{PruneReason, SearchCommand, SelectionMonitor},
    pool::MailPool,
    selector::SelectionRequest,
    stats::SelectionStatistics,
};
use mailroom_model::num::MailNumeric;

/// A selection monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeSelectionMonitor<'a, T>
where
    T: MailNumeric,
{
    monitors: Vec<Box<dyn SelectionMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeSelectionMonitor<'a, T>
where
    T: MailNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeSelectionMonitor<'a, T>
where
    T: MailNumeric,
{
    /// Creates a new empty `CompositeSelectionMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeSelectionMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SelectionMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SelectionMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the contained monitors.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn SelectionMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn SelectionMonitor<T> + 'a>> for CompositeSelectionMonitor<'a, T>
where
    T: MailNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SelectionMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> SelectionMonitor<T> for CompositeSelectionMonitor<'a, T>
where
    T: MailNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeSelectionMonitor"
    }

    #[inline(always)]
    fn on_enter_search(
        &mut self,
        pool: &MailPool<T>,
        request: &SelectionRequest<T>,
        statistics: &SelectionStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(pool, request, statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &SelectionStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_candidate(&mut self, candidate: &CandidateBatch, statistics: &SelectionStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_candidate(candidate, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        candidate: &CandidateBatch,
        position: usize,
        reason: PruneReason,
        statistics: &SelectionStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(candidate, position, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_leaf(&mut self, candidate: &CandidateBatch, statistics: &SelectionStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_leaf(candidate, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, batch: &Batch<T>, statistics: &SelectionStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(batch, statistics);
        }
    }
}
