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

//! Tube refill orchestration.
//!
//! `MailSorter` owns the pending mail and a `BatchSelector`. Each call to
//! `fill_buffer` moves selected batches into the robot's transport buffer
//! and answers whether the robot should leave now.
//!
//! Dispatch readiness
//! - `true` as soon as any batch was loaded in this call.
//! - `true` if the buffer rejected an item; the item and the rest of its
//!   batch go back into the pool.
//! - `true` if nothing was loaded, the day's last delivery time has passed
//!   and the buffer already holds mail.
//! - `false` otherwise: the robot should wait for better mail.
//!
//! All batches loaded into one tube travel in the same direction. The
//! direction is taken from the first directional batch and kept until the
//! tube is seen empty again.

use mailroom_batch::{
    batch::Batch,
    config::{ConfigError, SelectorConfig},
    monitor::{no_op::NoOperationMonitor, selection_monitor::SelectionMonitor},
    pool::MailPool,
    selector::{BatchSelector, SelectionRequest},
};
use mailroom_model::{
    building::{Building, BuildingError, FloorSide},
    clock::Clock,
    mail::MailItem,
    num::MailNumeric,
    tube::TransportBuffer,
};
use rand::{Rng, rngs::StdRng};

/// Fills the robot's tube from the pending mail.
#[derive(Debug, Clone)]
pub struct MailSorter<T, R = StdRng>
where
    T: MailNumeric,
{
    building: Building<T>,
    pool: MailPool<T>,
    selector: BatchSelector<R>,
    direction: Option<FloorSide>,
}

impl<T> MailSorter<T, StdRng>
where
    T: MailNumeric,
{
    /// Creates a sorter whose selector is seeded from operating system entropy.
    pub fn new(building: Building<T>, config: SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_selector(building, BatchSelector::new(config)?))
    }

    /// Creates a sorter whose selections are reproducible from `seed`.
    pub fn with_seed(building: Building<T>, config: SelectorConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::with_selector(building, BatchSelector::with_seed(config, seed)?))
    }
}

impl<T, R> MailSorter<T, R>
where
    T: MailNumeric,
    R: Rng,
{
    /// Creates a sorter around an existing selector.
    pub fn with_selector(building: Building<T>, selector: BatchSelector<R>) -> Self {
        Self {
            building,
            pool: MailPool::new(),
            selector,
            direction: None,
        }
    }

    /// Adds a pending item.
    ///
    /// The caller must only hand over items that fit into an empty buffer;
    /// larger items are never selected.
    #[inline]
    pub fn add_to_pool(&mut self, item: MailItem<T>) {
        self.pool.add_to_pool(item);
    }

    /// Adds a pending item after checking that its destination exists.
    ///
    /// # Errors
    ///
    /// Returns `BuildingError::FloorOutOfRange` and drops nothing into the
    /// pool if the destination floor is not part of the building.
    pub fn try_add_to_pool(&mut self, item: MailItem<T>) -> Result<(), BuildingError<T>> {
        self.building.validate_item(&item)?;
        self.pool.add_to_pool(item);
        Ok(())
    }

    #[inline]
    pub fn pool(&self) -> &MailPool<T> {
        &self.pool
    }

    #[inline]
    pub fn building(&self) -> &Building<T> {
        &self.building
    }

    #[inline]
    pub fn selector(&self) -> &BatchSelector<R> {
        &self.selector
    }

    /// The direction the current tube is locked to, if any.
    #[inline]
    pub fn direction(&self) -> Option<FloorSide> {
        self.direction
    }

    /// Moves selected batches into `tube` and returns whether the robot
    /// should depart.
    pub fn fill_buffer<B, C>(&mut self, tube: &mut B, clock: &C) -> bool
    where
        B: TransportBuffer<T>,
        C: Clock<T>,
    {
        let mut monitor = NoOperationMonitor::new();
        self.fill_buffer_monitored(tube, clock, &mut monitor)
    }

    /// Like `fill_buffer`, reporting every selection to `monitor`.
    pub fn fill_buffer_monitored<B, C, M>(&mut self, tube: &mut B, clock: &C, monitor: &mut M) -> bool
    where
        B: TransportBuffer<T>,
        C: Clock<T>,
        M: SelectionMonitor<T>,
    {
        if tube.is_empty() {
            self.direction = None;
        }

        let now = clock.now();
        let mut loaded = 0usize;

        while !self.pool.is_empty() && !tube.is_full() {
            let mut request = SelectionRequest::new(tube.remaining_capacity(), now);
            if let Some(direction) = self.direction {
                request = request.with_direction(direction);
            }

            let outcome = self
                .selector
                .select(&mut self.pool, &self.building, request, monitor);
            tracing::debug!(
                termination = %outcome.termination(),
                items = outcome.batch().len(),
                efficiency = ?outcome.batch().efficiency(),
                "selection finished"
            );

            let batch = outcome.into_batch();
            if batch.is_empty() {
                break;
            }
            if self.direction.is_none() {
                self.direction = self.side_of_batch(&batch);
            }

            let count = batch.len();
            if !self.load(batch, tube) {
                tracing::warn!(
                    occupied = tube.total_occupied_size(),
                    capacity = tube.capacity(),
                    pending = self.pool.len(),
                    "transport buffer rejected an item, dispatching"
                );
                return true;
            }
            loaded += count;
        }

        if loaded > 0 {
            tracing::info!(
                loaded,
                occupied = tube.total_occupied_size(),
                capacity = tube.capacity(),
                pending = self.pool.len(),
                "tube filled, ready to dispatch"
            );
            return true;
        }

        if clock.is_past_last_delivery() && !tube.is_empty() {
            tracing::info!(
                now = %now,
                last_delivery_time = %clock.last_delivery_time(),
                occupied = tube.total_occupied_size(),
                "last delivery time passed, dispatching partial tube"
            );
            return true;
        }

        tracing::debug!(pending = self.pool.len(), "no batch loaded, waiting");
        false
    }

    /// Inserts every item of `batch`. On rejection the rejected item and
    /// everything after it go back into the pool and `false` is returned.
    fn load<B>(&mut self, batch: Batch<T>, tube: &mut B) -> bool
    where
        B: TransportBuffer<T>,
    {
        let mut items = batch.into_iter();
        while let Some(item) = items.next() {
            if let Err(err) = tube.add_item(item) {
                self.pool.add_to_pool(err.into_item());
                self.pool.extend(items);
                return false;
            }
        }
        true
    }

    fn side_of_batch(&self, batch: &Batch<T>) -> Option<FloorSide> {
        batch
            .iter()
            .map(|item| self.building.side_of(item.destination_floor()))
            .find(|side| side.is_directional())
    }
}

impl<T, R> std::fmt::Display for MailSorter<T, R>
where
    T: MailNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Some(d) => write!(f, "MailSorter(pending: {}, direction: {})", self.pool.len(), d),
            None => write!(f, "MailSorter(pending: {})", self.pool.len()),
        }
    }
}
