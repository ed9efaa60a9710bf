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

//! The capacity-bounded container the robot carries mail in.
//!
//! The sorter writes into any `TransportBuffer`; `StorageTube` is the
//! reference implementation the robot drains when it departs.

use crate::{mail::MailItem, num::MailNumeric};

/// Error returned when an item does not fit into the tube.
///
/// The rejected item travels back to the caller inside the error so that it
/// can be returned to the pool instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("storage tube is full: item of size {} does not fit into {remaining} remaining units of {capacity}", .item.size())]
pub struct TubeFullError<T>
where
    T: MailNumeric,
{
    /// The item that was rejected.
    pub item: MailItem<T>,
    /// Free capacity at the time of the insertion.
    pub remaining: usize,
    /// Total capacity of the tube.
    pub capacity: usize,
}

impl<T> TubeFullError<T>
where
    T: MailNumeric,
{
    /// Consumes the error and returns the rejected item.
    #[inline]
    pub fn into_item(self) -> MailItem<T> {
        self.item
    }
}

/// A capacity-bounded transport buffer.
pub trait TransportBuffer<T>
where
    T: MailNumeric,
{
    /// Returns the maximum total size the buffer can hold.
    fn capacity(&self) -> usize;

    /// Returns the total size of the items currently held.
    fn total_occupied_size(&self) -> usize;

    /// Inserts `item`, or hands it back if it would exceed the capacity.
    fn add_item(&mut self, item: MailItem<T>) -> Result<(), TubeFullError<T>>;

    /// Returns the capacity still available.
    #[inline]
    fn remaining_capacity(&self) -> usize {
        self.capacity().saturating_sub(self.total_occupied_size())
    }

    /// Returns `true` if no further capacity is available.
    #[inline]
    fn is_full(&self) -> bool {
        self.total_occupied_size() >= self.capacity()
    }

    /// Returns `true` if the buffer holds nothing.
    #[inline]
    fn is_empty(&self) -> bool {
        self.total_occupied_size() == 0
    }
}

/// The robot's storage tube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageTube<T> {
    items: Vec<MailItem<T>>,
    occupied: usize,
    capacity: usize,
}

impl<T> StorageTube<T>
where
    T: MailNumeric,
{
    /// The tube capacity used by the mailroom robot.
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Creates an empty tube with the given capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            occupied: 0,
            capacity,
        }
    }

    /// Returns the number of items in the tube.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the items in insertion order.
    #[inline]
    pub fn items(&self) -> &[MailItem<T>] {
        &self.items
    }

    /// Removes and returns every item, leaving the tube empty.
    #[inline]
    pub fn drain_items(&mut self) -> Vec<MailItem<T>> {
        self.occupied = 0;
        std::mem::take(&mut self.items)
    }
}

impl<T> Default for StorageTube<T>
where
    T: MailNumeric,
{
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl<T> TransportBuffer<T> for StorageTube<T>
where
    T: MailNumeric,
{
    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn total_occupied_size(&self) -> usize {
        self.occupied
    }

    fn add_item(&mut self, item: MailItem<T>) -> Result<(), TubeFullError<T>> {
        let remaining = self.remaining_capacity();
        if item.size() > remaining {
            return Err(TubeFullError {
                item,
                remaining,
                capacity: self.capacity,
            });
        }

        self.occupied += item.size();
        self.items.push(item);
        Ok(())
    }
}

impl<T> std::fmt::Display for StorageTube<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StorageTube(items: {}, occupied: {}/{})",
            self.items.len(),
            self.occupied,
            self.capacity
        )
    }
}
