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

//! The pool of mail items waiting for a delivery trip.
//!
//! Items enter through `add_to_pool` and leave only when the batch selector
//! takes them. The pool has no ordering of its own; an item's identity for
//! the duration of a selection is its position in the pool, so value-equal
//! duplicates stay distinct and each selected position is removed exactly
//! once.

use fixedbitset::FixedBitSet;
use mailroom_model::{mail::MailItem, num::MailNumeric};

/// Pending mail items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailPool<T> {
    items: Vec<MailItem<T>>,
}

impl<T> Default for MailPool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> MailPool<T>
where
    T: MailNumeric,
{
    /// Creates an empty pool.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool with room for `capacity` items.
    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Adds an item to the pool.
    ///
    /// The caller guarantees that the item fits into the carrier, i.e. its
    /// size does not exceed the tube capacity; the selector never proposes an
    /// item that does not fit, so an oversized item would wait forever.
    #[inline]
    pub fn add_to_pool(&mut self, item: MailItem<T>) {
        self.items.push(item);
    }

    /// Returns `true` if no item is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of pending items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the item at `position`, if any.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&MailItem<T>> {
        self.items.get(position)
    }

    /// Returns the item at `position` without bounds checking.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `position` is not within `0..len()`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `position` is within `0..len()`.
    #[inline(always)]
    pub(crate) unsafe fn get_unchecked(&self, position: usize) -> &MailItem<T> {
        debug_assert!(
            position < self.items.len(),
            "called `MailPool::get_unchecked` with position out of bounds: the len is {} but the position is {}",
            self.items.len(),
            position
        );

        unsafe { self.items.get_unchecked(position) }
    }

    /// Returns an iterator over the pending items.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, MailItem<T>> {
        self.items.iter()
    }

    /// Removes the items at `positions` and returns them in the order given.
    ///
    /// Positions are identities: a position listed twice is removed once, and
    /// positions outside the pool are ignored. The remaining items keep their
    /// relative order.
    pub(crate) fn take_positions(&mut self, positions: &[usize]) -> Vec<MailItem<T>> {
        let len = self.items.len();
        let mut selected = FixedBitSet::with_capacity(len);
        let mut num_selected = 0;
        for &position in positions {
            if position < len && !selected.put(position) {
                num_selected += 1;
            }
        }

        if num_selected == 0 {
            return Vec::new();
        }

        let mut taken: Vec<Option<MailItem<T>>> = positions.iter().map(|_| None).collect();
        let old = std::mem::take(&mut self.items);
        self.items.reserve(len - num_selected);

        for (position, item) in old.into_iter().enumerate() {
            if selected.contains(position) {
                let slot = positions
                    .iter()
                    .position(|&p| p == position)
                    .expect("selected position must be listed");
                taken[slot] = Some(item);
            } else {
                self.items.push(item);
            }
        }

        taken.into_iter().flatten().collect()
    }
}

impl<T> Extend<MailItem<T>> for MailPool<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = MailItem<T>>,
    {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<MailItem<T>> for MailPool<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = MailItem<T>>,
    {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> std::fmt::Display for MailPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MailPool(items: {})", self.items.len())
    }
}
