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

use mailroom_model::{mail::MailItem, num::MailNumeric};

/// The items selected for one delivery trip, in ascending floor order.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch<T> {
    items: Vec<MailItem<T>>,
    total_size: usize,
    efficiency: Option<f64>,
}

impl<T> Batch<T>
where
    T: MailNumeric,
{
    /// Creates an empty batch.
    #[inline]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_size: 0,
            efficiency: None,
        }
    }

    /// Creates a batch from floor-sorted items and their efficiency.
    #[inline]
    pub(crate) fn new(items: Vec<MailItem<T>>, efficiency: f64) -> Self {
        debug_assert!(
            items
                .windows(2)
                .all(|w| w[0].destination_floor() <= w[1].destination_floor()),
            "called `Batch::new` with items out of floor order"
        );

        let total_size = items.iter().map(MailItem::size).sum();
        Self {
            items,
            total_size,
            efficiency: Some(efficiency),
        }
    }

    /// Returns the items in floor order.
    #[inline]
    pub fn items(&self) -> &[MailItem<T>] {
        &self.items
    }

    /// Consumes the batch and returns its items in floor order.
    #[inline]
    pub fn into_items(self) -> Vec<MailItem<T>> {
        self.items
    }

    /// Returns the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the summed size of the items.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Returns the efficiency the batch was selected with; `None` when empty.
    #[inline]
    pub fn efficiency(&self) -> Option<f64> {
        self.efficiency
    }

    /// Returns an iterator over the items.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, MailItem<T>> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Batch<T> {
    type Item = MailItem<T>;
    type IntoIter = std::vec::IntoIter<MailItem<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Batch<T> {
    type Item = &'a MailItem<T>;
    type IntoIter = std::slice::Iter<'a, MailItem<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> std::fmt::Display for Batch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.efficiency {
            Some(e) => write!(
                f,
                "Batch(items: {}, size: {}, efficiency: {:.4})",
                self.items.len(),
                self.total_size,
                e
            ),
            None => write!(f, "Batch(empty)"),
        }
    }
}
