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

//! Candidate batches under construction.
//!
//! A `CandidateBatch` refers to pool items by position and keeps those
//! positions sorted by destination floor (ties broken by position), which
//! is the order the scoring model walks. It caches its total size, the
//! side of the mailroom its directional items lie on, and its efficiency,
//! so the search never re-scores a candidate it has already built.

use crate::{pool::MailPool, score::ScoringModel};
use mailroom_model::{
    building::{Building, FloorSide},
    mail::MailItem,
    num::MailNumeric,
};
use smallvec::SmallVec;

/// Pool positions of a candidate. Batches rarely exceed a handful of items.
pub type CandidatePositions = SmallVec<[usize; 8]>;

/// A floor-sorted selection of pool positions.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateBatch {
    positions: CandidatePositions,
    total_size: usize,
    side: FloorSide,
    efficiency: f64,
}

impl CandidateBatch {
    /// Creates a single-item candidate.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `position` is not within `0..pool.len()`.
    pub(crate) fn singleton<T>(
        pool: &MailPool<T>,
        building: &Building<T>,
        scoring: &ScoringModel,
        position: usize,
        now: T,
    ) -> Self
    where
        T: MailNumeric,
    {
        let item = unsafe { pool.get_unchecked(position) };
        let mut positions = CandidatePositions::new();
        positions.push(position);

        let mut candidate = Self {
            positions,
            total_size: item.size(),
            side: building.side_of(item.destination_floor()),
            efficiency: 0.0,
        };
        candidate.efficiency = candidate.score(pool, building, scoring, now);
        candidate
    }

    /// Returns a copy of this candidate extended by the item at `position`.
    ///
    /// The caller is responsible for the direction and capacity checks; this
    /// only builds and scores the extension.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `position` is not within
    /// `0..pool.len()` or is already part of the candidate.
    pub(crate) fn extended<T>(
        &self,
        pool: &MailPool<T>,
        building: &Building<T>,
        scoring: &ScoringModel,
        position: usize,
        now: T,
    ) -> Self
    where
        T: MailNumeric,
    {
        debug_assert!(
            !self.contains(position),
            "called `CandidateBatch::extended` with position {} already in the candidate",
            position
        );

        let item = unsafe { pool.get_unchecked(position) };
        let key = (item.destination_floor(), position);
        let insert_at = self.positions.partition_point(|&p| {
            let floor = unsafe { pool.get_unchecked(p) }.destination_floor();
            (floor, p) < key
        });

        let mut positions = self.positions.clone();
        positions.insert(insert_at, position);

        let item_side = building.side_of(item.destination_floor());
        let side = if self.side.is_directional() {
            self.side
        } else {
            item_side
        };

        let mut candidate = Self {
            positions,
            total_size: self.total_size + item.size(),
            side,
            efficiency: 0.0,
        };
        candidate.efficiency = candidate.score(pool, building, scoring, now);
        candidate
    }

    #[inline]
    fn score<T>(&self, pool: &MailPool<T>, building: &Building<T>, scoring: &ScoringModel, now: T) -> f64
    where
        T: MailNumeric,
    {
        // Candidates are never empty, so the efficiency is always defined.
        scoring
            .efficiency(self.items(pool), now, building.mailroom_floor())
            .unwrap_or(0.0)
    }

    /// Returns the pool positions in floor order.
    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Returns the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the candidate holds no item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns `true` if the item at `position` is part of the candidate.
    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Returns the summed size of the items.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Returns the side of the mailroom the candidate travels to.
    ///
    /// `FloorSide::Mailroom` means every item is addressed to the mailroom
    /// floor itself and the candidate may still grow in either direction.
    #[inline]
    pub fn side(&self) -> FloorSide {
        self.side
    }

    /// Returns the cached efficiency.
    #[inline]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Returns the items of the candidate in floor order.
    #[inline]
    pub fn items<'a, T>(&'a self, pool: &'a MailPool<T>) -> CandidateItems<'a, T>
    where
        T: MailNumeric,
    {
        CandidateItems {
            positions: self.positions.iter(),
            pool,
        }
    }
}

impl std::fmt::Display for CandidateBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CandidateBatch(positions: {:?}, size: {}, side: {}, efficiency: {:.4})",
            self.positions.as_slice(),
            self.total_size,
            self.side,
            self.efficiency
        )
    }
}

/// Iterator over the items of a candidate, in floor order.
#[derive(Clone, Debug)]
pub struct CandidateItems<'a, T> {
    positions: std::slice::Iter<'a, usize>,
    pool: &'a MailPool<T>,
}

impl<'a, T> Iterator for CandidateItems<'a, T>
where
    T: MailNumeric,
{
    type Item = &'a MailItem<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let position = *self.positions.next()?;
        self.pool.get(position)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}
