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

use crate::candidate::CandidateBatch;

/// The LIFO work stack of candidates still to be expanded.
///
/// Popping always yields the most recently pushed extension, so the search
/// runs depth-first: a seed is grown to a leaf before its siblings are
/// looked at, which keeps the stack small.
///
/// Performance notes:
/// - `preallocated` sizes the stack for the seeds plus one full expansion
///   per depth level, which covers the common case without reallocating.
/// - `reset()` clears entries but keeps the allocation for the next selection.
#[derive(Clone, Debug, Default)]
pub struct CandidateStack {
    entries: Vec<CandidateBatch>,
}

impl CandidateStack {
    /// Creates a new, empty `CandidateStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a preallocated `CandidateStack` for the given search bounds.
    #[inline]
    pub fn preallocated(max_branches: usize, max_depth: usize) -> Self {
        Self {
            entries: Vec::with_capacity(Self::capacity_for(max_branches, max_depth)),
        }
    }

    #[inline(always)]
    fn capacity_for(max_branches: usize, max_depth: usize) -> usize {
        max_branches.saturating_mul(max_depth.saturating_add(1))
    }

    /// Ensures the stack has capacity for the given search bounds.
    #[inline]
    pub fn ensure_capacity(&mut self, max_branches: usize, max_depth: usize) {
        let wanted = Self::capacity_for(max_branches, max_depth);
        if self.entries.capacity() < wanted {
            self.entries.reserve(wanted - self.entries.len());
        }
    }

    /// Returns the number of pending candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no candidate is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes a candidate.
    #[inline]
    pub fn push(&mut self, candidate: CandidateBatch) {
        self.entries.push(candidate);
    }

    /// Pops the most recently pushed candidate.
    #[inline]
    pub fn pop(&mut self) -> Option<CandidateBatch> {
        self.entries.pop()
    }

    /// Clears all entries but keeps allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Returns the total allocated memory in bytes.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<CandidateBatch>()
    }
}

impl std::fmt::Display for CandidateStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CandidateStack(entries: {})", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pool::MailPool, score::ScoringModel};
    use mailroom_model::{
        building::Building,
        index::MailId,
        mail::{MailItem, PriorityLevel},
    };

    fn candidates(n: usize) -> Vec<CandidateBatch> {
        let pool: MailPool<i64> = (0..n)
            .map(|i| MailItem::new(MailId::new(i as u64), i as i64 + 1, 1, PriorityLevel::Low, 0).unwrap())
            .collect();
        let building = Building::new(0, 20, 0).unwrap();
        let scoring = ScoringModel::default();
        (0..n)
            .map(|p| CandidateBatch::singleton(&pool, &building, &scoring, p, 5))
            .collect()
    }

    #[test]
    fn test_new_and_preallocated_basic_props() {
        let s = CandidateStack::new();
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert_eq!(format!("{}", s), "CandidateStack(entries: 0)");

        let s2 = CandidateStack::preallocated(17, 4);
        assert!(s2.is_empty());
        assert!(s2.allocated_memory_bytes() >= 17 * 5 * std::mem::size_of::<CandidateBatch>());
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let cs = candidates(3);
        let mut s = CandidateStack::new();
        for c in &cs {
            s.push(c.clone());
        }
        assert_eq!(s.len(), 3);

        assert_eq!(s.pop().unwrap().positions(), &[2]);
        assert_eq!(s.pop().unwrap().positions(), &[1]);
        assert_eq!(s.pop().unwrap().positions(), &[0]);
        assert!(s.pop().is_none());
    }

    #[test]
    fn test_ensure_capacity_grows_and_reset_keeps_it() {
        let mut s = CandidateStack::new();
        s.ensure_capacity(4, 3);
        let bytes = s.allocated_memory_bytes();
        assert!(bytes >= 16 * std::mem::size_of::<CandidateBatch>());

        // Smaller request is a no-op.
        s.ensure_capacity(1, 1);
        assert_eq!(s.allocated_memory_bytes(), bytes);

        for c in candidates(2) {
            s.push(c);
        }
        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.allocated_memory_bytes(), bytes);
    }
}
