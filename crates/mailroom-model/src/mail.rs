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

//! Mail items as produced by the mail generator.
//!
//! A `MailItem` is immutable once created. The selection engine reads its
//! destination, size, priority and arrival tick; it never mutates or clones
//! the identity of an item, it only moves it from the pool into a batch.

use crate::{index::MailId, num::MailNumeric};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The urgency class of a mail item.
///
/// Levels are totally ordered, `Low < Medium < High`. The numeric weight used
/// during scoring is not fixed here; it is a configuration concern of the
/// scoring model.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    /// All levels in ascending order.
    pub const ALL: [PriorityLevel; 3] = [PriorityLevel::Low, PriorityLevel::Medium, PriorityLevel::High];

    /// Returns the 1-based rank of the level (`Low = 1`, `High = 3`).
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            PriorityLevel::Low => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::High => 3,
        }
    }

    /// Returns the canonical upper-case label.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Low => "LOW",
            PriorityLevel::Medium => "MEDIUM",
            PriorityLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority level '{0}', expected one of LOW, MEDIUM, HIGH")]
pub struct ParsePriorityError(pub String);

impl FromStr for PriorityLevel {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriorityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

/// The error type for mail item construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailItemError {
    /// Every item occupies at least one unit of tube capacity.
    #[error("mail item {0} has size zero; sizes must be at least 1")]
    ZeroSize(MailId),
}

/// A single piece of mail waiting to be delivered.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MailItem<T> {
    id: MailId,
    destination_floor: T,
    size: usize,
    priority: PriorityLevel,
    arrival_time: T,
}

impl<T> MailItem<T>
where
    T: MailNumeric,
{
    /// Creates a new mail item.
    ///
    /// # Errors
    ///
    /// Returns `MailItemError::ZeroSize` if `size` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mailroom_model::{index::MailId, mail::{MailItem, PriorityLevel}};
    ///
    /// let item = MailItem::new(MailId::new(1), 5i64, 2, PriorityLevel::High, 10).unwrap();
    /// assert_eq!(item.destination_floor(), 5);
    /// assert_eq!(item.size(), 2);
    /// ```
    pub fn new(
        id: MailId,
        destination_floor: T,
        size: usize,
        priority: PriorityLevel,
        arrival_time: T,
    ) -> Result<Self, MailItemError> {
        if size == 0 {
            return Err(MailItemError::ZeroSize(id));
        }

        Ok(Self {
            id,
            destination_floor,
            size,
            priority,
            arrival_time,
        })
    }

    /// Returns the identifier of the item.
    #[inline]
    pub fn id(&self) -> MailId {
        self.id
    }

    /// Returns the destination floor of the item.
    #[inline]
    pub fn destination_floor(&self) -> T {
        self.destination_floor
    }

    /// Returns the amount of tube capacity the item consumes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the priority level of the item.
    #[inline]
    pub fn priority(&self) -> PriorityLevel {
        self.priority
    }

    /// Returns the tick at which the item arrived in the mailroom.
    #[inline]
    pub fn arrival_time(&self) -> T {
        self.arrival_time
    }
}

impl<T> std::fmt::Display for MailItem<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MailItem(id: {}, floor: {}, size: {}, priority: {}, arrival: {})",
            self.id.get(),
            self.destination_floor,
            self.size,
            self.priority,
            self.arrival_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering_and_rank() {
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
        assert!(PriorityLevel::Medium < PriorityLevel::High);
        assert_eq!(PriorityLevel::Low.rank(), 1);
        assert_eq!(PriorityLevel::High.rank(), 3);
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("high".parse::<PriorityLevel>(), Ok(PriorityLevel::High));
        assert_eq!(" Medium ".parse::<PriorityLevel>(), Ok(PriorityLevel::Medium));
        assert_eq!("LOW".parse::<PriorityLevel>(), Ok(PriorityLevel::Low));

        let err = "urgent".parse::<PriorityLevel>().unwrap_err();
        assert_eq!(err, ParsePriorityError("urgent".to_string()));
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn test_priority_serde_uses_upper_case_labels() {
        let json = serde_json::to_string(&PriorityLevel::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
        let back: PriorityLevel = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(back, PriorityLevel::High);
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let err = MailItem::new(MailId::new(9), 3i32, 0, PriorityLevel::Low, 0).unwrap_err();
        assert_eq!(err, MailItemError::ZeroSize(MailId::new(9)));
    }

    #[test]
    fn test_accessors_and_display() {
        let item = MailItem::new(MailId::new(4), -2i64, 3, PriorityLevel::Medium, 17).unwrap();
        assert_eq!(item.id(), MailId::new(4));
        assert_eq!(item.destination_floor(), -2);
        assert_eq!(item.size(), 3);
        assert_eq!(item.priority(), PriorityLevel::Medium);
        assert_eq!(item.arrival_time(), 17);

        let s = format!("{}", item);
        assert!(s.contains("floor: -2"));
        assert!(s.contains("MEDIUM"));
    }

    #[test]
    fn test_value_equal_items_compare_equal() {
        let a = MailItem::new(MailId::new(1), 1i32, 1, PriorityLevel::Low, 0).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
    }
}
