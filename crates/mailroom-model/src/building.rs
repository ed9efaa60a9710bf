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

//! Building geometry as seen by the batch selector.
//!
//! The selector only needs three facts about the building: which floors
//! exist, where the mailroom is, and on which side of the mailroom a
//! destination lies. The last one drives the one-direction-of-travel rule:
//! a batch never mixes destinations above and below the mailroom.

use crate::{mail::MailItem, num::MailNumeric};

/// The error type for building construction and item validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildingError<T>
where
    T: std::fmt::Display + std::fmt::Debug,
{
    /// The lowest floor lies above the highest floor.
    #[error("lowest floor {lowest} lies above highest floor {highest}")]
    InvertedFloorRange { lowest: T, highest: T },
    /// The mailroom is not inside the floor range.
    #[error("mailroom floor {mailroom} lies outside the floor range [{lowest}, {highest}]")]
    MailroomOutOfRange { mailroom: T, lowest: T, highest: T },
    /// A destination floor is not inside the floor range.
    #[error("floor {floor} lies outside the floor range [{lowest}, {highest}]")]
    FloorOutOfRange { floor: T, lowest: T, highest: T },
}

/// The side of the mailroom a floor lies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FloorSide {
    /// Strictly below the mailroom.
    Below,
    /// The mailroom floor itself.
    Mailroom,
    /// Strictly above the mailroom.
    Above,
}

impl FloorSide {
    /// Returns `true` if destinations on `self` and `other` can share one trip
    /// without passing through the mailroom.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mailroom_model::building::FloorSide;
    ///
    /// assert!(FloorSide::Above.is_compatible(FloorSide::Mailroom));
    /// assert!(!FloorSide::Above.is_compatible(FloorSide::Below));
    /// ```
    #[inline]
    pub fn is_compatible(self, other: FloorSide) -> bool {
        self == other || self == FloorSide::Mailroom || other == FloorSide::Mailroom
    }

    /// Returns `true` if the side lies away from the mailroom.
    #[inline]
    pub fn is_directional(self) -> bool {
        self != FloorSide::Mailroom
    }
}

impl std::fmt::Display for FloorSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloorSide::Below => write!(f, "Below"),
            FloorSide::Mailroom => write!(f, "Mailroom"),
            FloorSide::Above => write!(f, "Above"),
        }
    }
}

/// The floors of the building and the location of the mailroom.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Building<T> {
    lowest_floor: T,
    highest_floor: T,
    mailroom_floor: T,
}

impl<T> Building<T>
where
    T: MailNumeric,
{
    /// Creates a new building spanning `[lowest_floor, highest_floor]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is inverted or the mailroom lies outside it.
    pub fn new(lowest_floor: T, highest_floor: T, mailroom_floor: T) -> Result<Self, BuildingError<T>> {
        if lowest_floor > highest_floor {
            return Err(BuildingError::InvertedFloorRange {
                lowest: lowest_floor,
                highest: highest_floor,
            });
        }

        if mailroom_floor < lowest_floor || mailroom_floor > highest_floor {
            return Err(BuildingError::MailroomOutOfRange {
                mailroom: mailroom_floor,
                lowest: lowest_floor,
                highest: highest_floor,
            });
        }

        Ok(Self {
            lowest_floor,
            highest_floor,
            mailroom_floor,
        })
    }

    /// Returns the lowest floor.
    #[inline]
    pub fn lowest_floor(&self) -> T {
        self.lowest_floor
    }

    /// Returns the highest floor.
    #[inline]
    pub fn highest_floor(&self) -> T {
        self.highest_floor
    }

    /// Returns the floor of the mailroom.
    #[inline]
    pub fn mailroom_floor(&self) -> T {
        self.mailroom_floor
    }

    /// Returns the number of floors in the building.
    #[inline]
    pub fn num_floors(&self) -> u64 {
        self.highest_floor
            .abs_diff_u64(self.lowest_floor)
            .saturating_add(1)
    }

    /// Returns `true` if `floor` exists in this building.
    #[inline]
    pub fn contains(&self, floor: T) -> bool {
        floor >= self.lowest_floor && floor <= self.highest_floor
    }

    /// Returns the side of the mailroom `floor` lies on.
    #[inline]
    pub fn side_of(&self, floor: T) -> FloorSide {
        match floor.cmp(&self.mailroom_floor) {
            std::cmp::Ordering::Less => FloorSide::Below,
            std::cmp::Ordering::Equal => FloorSide::Mailroom,
            std::cmp::Ordering::Greater => FloorSide::Above,
        }
    }

    /// Returns the number of floors between `a` and `b`.
    #[inline]
    pub fn distance(a: T, b: T) -> u64 {
        a.abs_diff_u64(b)
    }

    /// Checks that the item's destination exists in this building.
    ///
    /// # Errors
    ///
    /// Returns `BuildingError::FloorOutOfRange` if it does not.
    pub fn validate_item(&self, item: &MailItem<T>) -> Result<(), BuildingError<T>> {
        let floor = item.destination_floor();
        if !self.contains(floor) {
            return Err(BuildingError::FloorOutOfRange {
                floor,
                lowest: self.lowest_floor,
                highest: self.highest_floor,
            });
        }
        Ok(())
    }
}

impl<T> std::fmt::Display for Building<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Building(floors: [{}, {}], mailroom: {})",
            self.lowest_floor, self.highest_floor, self.mailroom_floor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{index::MailId, mail::PriorityLevel};

    #[test]
    fn test_new_validates_ranges() {
        assert_eq!(
            Building::new(5i32, 1, 3),
            Err(BuildingError::InvertedFloorRange {
                lowest: 5,
                highest: 1
            })
        );
        assert_eq!(
            Building::new(-2i32, 4, 7),
            Err(BuildingError::MailroomOutOfRange {
                mailroom: 7,
                lowest: -2,
                highest: 4
            })
        );

        let b = Building::new(-2i32, 4, 0).unwrap();
        assert_eq!(b.lowest_floor(), -2);
        assert_eq!(b.highest_floor(), 4);
        assert_eq!(b.mailroom_floor(), 0);
        assert_eq!(b.num_floors(), 7);
    }

    #[test]
    fn test_side_of_and_compatibility() {
        let b = Building::new(-3i64, 10, 1).unwrap();
        assert_eq!(b.side_of(-1), FloorSide::Below);
        assert_eq!(b.side_of(1), FloorSide::Mailroom);
        assert_eq!(b.side_of(8), FloorSide::Above);

        assert!(FloorSide::Below.is_compatible(FloorSide::Below));
        assert!(FloorSide::Mailroom.is_compatible(FloorSide::Below));
        assert!(FloorSide::Mailroom.is_compatible(FloorSide::Above));
        assert!(!FloorSide::Below.is_compatible(FloorSide::Above));
        assert!(!FloorSide::Mailroom.is_directional());
    }

    #[test]
    fn test_distance_is_symmetric() {
        assert_eq!(Building::distance(-3i32, 4), 7);
        assert_eq!(Building::distance(4i32, -3), 7);
        assert_eq!(Building::distance(2i32, 2), 0);
    }

    #[test]
    fn test_full_i8_range_does_not_overflow() {
        let b = Building::new(i8::MIN, i8::MAX, 0).unwrap();
        assert_eq!(b.num_floors(), 256);
        assert_eq!(Building::distance(i8::MIN, i8::MAX), 255);
        assert!(b.contains(i8::MAX));
        assert_eq!(b.side_of(i8::MIN), FloorSide::Below);
    }

    #[test]
    fn test_validate_item_rejects_unknown_floor() {
        let b = Building::new(0i32, 5, 0).unwrap();
        let ok = MailItem::new(MailId::new(1), 5, 1, PriorityLevel::Low, 0).unwrap();
        let bad = MailItem::new(MailId::new(2), 6, 1, PriorityLevel::Low, 0).unwrap();

        assert!(b.validate_item(&ok).is_ok());
        let err = b.validate_item(&bad).unwrap_err();
        assert_eq!(
            err,
            BuildingError::FloorOutOfRange {
                floor: 6,
                lowest: 0,
                highest: 5
            }
        );
        assert!(err.to_string().contains("floor 6"));
    }
}
