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

//! Scoring model for candidate batches.
//!
//! A batch is scored by simulating its delivery: starting at the mailroom at
//! `now`, the robot visits the destinations in floor order, one tick per floor
//! travelled and one tick per unload. Each item contributes its waiting time
//! at the moment of delivery, raised to the penalty exponent and scaled by
//! its priority weight. Dividing that cost by the number of ticks the trip
//! takes yields the *efficiency*, the quantity the selector maximises.
//!
//! All functions expect the items in ascending floor order, which is the
//! order `CandidateBatch` maintains. The model is pure; it holds only its
//! coefficients.

use crate::config::ScoringWeights;
use mailroom_model::{mail::MailItem, num::MailNumeric};

/// Evaluates candidate batches against the simulated clock.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScoringModel {
    weights: ScoringWeights,
}

impl ScoringModel {
    /// Creates a scoring model with the given coefficients.
    #[inline]
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Returns the coefficients of the model.
    #[inline]
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Returns the accumulated waiting penalty of delivering `batch` in order.
    ///
    /// The waiting time of an item is clamped at zero, so an item whose
    /// arrival lies ahead of the simulated clock contributes nothing.
    pub fn simulated_delivery_cost<'a, T, I>(&self, batch: I, now: T, mailroom_floor: T) -> f64
    where
        T: MailNumeric + 'a,
        I: IntoIterator<Item = &'a MailItem<T>>,
    {
        let exponent = self.weights.penalty_exponent;
        let mut clock = now.as_f64();
        let mut position = mailroom_floor.as_f64();
        let mut cost = 0.0;

        for item in batch {
            let floor = item.destination_floor().as_f64();
            clock += (floor - position).abs();

            let waited = (clock - item.arrival_time().as_f64()).max(0.0);
            cost += waited.powf(exponent) * self.weights.weight(item.priority());

            // Unloading takes one tick.
            clock += 1.0;
            position = floor;
        }

        if self.weights.include_return_trip {
            cost += (position - mailroom_floor.as_f64()).abs();
        }

        cost
    }

    /// Returns the number of ticks the trip consumes: one per item plus a
    /// round trip to the farthest floor on each side of the mailroom.
    ///
    /// An empty batch takes zero steps.
    pub fn steps<'a, T, I>(&self, batch: I, mailroom_floor: T) -> u64
    where
        T: MailNumeric + 'a,
        I: IntoIterator<Item = &'a MailItem<T>>,
    {
        let mut count: u64 = 0;
        let mut above: u64 = 0;
        let mut below: u64 = 0;

        for item in batch {
            count = count.saturating_add(1);
            let floor = item.destination_floor();
            let offset = floor.abs_diff_u64(mailroom_floor);
            if floor > mailroom_floor {
                above = above.max(offset);
            } else if floor < mailroom_floor {
                below = below.max(offset);
            }
        }

        let reach = above.saturating_add(below);
        count.saturating_add(reach.saturating_mul(2))
    }

    /// Returns the delivery cost per step, or `None` for an empty batch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mailroom_batch::score::ScoringModel;
    /// # use mailroom_model::{index::MailId, mail::{MailItem, PriorityLevel}};
    ///
    /// let model = ScoringModel::default();
    /// let item = MailItem::new(MailId::new(1), 1i64, 1, PriorityLevel::Low, 0).unwrap();
    ///
    /// // Delivered at tick 1 after waiting one tick; the trip takes 1 + 2 * 1 steps.
    /// let efficiency = model.efficiency([&item], 0, 0).unwrap();
    /// assert!((efficiency - 1.0 / 3.0).abs() < 1e-12);
    ///
    /// let empty: [&MailItem<i64>; 0] = [];
    /// assert!(model.efficiency(empty, 0, 0).is_none());
    /// ```
    pub fn efficiency<'a, T, I>(&self, batch: I, now: T, mailroom_floor: T) -> Option<f64>
    where
        T: MailNumeric + 'a,
        I: IntoIterator<Item = &'a MailItem<T>>,
        I::IntoIter: Clone,
    {
        let items = batch.into_iter();
        let steps = self.steps(items.clone(), mailroom_floor);
        if steps == 0 {
            return None;
        }

        let cost = self.simulated_delivery_cost(items, now, mailroom_floor);
        Some(cost / steps as f64)
    }
}

impl std::fmt::Display for ScoringModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScoringModel(penalty_exponent: {}, return_trip: {})",
            self.weights.penalty_exponent, self.weights.include_return_trip
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfigBuilder;
    use mailroom_model::{index::MailId, mail::PriorityLevel};

    const EPS: f64 = 1e-9;

    fn mail(id: u64, floor: i64, priority: PriorityLevel, arrival: i64) -> MailItem<i64> {
        MailItem::new(MailId::new(id), floor, 1, priority, arrival).unwrap()
    }

    fn linear_model() -> ScoringModel {
        let config = SelectorConfigBuilder::new()
            .with_penalty_exponent(1.0)
            .build()
            .unwrap();
        ScoringModel::new(config.scoring)
    }

    #[test]
    fn test_cost_walks_floors_in_order() {
        let model = linear_model();
        let a = mail(1, 2, PriorityLevel::Low, 0);
        let b = mail(2, 5, PriorityLevel::High, 0);

        // a: travel 2 -> clock 12, waited 12, weight 1 => 12; unload -> 13
        // b: travel 3 -> clock 16, waited 16, weight 2 => 32
        let cost = model.simulated_delivery_cost([&a, &b], 10, 0);
        assert!((cost - 44.0).abs() < EPS);
    }

    #[test]
    fn test_cost_applies_penalty_exponent() {
        let model = ScoringModel::default();
        let a = mail(1, 1, PriorityLevel::Medium, 0);

        // Delivered at tick 1 + 9 = 10 after arrival 0.
        let expected = 10f64.powf(1.1) * 1.5;
        let cost = model.simulated_delivery_cost([&a], 9, 0);
        assert!((cost - expected).abs() < EPS);
    }

    #[test]
    fn test_cost_clamps_future_arrivals() {
        let model = ScoringModel::default();
        let a = mail(1, 1, PriorityLevel::High, 50);
        let cost = model.simulated_delivery_cost([&a], 0, 0);
        assert_eq!(cost, 0.0);
        assert!(!cost.is_nan());
    }

    #[test]
    fn test_return_trip_is_optional() {
        let with_return = ScoringModel::new(
            SelectorConfigBuilder::new()
                .with_penalty_exponent(1.0)
                .with_return_trip(true)
                .build()
                .unwrap()
                .scoring,
        );
        let without_return = linear_model();
        let a = mail(1, -4, PriorityLevel::Low, 0);

        let base = without_return.simulated_delivery_cost([&a], 0, 0);
        let extended = with_return.simulated_delivery_cost([&a], 0, 0);
        assert!((extended - base - 4.0).abs() < EPS);
    }

    #[test]
    fn test_steps_counts_items_and_round_trips() {
        let model = ScoringModel::default();
        let a = mail(1, 3, PriorityLevel::Low, 0);
        let b = mail(2, 6, PriorityLevel::Low, 0);
        let c = mail(3, -2, PriorityLevel::Low, 0);
        let d = mail(4, 0, PriorityLevel::Low, 0);

        assert_eq!(model.steps([&a, &b], 0), 2 + 2 * 6);
        assert_eq!(model.steps([&c], 0), 1 + 2 * 2);
        assert_eq!(model.steps([&c, &a], 0), 2 + 2 * 2 + 2 * 3);
        assert_eq!(model.steps([&d], 0), 1);
        assert_eq!(model.steps([&a], 3), 1);

        let empty: [&MailItem<i64>; 0] = [];
        assert_eq!(model.steps(empty, 0), 0);
    }

    #[test]
    fn test_narrow_floor_type_spanning_its_range() {
        let model = ScoringModel::default();
        let building = mailroom_model::building::Building::new(-100i8, 100, -100).unwrap();
        let top = MailItem::new(MailId::new(1), 100i8, 1, PriorityLevel::High, 0).unwrap();
        assert!(building.contains(top.destination_floor()));

        assert_eq!(model.steps([&top], -100), 1 + 2 * 200);

        let bottom = MailItem::new(MailId::new(2), i8::MIN, 1, PriorityLevel::Low, 0).unwrap();
        let peak = MailItem::new(MailId::new(3), i8::MAX, 1, PriorityLevel::Low, 0).unwrap();
        assert_eq!(model.steps([&bottom, &peak], 0), 2 + 2 * (128 + 127));

        let efficiency = model.efficiency([&top], 10, -100).unwrap();
        assert!(efficiency.is_finite() && efficiency > 0.0);
    }

    #[test]
    fn test_efficiency_is_cost_per_step() {
        let model = linear_model();
        let a = mail(1, 2, PriorityLevel::Low, 0);
        let b = mail(2, 5, PriorityLevel::High, 0);

        let efficiency = model.efficiency([&a, &b], 10, 0).unwrap();
        assert!((efficiency - 44.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn test_nearby_items_beat_a_detour_with_equal_cost_weight() {
        let model = ScoringModel::default();
        let near = mail(1, 1, PriorityLevel::High, 0);
        let far = mail(2, 9, PriorityLevel::High, 0);

        let near_eff = model.efficiency([&near], 20, 0).unwrap();
        let far_eff = model.efficiency([&far], 20, 0).unwrap();
        assert!(near_eff > far_eff);
    }

    #[test]
    fn test_higher_priority_scores_higher() {
        let model = ScoringModel::default();
        let low = mail(1, 2, PriorityLevel::Low, 0);
        let high = mail(2, 2, PriorityLevel::High, 0);

        let low_eff = model.efficiency([&low], 5, 0).unwrap();
        let high_eff = model.efficiency([&high], 5, 0).unwrap();
        assert!(high_eff > low_eff);
    }
}
