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

use mailroom_batch::{config::SelectorConfig, monitor::log::LogMonitor, selector::BatchSelector};
use mailroom_model::{
    building::{Building, FloorSide},
    clock::{Clock, SimulationClock},
    index::MailId,
    mail::{MailItem, PriorityLevel},
    tube::{StorageTube, TransportBuffer},
};
use mailroom_sorter::sorter::MailSorter;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Simulates a working day: mail arrives, the robot leaves whenever the
/// sorter says so and returns after the round trip.
#[test]
fn test_simulated_day_delivers_every_item_once() {
    let building = Building::new(-3i64, 12, 0).unwrap();
    let selector = BatchSelector::with_rng(SelectorConfig::default(), ChaCha8Rng::seed_from_u64(17)).unwrap();
    let mut sorter = MailSorter::with_selector(building, selector);
    let mut mail_rng = ChaCha8Rng::seed_from_u64(4);
    let mut clock = SimulationClock::new(120);
    let mut tube = StorageTube::default();
    let mut monitor = LogMonitor::default();

    let mut next_id = 0u64;
    let mut delivered = HashSet::new();
    let mut robot_back_at = 0i64;

    while clock.now() < 4000 {
        let now = clock.now();
        if now <= clock.last_delivery_time() && mail_rng.random_bool(0.4) {
            let item = MailItem::new(
                MailId::new(next_id),
                mail_rng.random_range(-3i64..=12),
                mail_rng.random_range(1..=4),
                PriorityLevel::ALL[mail_rng.random_range(0..3usize)],
                now,
            )
            .unwrap();
            sorter.try_add_to_pool(item).unwrap();
            next_id += 1;
        }

        if now >= robot_back_at && sorter.fill_buffer_monitored(&mut tube, &clock, &mut monitor) {
            let items = tube.drain_items();
            assert!(items.iter().map(MailItem::size).sum::<usize>() <= StorageTube::<i64>::DEFAULT_CAPACITY);

            let sides: HashSet<FloorSide> = items
                .iter()
                .map(|m| building.side_of(m.destination_floor()))
                .filter(|s| s.is_directional())
                .collect();
            assert!(sides.len() <= 1);

            let reach = items
                .iter()
                .map(|m| Building::distance(m.destination_floor(), 0))
                .max()
                .unwrap_or(0) as i64;
            robot_back_at = now + 2 * reach + items.len() as i64;
            for item in items {
                assert!(delivered.insert(item.id()));
            }
        }

        clock.tick();
    }

    assert!(TransportBuffer::is_empty(&tube));
    assert!(sorter.pool().is_empty());
    assert_eq!(delivered.len() as u64, next_id);
}

#[test]
fn test_empty_pool_never_dispatches() {
    let building = Building::new(0i64, 5, 0).unwrap();
    let mut sorter = MailSorter::with_seed(building, SelectorConfig::default(), 0).unwrap();
    let mut tube = StorageTube::new(6);

    for now in [0, 10, 100] {
        let clock = SimulationClock::starting_at(now, 50);
        assert!(!sorter.fill_buffer(&mut tube, &clock));
    }
    assert!(TransportBuffer::is_empty(&tube));
}
