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

//! Randomized batch selection.
//!
//! `BatchSelector` picks the next delivery batch from a `MailPool` with a
//! depth- and branch-bounded tree search. A handful of single-item seeds is
//! sampled from the items that fit the carrier, and each candidate is then
//! grown depth-first by sampled extensions. An extension is kept only if it
//! stays on one side of the mailroom, fits the remaining capacity and does
//! not lower the efficiency; a candidate that cannot be grown any further,
//! or that reached the depth limit, becomes a leaf. The leaf with the
//! highest efficiency is removed from the pool and returned.
//!
//! The search is a greedy heuristic. An extension that lowers the efficiency
//! is discarded even if a later extension would have more than recovered it.
//!
//! Randomness is injected through the `rand::Rng` type parameter, so a
//! seeded generator reproduces the same selections for the same pool.

use crate::{
    batch::Batch,
    candidate::CandidateBatch,
    config::{ConfigError, SelectorConfig},
    monitor::{
        no_op::NoOperationMonitor,
        selection_monitor::{PruneReason, SearchCommand, SelectionMonitor},
    },
    pool::MailPool,
    result::{SelectionOutcome, SelectionTermination},
    score::ScoringModel,
    stack::CandidateStack,
    stats::SelectionStatistics,
};
use mailroom_model::{
    building::{Building, FloorSide},
    num::MailNumeric,
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};

/// What the caller asks of one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRequest<T> {
    capacity: usize,
    now: T,
    direction: Option<FloorSide>,
}

impl<T> SelectionRequest<T>
where
    T: MailNumeric,
{
    /// Creates a request for a batch of at most `capacity` size units at time `now`.
    #[inline]
    pub fn new(capacity: usize, now: T) -> Self {
        Self {
            capacity,
            now,
            direction: None,
        }
    }

    /// Restricts the batch to items compatible with `direction`.
    #[inline]
    pub fn with_direction(mut self, direction: FloorSide) -> Self {
        self.direction = Some(direction);
        self
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn now(&self) -> T {
        self.now
    }

    #[inline]
    pub fn direction(&self) -> Option<FloorSide> {
        self.direction
    }

    /// Returns `true` if an item on `side` may be part of the batch.
    #[inline]
    pub fn admits(&self, side: FloorSide) -> bool {
        self.direction.is_none_or(|d| d.is_compatible(side))
    }
}

impl<T> std::fmt::Display for SelectionRequest<T>
where
    T: MailNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Some(d) => write!(
                f,
                "SelectionRequest(capacity: {}, now: {}, direction: {})",
                self.capacity, self.now, d
            ),
            None => write!(
                f,
                "SelectionRequest(capacity: {}, now: {})",
                self.capacity, self.now
            ),
        }
    }
}

/// The batch selector.
///
/// The selector keeps its work stack and scratch buffers between calls, so
/// repeated selections do not reallocate.
#[derive(Clone, Debug)]
pub struct BatchSelector<R = StdRng> {
    config: SelectorConfig,
    scoring: ScoringModel,
    rng: R,
    stack: CandidateStack,
    eligible: Vec<usize>,
}

impl BatchSelector<StdRng> {
    /// Creates a selector seeded from operating system entropy.
    pub fn new(config: SelectorConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a selector whose random choices are reproducible from `seed`.
    pub fn with_seed(config: SelectorConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R> BatchSelector<R>
where
    R: Rng,
{
    /// Creates a selector drawing its random choices from `rng`.
    pub fn with_rng(config: SelectorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scoring: ScoringModel::new(config.scoring),
            stack: CandidateStack::preallocated(config.max_branches, config.max_depth),
            eligible: Vec::new(),
            config,
            rng,
        })
    }

    #[inline]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    #[inline]
    pub fn scoring(&self) -> &ScoringModel {
        &self.scoring
    }

    /// Selects one batch, removes it from `pool` and returns it together
    /// with the termination reason and the search statistics.
    ///
    /// An empty pool is not touched; the outcome then carries an empty batch
    /// and nothing is scored.
    pub fn select<T, M>(
        &mut self,
        pool: &mut MailPool<T>,
        building: &Building<T>,
        request: SelectionRequest<T>,
        monitor: &mut M,
    ) -> SelectionOutcome<T>
    where
        T: MailNumeric,
        M: SelectionMonitor<T>,
    {
        SelectionSession::new(self, pool, building, request, monitor).run()
    }

    /// Selects, removes and returns the next batch for a carrier with room
    /// for `capacity` size units.
    ///
    /// An item larger than `capacity` is never selected. If no pending item
    /// fits, the returned batch is empty and the pool is left untouched, even
    /// though the pool itself is not empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use mailroom_batch::{config::SelectorConfig, pool::MailPool, selector::BatchSelector};
    /// # use mailroom_model::{building::Building, index::MailId, mail::{MailItem, PriorityLevel}};
    ///
    /// let building = Building::new(-5i64, 10, 0).unwrap();
    /// let mut pool = MailPool::new();
    /// pool.add_to_pool(MailItem::new(MailId::new(1), 3, 1, PriorityLevel::High, 0).unwrap());
    /// pool.add_to_pool(MailItem::new(MailId::new(2), -2, 1, PriorityLevel::Low, 0).unwrap());
    ///
    /// let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 7).unwrap();
    /// let batch = selector.get_mails(&mut pool, &building, 4, 5);
    ///
    /// // One item per side of the mailroom, so each trip takes exactly one.
    /// assert_eq!(batch.len(), 1);
    /// assert_eq!(pool.len(), 1);
    /// ```
    pub fn get_mails<T>(
        &mut self,
        pool: &mut MailPool<T>,
        building: &Building<T>,
        capacity: usize,
        now: T,
    ) -> Batch<T>
    where
        T: MailNumeric,
    {
        let mut monitor = NoOperationMonitor::new();
        self.select(pool, building, SelectionRequest::new(capacity, now), &mut monitor)
            .into_batch()
    }
}

impl<R> std::fmt::Display for BatchSelector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BatchSelector({}, {})", self.config, self.scoring)
    }
}

/// The state of a single selection run.
struct SelectionSession<'a, T, R, M>
where
    T: MailNumeric,
{
    selector: &'a mut BatchSelector<R>,
    pool: &'a mut MailPool<T>,
    building: &'a Building<T>,
    request: SelectionRequest<T>,
    monitor: &'a mut M,
    branch_count: usize,
    depth_limit: usize,
    best_leaf: Option<CandidateBatch>,
    stats: SelectionStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, R, M> std::fmt::Debug for SelectionSession<'a, T, R, M>
where
    T: MailNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSession")
            .field("request", &self.request)
            .field("branch_count", &self.branch_count)
            .field("depth_limit", &self.depth_limit)
            .field("best_leaf", &self.best_leaf)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, R, M> SelectionSession<'a, T, R, M>
where
    T: MailNumeric,
    R: Rng,
    M: SelectionMonitor<T>,
{
    #[inline]
    fn new(
        selector: &'a mut BatchSelector<R>,
        pool: &'a mut MailPool<T>,
        building: &'a Building<T>,
        request: SelectionRequest<T>,
        monitor: &'a mut M,
    ) -> Self {
        let branch_count = selector.config.max_branches.min(pool.len());
        let depth_limit = selector.config.max_depth.min(request.capacity());
        selector
            .stack
            .ensure_capacity(branch_count, depth_limit);

        Self {
            selector,
            pool,
            building,
            request,
            monitor,
            branch_count,
            depth_limit,
            best_leaf: None,
            stats: SelectionStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> SelectionOutcome<T> {
        self.stats.set_pool_size(self.pool.len());
        self.monitor
            .on_enter_search(&*self.pool, &self.request, &self.stats);

        if self.pool.is_empty() {
            return self.finish(SelectionTermination::EmptyPool);
        }
        if !self.seed() {
            return self.finish(SelectionTermination::NoEligibleItems);
        }

        let termination = loop {
            if self.selector.stack.is_empty() {
                break SelectionTermination::Exhausted;
            }
            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                self.drain_into_leaves();
                break SelectionTermination::Aborted(msg);
            }

            let Some(candidate) = self.selector.stack.pop() else {
                break SelectionTermination::Exhausted;
            };
            self.stats.on_candidate_explored(candidate.len());
            self.monitor.on_candidate(&candidate, &self.stats);

            if candidate.len() >= self.depth_limit || !self.expand(&candidate) {
                self.record_leaf(candidate);
            }
        };

        self.finish(termination)
    }

    /// Pushes single-item candidates for a sample of the eligible items.
    /// Returns `false` if no item fits the request.
    fn seed(&mut self) -> bool {
        let pool: &MailPool<T> = &*self.pool;
        let building = self.building;
        let request = self.request;

        self.selector.eligible.clear();
        self.selector.eligible.extend(
            pool.iter()
                .enumerate()
                .filter(|(_, item)| {
                    item.size() <= request.capacity()
                        && request.admits(building.side_of(item.destination_floor()))
                })
                .map(|(position, _)| position),
        );

        let eligible = self.selector.eligible.len();
        if eligible == 0 {
            return false;
        }

        let amount = self.branch_count.min(eligible);
        for slot in index::sample(&mut self.selector.rng, eligible, amount) {
            let position = self.selector.eligible[slot];
            let seed = CandidateBatch::singleton(
                pool,
                building,
                &self.selector.scoring,
                position,
                request.now(),
            );
            self.stats.on_seed();
            self.stats.on_evaluation();
            self.selector.stack.push(seed);
        }

        true
    }

    /// Tries up to `branch_count` sampled extensions of `candidate` and
    /// pushes those that keep the efficiency. Returns `true` if any was pushed.
    fn expand(&mut self, candidate: &CandidateBatch) -> bool {
        let pool: &MailPool<T> = &*self.pool;
        let building = self.building;
        let request = self.request;

        // Oversample by the candidate's own size so members do not eat the window.
        let amount = (self.branch_count + candidate.len()).min(pool.len());
        let window = index::sample(&mut self.selector.rng, pool.len(), amount);

        let mut considered = 0;
        let mut branched = false;
        for position in window {
            if considered == self.branch_count {
                break;
            }
            if candidate.contains(position) {
                continue;
            }
            considered += 1;

            // SAFETY: `index::sample` only yields positions in `0..pool.len()`.
            let item = unsafe { pool.get_unchecked(position) };

            let side = building.side_of(item.destination_floor());
            if !candidate.side().is_compatible(side) || !request.admits(side) {
                self.stats.on_pruning_direction();
                self.monitor
                    .on_prune(candidate, position, PruneReason::Direction, &self.stats);
                continue;
            }

            if candidate.total_size() + item.size() > request.capacity() {
                self.stats.on_pruning_capacity();
                self.monitor
                    .on_prune(candidate, position, PruneReason::Capacity, &self.stats);
                continue;
            }

            let child = candidate.extended(
                pool,
                building,
                &self.selector.scoring,
                position,
                request.now(),
            );
            self.stats.on_evaluation();

            if child.efficiency() >= candidate.efficiency() {
                self.selector.stack.push(child);
                self.stats.on_extension_pushed();
                branched = true;
            } else {
                self.stats.on_pruning_efficiency();
                self.monitor
                    .on_prune(candidate, position, PruneReason::Efficiency, &self.stats);
            }
        }

        branched
    }

    #[inline]
    fn record_leaf(&mut self, candidate: CandidateBatch) {
        self.stats.on_leaf();
        self.monitor.on_leaf(&candidate, &self.stats);

        // Strictly greater, so the first leaf wins a tie.
        if self
            .best_leaf
            .as_ref()
            .is_none_or(|best| candidate.efficiency() > best.efficiency())
        {
            self.best_leaf = Some(candidate);
        }
    }

    fn drain_into_leaves(&mut self) {
        while let Some(candidate) = self.selector.stack.pop() {
            self.record_leaf(candidate);
        }
    }

    /// Removes the best leaf from the pool and builds the outcome.
    ///
    /// # Note
    ///
    /// This consumes self.
    fn finish(mut self, termination: SelectionTermination) -> SelectionOutcome<T> {
        let batch = match self.best_leaf.take() {
            Some(leaf) => {
                let items = self.pool.take_positions(leaf.positions());
                Batch::new(items, leaf.efficiency())
            }
            None => Batch::empty(),
        };

        self.selector.stack.reset();
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&batch, &self.stats);

        tracing::trace!(
            termination = %termination,
            items = batch.len(),
            size = batch.total_size(),
            remaining = self.pool.len(),
            evaluations = self.stats.evaluations,
            "batch selected"
        );

        SelectionOutcome::new(batch, termination, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SelectorConfigBuilder, monitor::evaluation_limit::EvaluationLimitMonitor};
    use mailroom_model::{
        index::MailId,
        mail::{MailItem, PriorityLevel},
    };
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn mail(id: u64, floor: i64, size: usize, priority: PriorityLevel, arrival: i64) -> MailItem<i64> {
        MailItem::new(MailId::new(id), floor, size, priority, arrival).unwrap()
    }

    fn building() -> Building<i64> {
        Building::new(-10, 20, 0).unwrap()
    }

    fn random_pool(seed: u64, n: usize, max_size: usize) -> MailPool<i64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n)
            .map(|i| {
                let floor = rng.random_range(-10..=20);
                let size = rng.random_range(1..=max_size);
                let priority = PriorityLevel::ALL[rng.random_range(0..3usize)];
                let arrival = rng.random_range(0..50);
                mail(i as u64, floor, size, priority, arrival)
            })
            .collect()
    }

    fn sides(batch: &Batch<i64>, building: &Building<i64>) -> HashSet<FloorSide> {
        batch
            .iter()
            .map(|m| building.side_of(m.destination_floor()))
            .filter(|s| s.is_directional())
            .collect()
    }

    fn ids(batch: &Batch<i64>) -> Vec<u64> {
        batch.iter().map(|m| m.id().get()).collect()
    }

    #[test]
    fn test_empty_pool_is_idempotent() {
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 1).unwrap();
        let mut pool = MailPool::<i64>::new();
        let building = building();

        for _ in 0..3 {
            let mut monitor = NoOperationMonitor::new();
            let outcome = selector.select(&mut pool, &building, SelectionRequest::new(4, 10), &mut monitor);
            assert!(outcome.is_empty());
            assert_eq!(outcome.termination(), &SelectionTermination::EmptyPool);
            assert_eq!(outcome.statistics().evaluations, 0);
            assert!(outcome.batch().efficiency().is_none());
            assert!(pool.is_empty());
        }
    }

    #[test]
    fn test_example_scenario_picks_the_upper_pair() {
        // A and B lie above the mailroom, C below. {A, B} has the best
        // efficiency and C can never join them.
        let building = building();
        for seed in 0..20 {
            let mut pool: MailPool<i64> = [
                mail(1, 5, 1, PriorityLevel::High, 0),
                mail(2, 6, 1, PriorityLevel::Low, 0),
                mail(3, -3, 1, PriorityLevel::Medium, 0),
            ]
            .into_iter()
            .collect();

            let mut selector = BatchSelector::with_seed(SelectorConfig::default(), seed).unwrap();
            let batch = selector.get_mails(&mut pool, &building, 4, 10);

            assert_eq!(ids(&batch), vec![1, 2]);
            assert_eq!(batch.total_size(), 2);
            assert_eq!(pool.len(), 1);
            assert_eq!(pool.get(0).map(|m| m.id().get()), Some(3));
        }
    }

    #[test]
    fn test_single_item_filling_capacity_is_returned_without_branching() {
        let building = building();
        let mut pool: MailPool<i64> = [mail(9, 4, 3, PriorityLevel::Medium, 0)].into_iter().collect();
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 3).unwrap();
        let mut monitor = NoOperationMonitor::new();

        let outcome = selector.select(&mut pool, &building, SelectionRequest::new(3, 5), &mut monitor);
        assert_eq!(ids(outcome.batch()), vec![9]);
        assert_eq!(outcome.termination(), &SelectionTermination::Exhausted);
        assert_eq!(outcome.statistics().extensions_pushed, 0);
        assert_eq!(outcome.statistics().leaves, 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_capacity_direction_and_conservation_until_pool_is_drained() {
        let building = building();
        let mut pool = random_pool(11, 120, 3);
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 11).unwrap();
        let mut delivered = HashSet::new();

        while !pool.is_empty() {
            let before = pool.len();
            let batch = selector.get_mails(&mut pool, &building, 4, 60);

            assert!(!batch.is_empty(), "every item fits, so a batch must be found");
            assert!(batch.total_size() <= 4);
            assert!(sides(&batch, &building).len() <= 1);
            assert_eq!(before, pool.len() + batch.len());
            assert!(
                batch
                    .items()
                    .windows(2)
                    .all(|w| w[0].destination_floor() <= w[1].destination_floor())
            );
            for item in batch {
                assert!(delivered.insert(item.id()), "item delivered twice");
            }
        }
        assert_eq!(delivered.len(), 120);
    }

    #[test]
    fn test_evaluations_are_bounded_by_the_search_tree() {
        let building = building();
        let config = SelectorConfigBuilder::new()
            .with_max_branches(5)
            .with_max_depth(3)
            .build()
            .unwrap();
        let mut selector = BatchSelector::with_seed(config, 5).unwrap();

        // b seeds, then at most b children for every node above the depth limit.
        let bound: u64 = (1..=3).map(|k| 5u64.pow(k)).sum();
        for seed in 0..10 {
            let mut pool = random_pool(seed, 200, 1);
            let mut monitor = NoOperationMonitor::new();
            let outcome = selector.select(&mut pool, &building, SelectionRequest::new(10, 40), &mut monitor);
            assert!(outcome.statistics().evaluations <= bound);
            assert!(outcome.statistics().max_depth <= 3);
            assert!(outcome.batch().len() <= 3);
        }
    }

    #[test]
    fn test_best_leaf_is_at_least_as_good_as_every_seed() {
        // With branches covering the whole pool every eligible item is a seed,
        // and growth never lowers the efficiency of a chain.
        let building = building();
        let config = SelectorConfigBuilder::new().with_max_branches(30).build().unwrap();
        let scoring = ScoringModel::new(config.scoring);

        for seed in 0..10 {
            let mut pool = random_pool(100 + seed, 20, 2);
            let best_single = pool
                .iter()
                .filter_map(|m| scoring.efficiency([m], 30, 0))
                .fold(f64::MIN, f64::max);

            let mut selector = BatchSelector::with_seed(config, seed).unwrap();
            let batch = selector.get_mails(&mut pool, &building, 4, 30);
            let efficiency = batch.efficiency().unwrap();
            assert!(efficiency >= best_single - 1e-9);
        }
    }

    /// Records the positions and efficiency of every popped candidate.
    #[derive(Default)]
    struct ChainRecorder {
        seen: Vec<(Vec<usize>, f64)>,
    }

    impl SelectionMonitor<i64> for ChainRecorder {
        fn name(&self) -> &str {
            "ChainRecorder"
        }

        fn on_enter_search(&mut self, _: &MailPool<i64>, _: &SelectionRequest<i64>, _: &SelectionStatistics) {}

        fn on_candidate(&mut self, candidate: &CandidateBatch, _: &SelectionStatistics) {
            let mut positions = candidate.positions().to_vec();
            positions.sort_unstable();
            self.seen.push((positions, candidate.efficiency()));
        }

        fn on_prune(&mut self, _: &CandidateBatch, _: usize, _: PruneReason, _: &SelectionStatistics) {}

        fn on_leaf(&mut self, _: &CandidateBatch, _: &SelectionStatistics) {}

        fn on_exit_search(&mut self, _: &Batch<i64>, _: &SelectionStatistics) {}
    }

    #[test]
    fn test_every_extension_keeps_or_raises_its_parents_efficiency() {
        let building = building();
        let config = SelectorConfigBuilder::new()
            .with_max_branches(8)
            .with_max_depth(4)
            .build()
            .unwrap();

        let mut extended = 0usize;
        for seed in 0..10 {
            let mut pool = random_pool(300 + seed, 60, 1);
            let mut selector = BatchSelector::with_seed(config, seed).unwrap();
            let mut recorder = ChainRecorder::default();

            let outcome = selector.select(&mut pool, &building, SelectionRequest::new(4, 40), &mut recorder);
            assert_eq!(outcome.termination(), &SelectionTermination::Exhausted);

            for (slot, (child, child_eff)) in recorder.seen.iter().enumerate() {
                if child.len() < 2 {
                    continue;
                }
                extended += 1;

                // A parent is popped before any of its children.
                let has_parent = recorder.seen[..slot].iter().any(|(parent, parent_eff)| {
                    parent.len() + 1 == child.len()
                        && parent.iter().all(|p| child.contains(p))
                        && *parent_eff <= *child_eff
                });
                assert!(has_parent, "candidate {:?} has no weaker recorded parent", child);
            }
        }
        assert!(extended > 0, "no candidate was ever extended");
    }

    #[test]
    fn test_same_seed_reproduces_selection() {
        let building = building();
        let run = |seed: u64| {
            let mut pool = random_pool(42, 60, 2);
            let mut selector = BatchSelector::with_rng(SelectorConfig::default(), ChaCha8Rng::seed_from_u64(seed)).unwrap();
            (0..5)
                .map(|_| ids(&selector.get_mails(&mut pool, &building, 4, 25)))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(8), run(8));
    }

    #[test]
    fn test_monitor_abort_still_yields_a_seed() {
        let building = building();
        let mut pool = random_pool(7, 30, 2);
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 7).unwrap();
        let mut monitor = EvaluationLimitMonitor::new(0);

        let outcome = selector.select(&mut pool, &building, SelectionRequest::new(4, 20), &mut monitor);
        assert!(matches!(outcome.termination(), SelectionTermination::Aborted(_)));
        assert_eq!(outcome.batch().len(), 1);
        assert_eq!(outcome.statistics().extensions_pushed, 0);
        assert_eq!(outcome.statistics().leaves, outcome.statistics().seeds);
        assert_eq!(pool.len(), 29);
    }

    #[test]
    fn test_direction_lock_restricts_sides() {
        let building = building();
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 2).unwrap();
        let mut pool = random_pool(3, 80, 1);
        let mut monitor = NoOperationMonitor::new();

        let request = SelectionRequest::new(4, 30).with_direction(FloorSide::Below);
        let outcome = selector.select(&mut pool, &building, request, &mut monitor);
        assert!(!outcome.is_empty());
        assert!(
            outcome
                .batch()
                .iter()
                .all(|m| building.side_of(m.destination_floor()).is_compatible(FloorSide::Below))
        );
    }

    #[test]
    fn test_no_eligible_items_leaves_pool_untouched() {
        let building = building();
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 2).unwrap();
        let mut pool: MailPool<i64> = [
            mail(1, 4, 3, PriorityLevel::High, 0),
            mail(2, 7, 1, PriorityLevel::Low, 0),
        ]
        .into_iter()
        .collect();
        let mut monitor = NoOperationMonitor::new();

        let below = SelectionRequest::new(4, 10).with_direction(FloorSide::Below);
        let outcome = selector.select(&mut pool, &building, below, &mut monitor);
        assert_eq!(outcome.termination(), &SelectionTermination::NoEligibleItems);
        assert!(outcome.is_empty());
        assert_eq!(pool.len(), 2);

        let too_small = SelectionRequest::new(0, 10);
        let outcome = selector.select(&mut pool, &building, too_small, &mut monitor);
        assert_eq!(outcome.termination(), &SelectionTermination::NoEligibleItems);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_oversized_item_is_never_selected() {
        let building = building();
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 6).unwrap();
        let mut pool: MailPool<i64> = [mail(1, 3, 5, PriorityLevel::High, 0)].into_iter().collect();

        let batch = selector.get_mails(&mut pool, &building, 4, 10);
        assert!(batch.is_empty());
        assert_eq!(pool.len(), 1);

        let batch = selector.get_mails(&mut pool, &building, 5, 10);
        assert_eq!(ids(&batch), vec![1]);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_mailroom_items_join_either_side() {
        let building = building();
        let mut pool: MailPool<i64> = [
            mail(1, 0, 1, PriorityLevel::High, 0),
            mail(2, 1, 1, PriorityLevel::High, 0),
            mail(3, -1, 1, PriorityLevel::High, 0),
        ]
        .into_iter()
        .collect();
        let mut selector = BatchSelector::with_seed(SelectorConfig::default(), 4).unwrap();

        let batch = selector.get_mails(&mut pool, &building, 4, 20);
        assert!(sides(&batch, &building).len() <= 1);
        assert!(batch.len() <= 2);
        assert_eq!(pool.len() + batch.len(), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SelectorConfig {
            max_branches: 0,
            ..SelectorConfig::default()
        };
        assert!(matches!(
            BatchSelector::with_seed(config, 0),
            Err(ConfigError::ZeroBranches)
        ));
    }

    #[test]
    fn test_request_display_and_admits() {
        let request = SelectionRequest::new(4, 12i64);
        assert!(request.admits(FloorSide::Above));
        assert!(request.admits(FloorSide::Below));
        assert_eq!(format!("{}", request), "SelectionRequest(capacity: 4, now: 12)");

        let locked = request.with_direction(FloorSide::Above);
        assert!(locked.admits(FloorSide::Mailroom));
        assert!(!locked.admits(FloorSide::Below));
        assert_eq!(locked.direction(), Some(FloorSide::Above));
    }
}
