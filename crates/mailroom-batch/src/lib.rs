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

//! Mailroom‑Batch: randomized batch selection for a mail delivery robot
//!
//! Picks the next set of pending mail items for one delivery trip. The
//! selector grows single-item seeds into larger batches with a bounded,
//! randomized depth-first search and returns the batch with the best
//! efficiency (waiting penalty per tick of travel).
//!
//! Core flow
//! - Fill a `pool::MailPool<T>` with `mailroom_model::mail::MailItem<T>`s.
//! - Build a `config::SelectorConfig` (or deserialize one with `serde`).
//! - Create a `selector::BatchSelector` with a seed, an RNG or OS entropy.
//! - Call `get_mails` for a plain batch, or `select` with a monitor for the
//!   full `result::SelectionOutcome`.
//!
//! Guarantees
//! - A returned batch never exceeds the requested capacity.
//! - A batch never holds items on both sides of the mailroom.
//! - Every returned item has been removed from the pool exactly once.
//! - The search is bounded by the configured branches and depth.
//!
//! Module map
//! - `config`: search bounds and scoring weights.
//! - `score`: the scoring model (cost, steps, efficiency).
//! - `pool`: pending mail items.
//! - `candidate`: candidate batches referring to pool positions.
//! - `stack`: the LIFO work stack of the search.
//! - `selector`: the search engine and selection requests.
//! - `batch`: the selected batch.
//! - `monitor`: selection monitors (log, composite, limits).
//! - `result`: selection outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.

pub mod batch;
pub mod candidate;
pub mod config;
pub mod monitor;
pub mod pool;
pub mod result;
pub mod score;
pub mod selector;
pub mod stack;
pub mod stats;
