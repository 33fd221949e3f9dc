// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: turning what the user typed into a result list.
//!
//! The scheduler is the main path. It debounces keystrokes, scores the
//! database a batch at a time and hands the finished list to a `ResultSink`
//! (normally the paginator). The prefix filter and the naive searcher are
//! synchronous alternatives that skip scoring altogether.

pub mod clock;
pub mod filter;
pub mod naive;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use filter::{prefix_filter, prefixes, PrefixKey};
pub use naive::naive_search;
pub use scheduler::{SchedulerState, SearchScheduler, TimerId};

use crate::types::{Database, ScoredRecord};

/// Where the scheduler delivers its output.
pub trait ResultSink {
    /// The database finished augmenting. Called once per `init_db`.
    fn database_ready(&mut self, _db: &Database) {}

    /// A search pass finished. Only the most recent search is ever delivered.
    fn search_results(&mut self, results: Vec<ScoredRecord>);
}
