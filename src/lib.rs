// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranked fuzzy search over a peony cultivar registry.
//!
//! The whole catalog fits in memory, so there is no index. Every record is
//! normalized once into token arrays, every search scores every record, and
//! the work is sliced into batches so a browser tab never freezes while it
//! happens. Results land in a paginator that sorts, pages and remembers what
//! was on screen across navigation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  loader.rs  │────▶│   build/     │────▶│    scoring/      │
//! │ (JSON, cache│     │ (normalize,  │     │ (tiered matches, │
//! │   policy)   │     │  date keys)  │     │  field weights)  │
//! └─────────────┘     └──────────────┘     └──────────────────┘
//!                            │                      │
//!                            ▼                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   search/scheduler.rs                       │
//! │  (debounce, batched preparation and scoring, supersession)  │
//! └─────────────────────────────────────────────────────────────┘
//!                            │ ResultSink
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        results/                             │
//! │  (sorters, pages, breadcrumbs, persisted view state)        │
//! └─────────────────────────────────────────────────────────────┘
//!                            │ PageView
//!                            ▼
//!                 viewmodel.rs ── wasm.rs / cli
//! ```
//!
//! # Usage
//!
//! ```
//! use petal::{ManualClock, SearchConfig, ViewModel, Record};
//!
//! let records = vec![Record {
//!     id: 1,
//!     cultivar: "Festiva Maxima".into(),
//!     ..Record::default()
//! }];
//!
//! let mut vm = ViewModel::new(ManualClock::new(), SearchConfig::default(), None).unwrap();
//! vm.load(records);
//! vm.set_query("festiva");
//! vm.run_until_idle();
//! assert_eq!(vm.page().total, 1);
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod loader;
pub mod results;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod util;
pub mod viewmodel;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for public API
pub use build::{augment_all, date_sort_key, populate_normalized, Preparation};
#[cfg(feature = "parallel")]
pub use build::parallel::{augment_all_parallel, score_all_parallel};
pub use config::{CachePolicy, SearchConfig};
pub use error::{Error, Result};
pub use loader::{cache_decision, load_records, parse_records, read_records, CacheDecision, CacheState};
pub use results::{
    BreadCrumb, Direction, HistoryState, PageView, ResultPaginator, ResultsState, SortField,
};
pub use scoring::{compare_records, score_all, score_record};
pub use search::{
    naive_search, prefix_filter, Clock, ManualClock, ResultSink, SchedulerState, SearchScheduler,
    SystemClock,
};
pub use types::{AugmentedRecord, Database, Field, Record, ScoredRecord, SearchKind};
pub use util::{normalize, query_terms, tokenize, unescape_query};
pub use viewmodel::ViewModel;
