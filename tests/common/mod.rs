//! Shared test utilities and fixtures.

#![allow(dead_code)]

use petal::{
    augment_all, parse_records, Database, ManualClock, Record, ScoredRecord, SearchConfig,
    ViewModel,
};

// Re-export canonical test utilities from petal::testing
pub use petal::testing::{make_db, make_full_record, make_record, CollectingSink};

/// Thirteen registry entries covering bilingual titles, approximate and
/// missing dates, accented names and empty fields.
pub const REGISTRY_JSON: &str = include_str!("../fixtures/registry.json");

/// Path to the same fixture, for the file loader.
pub const REGISTRY_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/registry.json");

pub fn registry() -> Vec<Record> {
    parse_records(REGISTRY_JSON).expect("fixture parses")
}

pub fn registry_db() -> Database {
    augment_all(registry())
}

/// Small batches and page size so batching and paging show up on the fixture.
pub fn small_config() -> SearchConfig {
    SearchConfig {
        batch_size: 4,
        page_size: 5,
        ..SearchConfig::default()
    }
}

/// A view model over the fixture, loaded and idle.
pub fn loaded_model(config: SearchConfig) -> ViewModel<ManualClock> {
    let mut vm = ViewModel::new(ManualClock::new(), config, None).expect("valid config");
    vm.load(registry());
    vm.run_until_idle();
    vm
}

pub fn ids(results: &[ScoredRecord]) -> Vec<u64> {
    results.iter().map(|r| r.record.record.id).collect()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
