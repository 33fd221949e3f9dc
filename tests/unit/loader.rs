//! Dataset loading, configuration files and the cache policy.

use std::io::Cursor;
use std::time::Duration;

use crate::common::{REGISTRY_JSON, REGISTRY_PATH};
use petal::{
    cache_decision, load_records, read_records, CacheDecision, CachePolicy, CacheState,
    SearchConfig,
};

#[test]
fn test_load_fixture_file() {
    let records = load_records(REGISTRY_PATH).unwrap();
    assert_eq!(records.len(), 13);
    assert_eq!(records, read_records(Cursor::new(REGISTRY_JSON)).unwrap());
}

#[test]
fn test_lenient_fields() {
    let records = load_records(REGISTRY_PATH).unwrap();
    // null originator, numeric date, missing group
    assert_eq!(records[5].originator, "");
    assert_eq!(records[11].date, "1999");
    assert_eq!(records[12].group, "");
}

#[test]
fn test_malformed_dataset_is_json_error() {
    assert!(matches!(
        read_records(Cursor::new("[{\"id\": 1},")),
        Err(petal::Error::Json(_))
    ));
}

#[test]
fn test_config_from_partial_json() {
    let config = SearchConfig::from_json(r#"{"batchSize": 250, "incrementalDelay": 40}"#).unwrap();
    assert_eq!(config.batch_size, 250);
    assert_eq!(config.incremental_delay, Duration::from_millis(40));
    assert_eq!(config.page_size, SearchConfig::default().page_size);

    assert!(matches!(
        SearchConfig::from_json(r#"{"pageSize": 0}"#),
        Err(petal::Error::InvalidConfig(_))
    ));
}

#[test]
fn test_cache_state_round_trip_drives_decision() {
    // 2024-01-10T00:00:00Z
    let now: u64 = 1_704_844_800_000;
    let state: CacheState = serde_json::from_str(&format!(r#"{{"lastAccess": {}}}"#, now - 60_000)).unwrap();
    let policy = CachePolicy::default();

    assert_eq!(cache_decision(Some(&state), now, Some(false), &policy), CacheDecision::ForceCache);
    assert_eq!(cache_decision(Some(&state), now, Some(true), &policy), CacheDecision::Reload);

    // Eight days old in January: past the off-peak limit.
    let stale = CacheState { last_access: now - 8 * 24 * 60 * 60 * 1000 };
    assert_eq!(cache_decision(Some(&stale), now, Some(false), &policy), CacheDecision::Reload);
}
