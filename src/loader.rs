// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Getting the dataset in.
//!
//! The dataset is one JSON array of records. Decoding is lenient per field
//! (see `Record`), strict about the overall shape: anything that isn't an
//! array of objects is an error.
//!
//! The registry endpoint sends no useful cache headers, so the host tracks
//! when it last fetched the file and asks `cache_decision` whether the
//! browser's copy is still good enough.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CachePolicy;
use crate::error::Result;
use crate::types::Record;

/// Decode a dataset from a JSON string.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    debug!(records = records.len(), "dataset parsed");
    Ok(records)
}

/// Decode a dataset from any reader.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    debug!(records = records.len(), "dataset read");
    Ok(records)
}

/// Decode a dataset file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

// =============================================================================
// CACHE POLICY
// =============================================================================

/// What the host remembers about its last download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheState {
    /// Milliseconds since the Unix epoch.
    pub last_access: u64,
}

/// How to fetch the dataset this time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Use whatever the browser has.
    ForceCache,
    /// Go to the network, then record a new `CacheState`.
    Reload,
}

/// Decide between the cached copy and a fresh download.
///
/// - no state → reload
/// - older than the seasonal max age → reload
/// - younger than the minimum age → cache, even on a manual reload
/// - otherwise reload only if the user reloaded the page; `None` (unknown)
///   also reloads
pub fn cache_decision(
    state: Option<&CacheState>,
    now_ms: u64,
    reloaded: Option<bool>,
    policy: &CachePolicy,
) -> CacheDecision {
    let Some(state) = state else {
        return CacheDecision::Reload;
    };

    let age = Duration::from_millis(now_ms.saturating_sub(state.last_access));
    let month = i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or(1, |now| now.month());

    if age > policy.max_age(month) {
        CacheDecision::Reload
    } else if age < policy.min_age {
        CacheDecision::ForceCache
    } else if reloaded == Some(false) {
        CacheDecision::ForceCache
    } else {
        CacheDecision::Reload
    }
}
