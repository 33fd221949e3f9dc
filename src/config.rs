// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tuning knobs for the scheduler, the paginator and the dataset cache.
//!
//! None of these are user-facing. The defaults are what the registry page
//! ships with; tests shrink them to make batching visible on tiny datasets.
//! Durations travel as integer milliseconds in JSON so a host page can pass
//! `{"batchSize": 500, "incrementalDelay": 50}` straight through.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

// =============================================================================
// SEARCH
// =============================================================================

/// Scheduler and paginator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Records scored (or augmented) per batch. Default: 1000.
    pub batch_size: usize,

    /// Pause between batches. Default: 5 ms.
    #[serde(with = "millis")]
    pub batch_delay: Duration,

    /// Keystroke debounce; re-armed on every call. Default: 100 ms.
    #[serde(with = "millis")]
    pub incremental_delay: Duration,

    /// Upper bound on how long a burst of keystrokes can defer a search.
    /// Default: 700 ms.
    #[serde(with = "millis")]
    pub force_delay: Duration,

    /// Results per page. Default: 25.
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            batch_delay: Duration::from_millis(5),
            incremental_delay: Duration::from_millis(100),
            force_delay: Duration::from_millis(700),
            page_size: 25,
        }
    }
}

impl SearchConfig {
    /// Parse a (possibly partial) JSON config. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would stall a pass or divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batchSize must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("pageSize must be at least 1".into()));
        }
        Ok(())
    }
}

// =============================================================================
// DATASET CACHE
// =============================================================================

/// How long a cached copy of the dataset stays trustworthy.
///
/// The registry gets most of its updates in spring, so during the peak months
/// the cache goes stale after hours instead of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CachePolicy {
    #[serde(with = "millis")]
    pub peak_max_age: Duration,

    #[serde(with = "millis")]
    pub off_peak_max_age: Duration,

    /// Never reload more often than this, whatever the browser cache says.
    #[serde(with = "millis")]
    pub min_age: Duration,

    /// Calendar months (1 = January) that count as peak.
    pub peak_months: Vec<u32>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            peak_max_age: Duration::from_secs(12 * 60 * 60),
            off_peak_max_age: Duration::from_secs(7 * 24 * 60 * 60),
            min_age: Duration::from_secs(30),
            peak_months: vec![4, 5, 6],
        }
    }
}

impl CachePolicy {
    /// Maximum cache age for a calendar month (1-12).
    pub fn max_age(&self, month: u32) -> Duration {
        if self.peak_months.contains(&month) {
            self.peak_max_age
        } else {
            self.off_peak_max_age
        }
    }
}

/// `Duration` as integer milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
