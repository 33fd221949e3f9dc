// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the catalog.
//!
//! A `Record` is what the dataset loader hands us. An `AugmentedRecord` is the
//! same record after the normalizer has run over it once: every searchable
//! field gets a cached token array, and the date gets a numeric sort key.
//! A `ScoredRecord` pairs a shared augmented record with the score from one
//! search pass. Scores never get written back into the shared records, so a
//! stale score can't leak from one search into the next.
//!
//! # Invariants
//!
//! - **AugmentedRecord**: token arrays are never `[""]`. An empty field yields
//!   an empty array, so a blank field can't match every query term.
//!
//! - **ScoredRecord**: `score` is only meaningful inside the result set it was
//!   delivered with.

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Sort key for records without a recognizable year. Sorts after every real year.
pub const UNDATED: f64 = 9999.0;

/// The whole augmented catalog, shared by the scheduler and the paginator.
pub type Database = Arc<[Arc<AugmentedRecord>]>;

// =============================================================================
// RECORDS
// =============================================================================

/// One catalog entry as it appears in the dataset.
///
/// Text fields are lenient on input: missing keys, `null`, and numbers all
/// decode to strings, so one malformed entry can't sink the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub cultivar: String,
    #[serde(deserialize_with = "lenient_string")]
    pub originator: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub group: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reference: String,
    #[serde(deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

impl Record {
    /// Raw text of a searchable field. `NativeCultivar` has no raw column of
    /// its own; it shares the title.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Cultivar | Field::NativeCultivar => &self.cultivar,
            Field::Originator => &self.originator,
            Field::Group => &self.group,
            Field::Country => &self.country,
            Field::Date => &self.date,
            Field::Description => &self.description,
        }
    }
}

/// A record with its normalized token arrays and date sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentedRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(default)]
    pub cultivar_norm: Vec<String>,
    /// Segmented native-script title, only set for bilingual `native / romanized` titles.
    #[serde(default)]
    pub native_cultivar_norm: Vec<String>,
    #[serde(default)]
    pub originator_norm: Vec<String>,
    #[serde(default)]
    pub group_norm: Vec<String>,
    #[serde(default)]
    pub country_norm: Vec<String>,
    #[serde(default)]
    pub date_norm: Vec<String>,
    #[serde(default)]
    pub description_norm: Vec<String>,
    #[serde(default = "undated")]
    pub date_value: f64,
}

fn undated() -> f64 {
    UNDATED
}

impl AugmentedRecord {
    /// Cached tokens for a searchable field.
    #[inline]
    pub fn tokens(&self, field: Field) -> &[String] {
        match field {
            Field::Cultivar => &self.cultivar_norm,
            Field::NativeCultivar => &self.native_cultivar_norm,
            Field::Originator => &self.originator_norm,
            Field::Group => &self.group_norm,
            Field::Country => &self.country_norm,
            Field::Date => &self.date_norm,
            Field::Description => &self.description_norm,
        }
    }
}

/// A record paired with the score it earned in one search pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Arc<AugmentedRecord>,
    #[serde(default)]
    pub score: f64,
}

impl ScoredRecord {
    pub fn new(record: Arc<AugmentedRecord>, score: f64) -> Self {
        Self { record, score }
    }

    /// Wrap a record that reached the result list without being scored
    /// (full catalog, prefix filter).
    pub fn unscored(record: Arc<AugmentedRecord>) -> Self {
        Self { record, score: 0.0 }
    }
}

// =============================================================================
// FIELDS AND SEARCH KINDS
// =============================================================================

/// A searchable field with its own token array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Cultivar,
    NativeCultivar,
    Originator,
    Group,
    Country,
    Date,
    Description,
}

/// Which fields a search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    #[default]
    All,
    Cultivar,
    Originator,
    Group,
    Country,
    Date,
}

impl SearchKind {
    /// Every kind, in the order the search box offers them.
    pub const ALL_KINDS: [SearchKind; 6] = [
        SearchKind::All,
        SearchKind::Cultivar,
        SearchKind::Originator,
        SearchKind::Group,
        SearchKind::Country,
        SearchKind::Date,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchKind::All => "All",
            SearchKind::Cultivar => "Cultivar",
            SearchKind::Originator => "Originator",
            SearchKind::Group => "Group",
            SearchKind::Country => "Country",
            SearchKind::Date => "Date",
        }
    }

    /// Human-facing label for the kind selector.
    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Date => "Introduction Date",
            other => other.name(),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchKind::ALL_KINDS
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
