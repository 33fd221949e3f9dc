// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Persisted view state.
//!
//! Going back to the search page should show exactly what was there before,
//! without rescoring or re-sorting first. The paginator writes a
//! `ResultsState`; the host stores it (inside a `HistoryState`) wherever it
//! likes and hands it back on the next visit. The JSON shape is camelCase:
//!
//! ```json
//! {
//!   "version": 1,
//!   "sorter": "score",
//!   "nonScoreSorter": "cultivar",
//!   "pageNo": 2,
//!   "direction": "DESC",
//!   "results": { "view": [...], "range": "[51 - 75 of 112]", "hasNext": true, "hasPrev": true },
//!   "count": 112
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::sort::Direction;
use crate::error::Result;
use crate::types::{ScoredRecord, SearchKind};

/// Bump whenever the shape or meaning of `ResultsState` changes.
pub const RESULTS_STATE_VERSION: u32 = 1;

/// What was on screen: enough to repaint without recomputing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CachedResults {
    pub view: Vec<ScoredRecord>,
    pub range: String,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Paginator state. Only trusted when `version` is current and `count`
/// matches the list it is restored onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsState {
    pub version: u32,
    pub sorter: String,
    pub non_score_sorter: String,
    pub page_no: usize,
    pub direction: Direction,
    pub results: CachedResults,
    pub count: usize,
}

impl ResultsState {
    pub fn is_current_version(&self) -> bool {
        self.version == RESULTS_STATE_VERSION
    }
}

/// Everything the search page remembers across navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryState {
    /// Last query typed.
    pub search: String,
    /// Active prefix letter, empty when none.
    pub alpha: String,
    pub kind: SearchKind,
    /// A blob in an older or foreign shape reads as `None`.
    #[serde(deserialize_with = "lenient_results")]
    pub results: Option<ResultsState>,
}

/// Parse the paginator blob if it still has the current shape, else drop it.
fn lenient_results<'de, D>(d: D) -> std::result::Result<Option<ResultsState>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(d)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<ResultsState>(value) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            debug!(error = %e, "discarding unreadable results state");
            Ok(None)
        }
    }
}

impl HistoryState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
