// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Date sort keys.
//!
//! Registry dates are free text: "1906", "bef. 1931", "c. 1850s", "unknown".
//! We only need an order, so pull out the first plausible year and nudge
//! approximate ("before") dates half a year earlier.

use crate::types::UNDATED;
use regex::Regex;
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(1[5-9]|20)[0-9]{2}").expect("year pattern is valid"));

/// Numeric sort key for a raw date string.
///
/// - first year in 1500..=2099 wins
/// - "bef." / "before" prefix subtracts 0.5, so it sorts ahead of the exact year
/// - no year at all gives `UNDATED`, which sorts after everything
pub fn date_sort_key(date: &str) -> f64 {
    let Some(found) = YEAR.find(date) else {
        return UNDATED;
    };

    // The pattern only matches four ASCII digits.
    let year: f64 = found.as_str().parse().unwrap_or(UNDATED);
    if is_approximate(date) {
        year - 0.5
    } else {
        year
    }
}

fn is_approximate(date: &str) -> bool {
    let head = date.trim_start().to_ascii_lowercase();
    head.starts_with("bef.") || head.starts_with("before")
}
