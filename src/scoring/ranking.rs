// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering: the comparators behind every sorter.
//!
//! Two modes. Raw mode compares display strings case-insensitively. Normalized
//! mode compares the cached token arrays element by element, so "Mme. Calot"
//! sorts by `MME`, `CALOT` and a title that is a strict prefix of another sorts
//! first. Either way, ties fall back to cultivar then originator so the order
//! is deterministic.

use std::cmp::Ordering;

use crate::results::SortField;
use crate::types::{Field, ScoredRecord};

/// Case-insensitive string compare (upper-case both sides first).
pub fn compare_case_insensitive(x: &str, y: &str) -> Ordering {
    x.chars()
        .flat_map(char::to_uppercase)
        .cmp(y.chars().flat_map(char::to_uppercase))
}

/// Token-array compare. A strict prefix sorts before the longer array.
#[inline]
pub fn compare_tokens(x: &[String], y: &[String]) -> Ordering {
    x.cmp(y)
}

fn compare_field(field: Field, normalized: bool, x: &ScoredRecord, y: &ScoredRecord) -> Ordering {
    if normalized {
        compare_tokens(x.record.tokens(field), y.record.tokens(field))
    } else {
        compare_case_insensitive(x.record.record.text(field), y.record.record.text(field))
    }
}

/// Cultivar, then originator.
fn compare_default(normalized: bool, x: &ScoredRecord, y: &ScoredRecord) -> Ordering {
    compare_field(Field::Cultivar, normalized, x, y)
        .then_with(|| compare_field(Field::Originator, normalized, x, y))
}

/// Ascending comparator for a sorter.
///
/// `Score` orders lowest first like every other field; the paginator shows it
/// descending.
pub fn compare_records(
    field: SortField,
    normalized: bool,
    x: &ScoredRecord,
    y: &ScoredRecord,
) -> Ordering {
    let primary = match field {
        SortField::Score => return x.score.total_cmp(&y.score),
        SortField::Cultivar => compare_field(Field::Cultivar, normalized, x, y),
        SortField::Originator => compare_field(Field::Originator, normalized, x, y),
        SortField::Group => compare_field(Field::Group, normalized, x, y),
        SortField::Country => compare_field(Field::Country, normalized, x, y),
        SortField::Date if normalized => x
            .record
            .date_value
            .total_cmp(&y.record.date_value)
            .then_with(|| compare_field(Field::Date, true, x, y)),
        SortField::Date => compare_field(Field::Date, false, x, y),
    };
    primary.then_with(|| compare_default(normalized, x, y))
}
