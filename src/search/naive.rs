// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Baseline searcher: plain substring AND over the raw fields.
//!
//! This is roughly what the registry's old server-side search did. It ignores
//! the normalized tokens entirely, so "Emile" will not find "Émile" and
//! punctuation has to match exactly. Kept for comparing result sets with the
//! scored searcher.

use std::sync::Arc;

use crate::types::{AugmentedRecord, Field, ScoredRecord, SearchKind};

/// Raw fields a naive search looks at, in the order they are tried.
fn naive_fields(kind: SearchKind) -> &'static [Field] {
    match kind {
        SearchKind::All => &[
            Field::Cultivar,
            Field::Originator,
            Field::Description,
            Field::Group,
            Field::Country,
            Field::Date,
        ],
        SearchKind::Cultivar => &[Field::Cultivar],
        SearchKind::Originator => &[Field::Originator],
        SearchKind::Group => &[Field::Group],
        SearchKind::Country => &[Field::Country],
        SearchKind::Date => &[Field::Date],
    }
}

/// Every space-separated term must appear, upper-cased, in one of the kind's
/// fields. Matches keep database order; the score is the number of terms.
/// An empty query finds nothing.
pub fn naive_search(
    db: &[Arc<AugmentedRecord>],
    query: &str,
    kind: SearchKind,
) -> Vec<ScoredRecord> {
    let upper = query.to_uppercase();
    let terms: Vec<&str> = upper.split(' ').filter(|t| !t.is_empty()).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let fields = naive_fields(kind);
    db.iter()
        .filter(|record| {
            let haystacks: Vec<String> = fields
                .iter()
                .map(|&field| record.record.text(field).to_uppercase())
                .collect();
            terms
                .iter()
                .all(|term| haystacks.iter().any(|field| field.contains(term)))
        })
        .map(|record| ScoredRecord::new(Arc::clone(record), terms.len() as f64))
        .collect()
}
