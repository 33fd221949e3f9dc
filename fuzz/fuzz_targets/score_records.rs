// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for scoring.
//!
//! Arbitrary records against an arbitrary query and kind. Scores must be
//! finite, positive for every result, and agree with `score_record`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use petal::{augment_all, query_terms, score_all, score_record, Record, SearchKind};

#[derive(Debug, Arbitrary)]
struct Input {
    titles: Vec<(String, String, String)>,
    query: String,
    kind: u8,
}

fuzz_target!(|input: Input| {
    let records: Vec<Record> = input
        .titles
        .into_iter()
        .take(64)
        .enumerate()
        .map(|(i, (cultivar, originator, date))| Record {
            id: i as u64,
            cultivar,
            originator,
            date,
            ..Record::default()
        })
        .collect();
    let db = augment_all(records);
    let kind = SearchKind::ALL_KINDS[input.kind as usize % SearchKind::ALL_KINDS.len()];
    let terms = query_terms(&input.query);

    let results = score_all(&terms, &db, kind);

    // INVARIANT 1: empty query finds nothing
    if terms.is_empty() {
        assert!(results.is_empty());
    }

    for result in &results {
        // INVARIANT 2: finite and positive
        assert!(result.score.is_finite() && result.score > 0.0);
        // INVARIANT 3: same score as scoring the record alone
        assert_eq!(result.score, score_record(&terms, &result.record, kind));
    }
});
