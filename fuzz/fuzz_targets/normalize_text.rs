// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the text normalizer.
//!
//! Every title and every query goes through `normalize`, so it has to cope
//! with unterminated tags, stray ampersands, combining marks and whatever
//! else a registry export contains.

#![no_main]

use libfuzzer_sys::fuzz_target;
use petal::{normalize, query_terms, tokenize};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let once = normalize(&text);
    // INVARIANT 1: fixed point
    assert_eq!(normalize(&once), once, "normalize is not idempotent for {:?}", text);

    // INVARIANT 2: never two spaces in a row, never a leading space
    assert!(!once.contains("  "));
    assert!(!once.starts_with(' '));

    // INVARIANT 3: no empty tokens or terms
    assert!(tokenize(&text).iter().all(|t| !t.is_empty()));
    assert!(query_terms(&text).iter().all(|t| !t.is_empty()));
});
