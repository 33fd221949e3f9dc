// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query unescaping.
//!
//! Queries arrive from a page header with arbitrary backslash sequences,
//! truncated `\x` escapes included.

#![no_main]

use libfuzzer_sys::fuzz_target;
use petal::{query_terms, unescape_query};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let unescaped = unescape_query(&raw);

    // INVARIANT 1: text without backslashes passes through untouched
    if !raw.contains('\\') {
        assert_eq!(unescaped, raw);
    }

    // INVARIANT 2: unescaping never grows the char count
    assert!(unescaped.chars().count() <= raw.chars().count());

    let _ = query_terms(&unescaped);
});
