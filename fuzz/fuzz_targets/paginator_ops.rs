// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the paginator.
//!
//! Random sequences of sorter changes, page jumps and resets, optionally on
//! top of a saved state that may or may not fit. The current page must always
//! be a valid page and the view must match the page slice.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use petal::results::{ResultPaginator, ResultsState};
use petal::testing::make_db;
use petal::SortField;

#[derive(Debug, Arbitrary)]
enum Op {
    Sorter(u8),
    Goto(u8),
    Next,
    Prev,
    Reset(bool),
    SaveAndRestore,
}

#[derive(Debug, Arbitrary)]
struct Input {
    count: u8,
    page_size: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let titles: Vec<String> = (0..input.count).map(|i| format!("Cultivar {}", i % 7)).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let db = make_db(&refs);
    let page_size = usize::from(input.page_size).max(1);

    let mut pager = ResultPaginator::new(page_size, true, None);
    pager.init_db(&db);

    for op in input.ops.into_iter().take(64) {
        match op {
            Op::Sorter(i) => {
                let field = SortField::ALL[usize::from(i) % SortField::ALL.len()];
                let _ = pager.set_sorter(field.name());
            }
            Op::Goto(page) => {
                pager.goto(usize::from(page));
            }
            Op::Next => {
                pager.go_next();
            }
            Op::Prev => {
                pager.go_prev();
            }
            Op::Reset(force) => pager.reset_results(None, force),
            Op::SaveAndRestore => {
                let state: ResultsState = pager.state();
                let mut restored = ResultPaginator::new(page_size, true, Some(state));
                restored.init_db(&db);
                assert_eq!(restored.page(), pager.page());
                pager = restored;
            }
        }

        // INVARIANT: page in range, view is at most one page
        assert!(pager.page_no() < pager.page_count().max(1));
        assert!(pager.view().len() <= page_size);
    }
});
