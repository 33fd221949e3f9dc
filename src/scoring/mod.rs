// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers and their order.
//!
//! `core` turns a query and a record into a score. `ranking` holds the
//! comparators the paginator sorts with. Scores are returned alongside the
//! record, never stored on it.

mod core;
pub mod ranking;

pub use core::*;
pub use ranking::compare_records;
