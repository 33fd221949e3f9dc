// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String helpers that everything else leans on.
//!
//! Normalization decides what counts as the same word; unescaping cleans up
//! queries that arrive double-escaped from the site header.

pub mod normalize;
pub mod unescape;

pub use normalize::{
    has_cjk, normalize, query_terms, split_cjk, split_mixed_cjk, tokenize, Normalizer,
};
pub use unescape::unescape_query;
