// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel augmentation and scoring for native callers.
//!
//! Augmenting a record touches only that record, so the whole pass is
//! embarrassingly parallel: `par_iter()` over the dataset and collect in
//! order. The browser path never uses this; it prepares batch by batch on one
//! thread through the scheduler instead.

use rayon::prelude::*;
use std::sync::Arc;

use super::populate_normalized;
use crate::scoring::score_record;
use crate::types::{AugmentedRecord, Database, Record, ScoredRecord, SearchKind};

/// Augment every record across the rayon pool. Output order matches input order.
pub fn augment_all_parallel(records: Vec<Record>) -> Database {
    records
        .into_par_iter()
        .map(|record| Arc::new(populate_normalized(record)))
        .collect::<Vec<_>>()
        .into()
}

/// Score the whole database across the rayon pool, keeping matches in database order.
pub fn score_all_parallel(
    terms: &[String],
    db: &[Arc<AugmentedRecord>],
    kind: SearchKind,
) -> Vec<ScoredRecord> {
    db.par_iter()
        .filter_map(|record| {
            let score = score_record(terms, record, kind);
            (score > 0.0).then(|| ScoredRecord::new(Arc::clone(record), score))
        })
        .collect()
}
