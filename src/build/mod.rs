// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning a raw dataset into a searchable database.
//!
//! Augmentation runs exactly once per load. It can run all at once
//! (`augment_all`, `augment_all_parallel`) or a batch at a time through
//! `Preparation`, which is what the scheduler uses so a few thousand records
//! never block the host's event loop in one go.

pub mod date;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod record;

use std::sync::Arc;

use crate::types::{AugmentedRecord, Database, Record};

pub use date::date_sort_key;
#[cfg(feature = "parallel")]
pub use parallel::augment_all_parallel;
pub use record::populate_normalized;

/// Augment every record synchronously.
pub fn augment_all(records: Vec<Record>) -> Database {
    records
        .into_iter()
        .map(|record| Arc::new(populate_normalized(record)))
        .collect()
}

/// Batch-at-a-time augmentation.
///
/// Records move from `pending` to `done` in order; `finish` hands back the
/// database once every record has been processed.
#[derive(Debug)]
pub struct Preparation {
    pending: std::vec::IntoIter<Record>,
    done: Vec<Arc<AugmentedRecord>>,
    total: usize,
}

impl Preparation {
    pub fn new(records: Vec<Record>) -> Self {
        let total = records.len();
        Self {
            pending: records.into_iter(),
            done: Vec::with_capacity(total),
            total,
        }
    }

    /// Augment up to `batch_size` more records (at least one). Returns true
    /// once nothing is left.
    pub fn step(&mut self, batch_size: usize) -> bool {
        self.done.extend(
            self.pending
                .by_ref()
                .take(batch_size.max(1))
                .map(|record| Arc::new(populate_normalized(record))),
        );
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.done.len() == self.total
    }

    /// `(processed, total)`
    pub fn progress(&self) -> (usize, usize) {
        (self.done.len(), self.total)
    }

    /// The finished database. Only meaningful once `is_complete()`.
    pub fn finish(self) -> Database {
        self.done.into()
    }
}
