// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::sync::Arc;

use crate::build::populate_normalized;
use crate::search::ResultSink;
use crate::types::{AugmentedRecord, Database, Record, ScoredRecord};

/// Create a simple test record with just a title.
///
/// This is the canonical implementation used across all tests.
pub fn make_record(id: u64, cultivar: &str) -> Record {
    Record {
        id,
        cultivar: cultivar.to_string(),
        url: format!("/registry/{}", id),
        ..Record::default()
    }
}

/// Create a test record with the fields the sorters look at.
pub fn make_full_record(
    id: u64,
    cultivar: &str,
    originator: &str,
    group: &str,
    country: &str,
    date: &str,
) -> Record {
    Record {
        id,
        cultivar: cultivar.to_string(),
        originator: originator.to_string(),
        group: group.to_string(),
        country: country.to_string(),
        date: date.to_string(),
        url: format!("/registry/{}", id),
        ..Record::default()
    }
}

/// Augment a single record behind an `Arc`.
pub fn make_augmented(id: u64, cultivar: &str) -> Arc<AugmentedRecord> {
    Arc::new(populate_normalized(make_record(id, cultivar)))
}

/// Build a database from titles; ids follow the slice order.
pub fn make_db(titles: &[&str]) -> Database {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| make_augmented(i as u64, title))
        .collect()
}

/// `ResultSink` that records everything delivered to it.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub deliveries: Vec<Vec<ScoredRecord>>,
    pub ready: Option<Database>,
}

impl CollectingSink {
    /// Ids of the most recent delivery, in delivery order.
    pub fn last_ids(&self) -> Option<Vec<u64>> {
        self.deliveries
            .last()
            .map(|results| results.iter().map(|r| r.record.record.id).collect())
    }
}

impl ResultSink for CollectingSink {
    fn database_ready(&mut self, db: &Database) {
        self.ready = Some(Arc::clone(db));
    }

    fn search_results(&mut self, results: Vec<ScoredRecord>) {
        self.deliveries.push(results);
    }
}
