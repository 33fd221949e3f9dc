// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the fallible edges of the crate.
//!
//! The search core itself never fails: bad records normalize to empty tokens,
//! out-of-range pages are ignored, stale state is discarded. Errors only come
//! from the places that touch the outside world (JSON, files, configuration)
//! or from callers naming things that don't exist.

use thiserror::Error;

/// Result type alias for petal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the crate's I/O and configuration boundaries.
#[derive(Debug, Error)]
pub enum Error {
    /// Record dataset or persisted state could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a dataset or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sorter name outside the fixed sorter set.
    #[error("unknown sorter: {0}")]
    UnknownSorter(String),

    /// A search kind outside `All | Cultivar | Originator | Group | Country | Date`.
    #[error("unknown search kind: {0}")]
    UnknownKind(String),

    /// Configuration values that would stall the scheduler or paginator.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
