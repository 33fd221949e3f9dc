// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The A-Z strip: filter by the first letter of the title.

use std::sync::Arc;

use crate::types::{AugmentedRecord, Record};

/// The letters offered by the prefix strip.
pub fn prefixes() -> impl Iterator<Item = char> {
    'A'..='Z'
}

/// Something that knows the upper-case text its title starts with.
pub trait PrefixKey {
    fn starts_with_prefix(&self, prefix: &str) -> bool;
}

impl PrefixKey for Record {
    fn starts_with_prefix(&self, prefix: &str) -> bool {
        self.cultivar.to_uppercase().starts_with(prefix)
    }
}

/// Uses the first normalized title token. A record with an empty title only
/// matches the empty prefix.
impl PrefixKey for AugmentedRecord {
    fn starts_with_prefix(&self, prefix: &str) -> bool {
        self.cultivar_norm
            .first()
            .map_or(prefix.is_empty(), |token| token.starts_with(prefix))
    }
}

impl<T: PrefixKey + ?Sized> PrefixKey for Arc<T> {
    fn starts_with_prefix(&self, prefix: &str) -> bool {
        (**self).starts_with_prefix(prefix)
    }
}

/// Records whose title starts with `letter`, case-insensitively, in input order.
pub fn prefix_filter<T: PrefixKey + Clone>(db: &[T], letter: &str) -> Vec<T> {
    let prefix = letter.to_uppercase();
    db.iter()
        .filter(|record| record.starts_with_prefix(&prefix))
        .cloned()
        .collect()
}
