// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-record augmentation: raw fields in, cached tokens out.

use super::date::date_sort_key;
use crate::types::{AugmentedRecord, Record};
use crate::util::{has_cjk, normalize, split_mixed_cjk, tokenize};

/// Normalize every searchable field of a record once.
///
/// Bilingual titles look like `洛阳红/Luoyang Hong`. When the part before the
/// first `/` contains CJK, it becomes the segmented native title and the part
/// after it becomes the romanized title. Any other title is tokenized whole,
/// slash and all.
pub fn populate_normalized(record: Record) -> AugmentedRecord {
    let (native_cultivar_norm, cultivar_norm) = split_title(&record.cultivar);

    AugmentedRecord {
        cultivar_norm,
        native_cultivar_norm,
        originator_norm: tokenize(&record.originator),
        group_norm: tokenize(&record.group),
        country_norm: tokenize(&record.country),
        date_norm: tokenize(&record.date),
        description_norm: tokenize(&record.description),
        date_value: date_sort_key(&record.date),
        record,
    }
}

/// Returns `(native, romanized)` token arrays for a title.
fn split_title(title: &str) -> (Vec<String>, Vec<String>) {
    let mut parts = title.splitn(3, '/');
    if let (Some(native), Some(romanized)) = (parts.next(), parts.next()) {
        if has_cjk(native) {
            return (split_mixed_cjk(&normalize(native)), tokenize(romanized));
        }
    }
    (Vec::new(), tokenize(title))
}
