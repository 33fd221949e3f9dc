// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! Every query term has to match somewhere in the record, or the record is out.
//! Terms that do match earn a tier score from the best token they hit, a bonus
//! when they sit next to another match, and a multiplier from the field they
//! were found in.
//!
//! # Match tiers
//!
//! | Match     | Score | Example (term → token)  |
//! |-----------|-------|-------------------------|
//! | Exact     | 1.0   | `FESTIVA` → `FESTIVA`   |
//! | Prefix    | 0.5   | `FEST` → `FESTIVA`      |
//! | Substring | 0.25  | `TIVA` → `FESTIVA`      |
//!
//! # Bonuses
//!
//! - **Ordered adjacency** (+0.5): the previous token matched the previous term.
//!   "festiva maxima" against `FESTIVA MAXIMA` gets it on `MAXIMA`.
//! - **Loose adjacency** (+0.2): the previous token matched some other term.
//! - **Position** (+0.15): term index equals token index.
//!
//! # Field weights
//!
//! | Field          | `All` | Specific kind |
//! |----------------|-------|---------------|
//! | Cultivar       | 3.0   | 1.0           |
//! | Native cultivar| 3.0   | 1.0 (with `Cultivar`) |
//! | Originator     | 2.0   | 1.0           |
//! | Group          | 1.5   | 1.0           |
//! | Description    | 1.0   | -             |
//! | Country, Date  | 1.0   | 1.0           |
//!
//! Per term, the best weighted score across all tokens of all fields wins.
//! Fields never add up: a term that appears in the title and the description
//! is worth its title score, not both.

use std::sync::Arc;

use crate::types::{AugmentedRecord, Field, ScoredRecord, SearchKind};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Term equals the token.
pub const EXACT_SCORE: f64 = 1.0;

/// Token starts with the term and is longer.
pub const PREFIX_SCORE: f64 = 0.5;

/// Term occurs inside the token, not at its start.
pub const SUBSTRING_SCORE: f64 = 0.25;

/// Previous token matched the previous term.
pub const ORDERED_ADJACENCY_BONUS: f64 = 0.5;

/// Previous token matched any term.
pub const ADJACENCY_BONUS: f64 = 0.2;

/// Term index equals token index.
pub const POSITION_BONUS: f64 = 0.15;

const ALL_WEIGHTS: &[(Field, f64)] = &[
    (Field::Cultivar, 3.0),
    (Field::NativeCultivar, 3.0),
    (Field::Description, 1.0),
    (Field::Group, 1.5),
    (Field::Originator, 2.0),
    (Field::Country, 1.0),
    (Field::Date, 1.0),
];
const CULTIVAR_WEIGHTS: &[(Field, f64)] = &[(Field::Cultivar, 1.0), (Field::NativeCultivar, 1.0)];
const ORIGINATOR_WEIGHTS: &[(Field, f64)] = &[(Field::Originator, 1.0)];
const GROUP_WEIGHTS: &[(Field, f64)] = &[(Field::Group, 1.0)];
const COUNTRY_WEIGHTS: &[(Field, f64)] = &[(Field::Country, 1.0)];
const DATE_WEIGHTS: &[(Field, f64)] = &[(Field::Date, 1.0)];

/// The fields a search kind looks at, with their weights.
pub fn field_weights(kind: SearchKind) -> &'static [(Field, f64)] {
    match kind {
        SearchKind::All => ALL_WEIGHTS,
        SearchKind::Cultivar => CULTIVAR_WEIGHTS,
        SearchKind::Originator => ORIGINATOR_WEIGHTS,
        SearchKind::Group => GROUP_WEIGHTS,
        SearchKind::Country => COUNTRY_WEIGHTS,
        SearchKind::Date => DATE_WEIGHTS,
    }
}

// =============================================================================
// MATCHING
// =============================================================================

/// Tier score for one term against one token, or `None` when it doesn't match.
#[inline]
pub fn term_match_score(term: &str, token: &str) -> Option<f64> {
    if term.is_empty() || term.len() > token.len() {
        return None;
    }
    match token.find(term)? {
        0 if term.len() == token.len() => Some(EXACT_SCORE),
        0 => Some(PREFIX_SCORE),
        _ => Some(SUBSTRING_SCORE),
    }
}

/// One field pass: fold the field's best weighted score per term into `best`.
///
/// `prevs[j]` tracks whether term `j` matched the previous token. It is reset
/// at the start of every field, so adjacency never spans two fields.
pub fn match_field(
    terms: &[String],
    tokens: &[String],
    weight: f64,
    best: &mut [f64],
    prevs: &mut [bool],
) {
    debug_assert_eq!(terms.len(), best.len());
    debug_assert_eq!(terms.len(), prevs.len());

    prevs.fill(false);

    let mut any_prev = false;
    for (i, token) in tokens.iter().enumerate() {
        let mut any_match = false;
        // Did term j-1 match token i-1? Carried across the inner loop.
        let mut ordered_prev = false;

        for (j, term) in terms.iter().enumerate() {
            let tier = term_match_score(term, token);

            if let Some(mut score) = tier {
                if ordered_prev {
                    score += ORDERED_ADJACENCY_BONUS;
                } else if any_prev {
                    score += ADJACENCY_BONUS;
                }
                if i == j {
                    score += POSITION_BONUS;
                }
                best[j] = best[j].max(score * weight);
            }

            ordered_prev = prevs[j];
            prevs[j] = tier.is_some();
            any_match |= tier.is_some();
        }

        any_prev = any_match;
    }
}

/// Score a record against normalized query terms.
///
/// Returns 0 when `terms` is empty or any term matched nowhere; otherwise the
/// sum of the per-term best scores.
pub fn score_record(terms: &[String], record: &AugmentedRecord, kind: SearchKind) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }

    let mut best = vec![0.0; terms.len()];
    let mut prevs = vec![false; terms.len()];

    for &(field, weight) in field_weights(kind) {
        match_field(terms, record.tokens(field), weight, &mut best, &mut prevs);
    }

    if best.iter().any(|&score| score == 0.0) {
        return 0.0;
    }
    best.iter().sum()
}

/// Score every record synchronously, keeping matches in database order.
pub fn score_all(
    terms: &[String],
    db: &[Arc<AugmentedRecord>],
    kind: SearchKind,
) -> Vec<ScoredRecord> {
    db.iter()
        .filter_map(|record| {
            let score = score_record(terms, record, kind);
            (score > 0.0).then(|| ScoredRecord::new(Arc::clone(record), score))
        })
        .collect()
}
