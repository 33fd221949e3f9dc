// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization: the one place that decides what a "token" is.
//!
//! Every field in the catalog and every query goes through `normalize` before
//! anything gets compared, so "Mme. Émile Lemoine" and "mme emile lemoine" end
//! up as the same `MME EMILE LEMOINE`. Records are normalized once at load
//! time; queries on every search.
//!
//! # Algorithm (with unicode-normalization feature)
//!
//! 1. NFD decompose (base letter + combining marks)
//! 2. One pass over the chars:
//!    - `A-Z a-z 0-9` and CJK ideographs pass through
//!    - a space passes unless the previous output was a space
//!    - `<...>` and `&...;` are dropped whole (HTML tags and entities)
//!    - `, - . / :` become a space unless the previous output was a space
//!    - everything else (combining marks included) is dropped
//! 3. Upper-case
//!
//! Without the feature the decomposition step is skipped, so accented letters
//! are dropped instead of folded.
//!
//! # CJK segmentation
//!
//! Bilingual titles carry a Chinese name with no spaces between words.
//! `split_cjk` breaks such runs into word-like units with UAX #29 word bounds
//! (`segmentation` feature). Without it, the whole run stays one token and
//! substring matching does the rest.

#[cfg(feature = "segmentation")]
use unicode_segmentation::UnicodeSegmentation;
#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    /// Keep CJK Unified Ideographs (U+4E00..=U+9FFF) instead of folding them away.
    pub keep_cjk: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { keep_cjk: true }
    }
}

impl Normalizer {
    /// ASCII-only normalizer: CJK text is dropped like any other symbol.
    pub fn ascii() -> Self {
        Self { keep_cjk: false }
    }

    /// Normalize a string for comparison. Never fails.
    #[cfg(feature = "unicode-normalization")]
    pub fn normalize(&self, text: &str) -> String {
        self.fold(text.nfd(), text.len())
    }

    /// Normalize a string for comparison. Never fails.
    #[cfg(not(feature = "unicode-normalization"))]
    pub fn normalize(&self, text: &str) -> String {
        self.fold(text.chars(), text.len())
    }

    fn fold(&self, mut chars: impl Iterator<Item = char>, capacity: usize) -> String {
        let mut out = String::with_capacity(capacity);
        // Starts as "just emitted a space" so leading separators are absorbed.
        let mut last = ' ';

        while let Some(c) = chars.next() {
            match c {
                'A'..='Z' | '0'..='9' => {
                    out.push(c);
                    last = c;
                }
                'a'..='z' => {
                    last = c.to_ascii_uppercase();
                    out.push(last);
                }
                ' ' if last != ' ' => {
                    out.push(' ');
                    last = ' ';
                }
                c if self.keep_cjk && is_cjk(c) => {
                    out.push(c);
                    last = c;
                }
                '<' => skip_past(&mut chars, '>'),
                '&' => skip_past(&mut chars, ';'),
                ',' | '-' | '.' | '/' | ':' if last != ' ' => {
                    out.push(' ');
                    last = ' ';
                }
                _ => {}
            }
        }

        out
    }
}

/// Consume chars up to and including `end`. Unterminated runs eat the rest.
fn skip_past(chars: &mut impl Iterator<Item = char>, end: char) {
    for c in chars.by_ref() {
        if c == end {
            break;
        }
    }
}

/// Normalize with the default (CJK-preserving) settings.
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

/// Normalize and split into tokens. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a raw query into search terms, segmenting any CJK runs.
pub fn query_terms(query: &str) -> Vec<String> {
    split_mixed_cjk(&normalize(query))
}

#[inline]
fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Does the string contain any CJK ideograph?
pub fn has_cjk(s: &str) -> bool {
    s.chars().any(is_cjk)
}

/// Split a run of CJK text into word-like units.
#[cfg(feature = "segmentation")]
pub fn split_cjk(s: &str) -> Vec<String> {
    let words: Vec<String> = s.unicode_words().map(str::to_string).collect();
    if words.is_empty() && !s.trim().is_empty() {
        vec![s.trim().to_string()]
    } else {
        words
    }
}

/// Split a run of CJK text into word-like units.
///
/// Without a segmenter the run stays whole and substring matching picks up
/// the slack.
#[cfg(not(feature = "segmentation"))]
pub fn split_cjk(s: &str) -> Vec<String> {
    let s = s.trim();
    if s.is_empty() {
        Vec::new()
    } else {
        vec![s.to_string()]
    }
}

/// Split on spaces, segmenting the CJK parts. Handles mixed-script queries.
pub fn split_mixed_cjk(s: &str) -> Vec<String> {
    let mut result = Vec::new();
    for part in s.split(' ').filter(|part| !part.is_empty()) {
        if has_cjk(part) {
            result.extend(split_cjk(part));
        } else {
            result.push(part.to_string());
        }
    }
    result
}
