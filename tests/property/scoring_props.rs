//! Scoring invariants over random catalogs.

use crate::common::make_record;
use petal::scoring::{term_match_score, EXACT_SCORE, PREFIX_SCORE, SUBSTRING_SCORE};
use petal::{augment_all, query_terms, score_all, score_record, Database, SearchKind};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,7}"
}

fn catalog() -> impl Strategy<Value = Database> {
    prop::collection::vec(prop::collection::vec(word(), 1..4), 0..25).prop_map(|titles| {
        augment_all(
            titles
                .iter()
                .enumerate()
                .map(|(i, words)| make_record(i as u64, &words.join(" ")))
                .collect(),
        )
    })
}

fn kind() -> impl Strategy<Value = SearchKind> {
    prop::sample::select(SearchKind::ALL_KINDS.to_vec())
}

proptest! {
    /// Exact beats prefix beats substring beats nothing.
    #[test]
    fn prop_tier_ordering(token in "[A-Z]{2,10}", cut in 1usize..10) {
        let cut = cut.min(token.len());
        let prefix = &token[..cut];
        let exact = term_match_score(&token, &token);
        prop_assert_eq!(exact, Some(EXACT_SCORE));

        let tier = term_match_score(prefix, &token).unwrap();
        if cut == token.len() {
            prop_assert_eq!(tier, EXACT_SCORE);
        } else {
            prop_assert_eq!(tier, PREFIX_SCORE);
        }

        let suffix = &token[token.len() - 1..];
        let score = term_match_score(suffix, &token).unwrap();
        prop_assert!(score >= SUBSTRING_SCORE);
        let longer = format!("{}Q", token);
        prop_assert!(term_match_score(&longer, &token).is_none());
    }

    /// Results are exactly the records with a positive score, in database order.
    #[test]
    fn prop_inclusion_matches_score(db in catalog(), query in "[a-z]{1,3}( [a-z]{1,3}){0,2}", kind in kind()) {
        let terms = query_terms(&query);
        let results = score_all(&terms, &db, kind);
        let expected: Vec<u64> = db
            .iter()
            .filter(|r| score_record(&terms, r, kind) > 0.0)
            .map(|r| r.record.id)
            .collect();
        let got: Vec<u64> = results.iter().map(|r| r.record.record.id).collect();
        prop_assert_eq!(got, expected);
    }

    /// Adding a term can only narrow the result set.
    #[test]
    fn prop_more_terms_never_add_results(db in catalog(), a in word(), b in word()) {
        let one: Vec<u64> = score_all(&query_terms(&a), &db, SearchKind::All)
            .iter()
            .map(|r| r.record.record.id)
            .collect();
        let two = score_all(&query_terms(&format!("{} {}", a, b)), &db, SearchKind::All);
        for r in &two {
            prop_assert!(one.contains(&r.record.record.id));
        }
    }

    /// Every title finds itself.
    #[test]
    fn prop_title_finds_itself(db in catalog()) {
        for record in db.iter() {
            let results = score_all(&query_terms(&record.record.cultivar), &db, SearchKind::Cultivar);
            prop_assert!(results.iter().any(|r| r.record.record.id == record.record.id));
        }
    }

    /// Scoring the same thing twice gives the same answer.
    #[test]
    fn prop_scoring_is_deterministic(db in catalog(), query in "[a-z]{1,4}") {
        let terms = query_terms(&query);
        prop_assert_eq!(score_all(&terms, &db, SearchKind::All), score_all(&terms, &db, SearchKind::All));
    }
}
