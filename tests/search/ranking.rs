//! Ranking over the fixture registry: tiers, weights, adjacency and ties.

use crate::common::{approx_eq, ids, registry_db};
use petal::{query_terms, score_all, score_record, SearchKind};

fn search(query: &str, kind: SearchKind) -> Vec<petal::ScoredRecord> {
    score_all(&query_terms(query), &registry_db(), kind)
}

#[test]
fn test_exact_title_word_with_position_bonus() {
    let results = search("festiva", SearchKind::All);
    assert_eq!(ids(&results), vec![1, 8]);
    // (exact 1.0 + first position 0.15) x cultivar weight 3
    assert!(results.iter().all(|r| approx_eq(r.score, 3.45)));
}

#[test]
fn test_later_word_gets_no_position_bonus() {
    let results = search("charm", SearchKind::All);
    assert_eq!(ids(&results), vec![4, 9]);
    assert!(results.iter().all(|r| approx_eq(r.score, 3.0)));
}

#[test]
fn test_substring_matches_rank_lowest() {
    let results = search("arm", SearchKind::All);
    assert_eq!(ids(&results), vec![4, 9]);
    assert!(results.iter().all(|r| approx_eq(r.score, 0.75)));
}

#[test]
fn test_ordered_words_earn_adjacency_bonus() {
    let results = search("red charm", SearchKind::All);
    assert_eq!(ids(&results), vec![9]);
    // RED: 1.15 x 3, CHARM: (1.0 + 0.5 ordered + 0.15 position) x 3
    assert!(approx_eq(results[0].score, 3.45 + 4.95));
}

#[test]
fn test_prefix_of_second_word() {
    let results = search("coral ch", SearchKind::All);
    assert_eq!(ids(&results), vec![4]);
    assert!(approx_eq(results[0].score, 3.45 + 3.45));
}

#[test]
fn test_every_term_must_match() {
    assert!(search("festiva lemoine", SearchKind::All).is_empty());
    assert!(search("charm zzz", SearchKind::All).is_empty());
}

#[test]
fn test_title_outweighs_originator() {
    // Mme. Émile Lemoine has it in the title, Sarah Bernhardt only as originator.
    let db = registry_db();
    let terms = query_terms("lemoine");
    let title = db.iter().find(|r| r.record.id == 7).unwrap();
    let originator = db.iter().find(|r| r.record.id == 2).unwrap();
    assert!(approx_eq(score_record(&terms, title, SearchKind::All), 3.0));
    assert!(approx_eq(score_record(&terms, originator, SearchKind::All), 2.3));
}

#[test]
fn test_description_is_searched_by_all_only() {
    let all = search("flecks", SearchKind::All);
    assert_eq!(ids(&all), vec![1]);
    assert!(search("flecks", SearchKind::Cultivar).is_empty());
}

#[test]
fn test_punctuation_only_query_matches_nothing() {
    assert!(search("--", SearchKind::All).is_empty());
    assert!(search("   ", SearchKind::All).is_empty());
}

#[test]
fn test_case_and_punctuation_insensitive() {
    assert_eq!(
        ids(&search("CORAL-CHARM", SearchKind::All)),
        ids(&search("coral charm", SearchKind::All))
    );
}
