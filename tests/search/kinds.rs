//! Search kinds restrict which fields are looked at.

use crate::common::{approx_eq, ids, registry_db};
use petal::{naive_search, query_terms, score_all, SearchKind};

fn search(query: &str, kind: SearchKind) -> Vec<u64> {
    ids(&score_all(&query_terms(query), &registry_db(), kind))
}

#[test]
fn test_originator_kind() {
    let results = score_all(&query_terms("lemoine"), &registry_db(), SearchKind::Originator);
    assert_eq!(ids(&results), vec![2, 7]);
    // Specific kinds weigh every field 1.
    assert!(results.iter().all(|r| approx_eq(r.score, 1.15)));
}

#[test]
fn test_group_kind() {
    assert_eq!(search("itoh", SearchKind::Group), vec![5, 12]);
    assert!(search("itoh", SearchKind::Cultivar).is_empty());
}

#[test]
fn test_country_kind() {
    assert_eq!(search("france", SearchKind::Country), vec![1, 2, 7, 10]);
    assert_eq!(search("united states", SearchKind::Country), vec![4, 5, 8, 9, 11, 12]);
}

#[test]
fn test_date_kind_matches_numeric_dates() {
    assert_eq!(search("1906", SearchKind::Date), vec![2]);
    // Kopper Kettle's date arrives as a JSON number.
    assert_eq!(search("1999", SearchKind::Date), vec![12]);
    assert_eq!(search("bef", SearchKind::Date), vec![6]);
}

#[test]
fn test_cultivar_kind_ignores_originator() {
    assert_eq!(search("lemoine", SearchKind::Cultivar), vec![7]);
}

#[test]
fn test_naive_search_agrees_on_simple_queries() {
    let db = registry_db();
    assert_eq!(ids(&naive_search(&db, "charm", SearchKind::All)), vec![4, 9]);
    assert_eq!(ids(&naive_search(&db, "Lemoine", SearchKind::Originator)), vec![2, 7]);
    assert!(naive_search(&db, "", SearchKind::All).is_empty());
}
