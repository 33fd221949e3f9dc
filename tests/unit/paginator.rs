//! Paginator behavior on the fixture registry.

use std::sync::Arc;

use crate::common::{ids, make_db, registry_db};
use petal::results::{ResultPaginator, RESULTS_STATE_VERSION};
use petal::{query_terms, score_all, Direction, ScoredRecord, SearchKind, SortField};

fn charm_results() -> Vec<ScoredRecord> {
    score_all(&query_terms("charm"), &registry_db(), SearchKind::All)
}

#[test]
fn test_raw_mode_sorts_accents_after_ascii() {
    let db = make_db(&["Émile", "Fanny"]);

    let mut normalized = ResultPaginator::new(25, true, None);
    normalized.init_db(&db);
    assert_eq!(ids(normalized.view()), vec![0, 1]);

    let mut raw = ResultPaginator::new(25, false, None);
    raw.init_db(&db);
    assert_eq!(ids(raw.view()), vec![1, 0]);
}

#[test]
fn test_score_sorter_breaks_ties_by_arrival_order() {
    let db = registry_db();
    let mut pager = ResultPaginator::new(25, true, None);
    pager.init_db(&db);

    let mut results = charm_results();
    results.push(ScoredRecord::new(Arc::clone(&db[0]), 10.0));
    pager.search_results(results);

    assert_eq!(pager.sorter(), SortField::Score);
    assert_eq!(pager.direction(), Direction::Descending);
    assert_eq!(ids(pager.view()), vec![1, 4, 9]);
}

#[test]
fn test_search_state_restores_onto_same_results() {
    let db = registry_db();
    let mut pager = ResultPaginator::new(1, true, None);
    pager.init_db(&db);
    pager.search_results(charm_results());
    pager.set_sorter("originator").unwrap();
    assert!(pager.goto(1));
    let state = pager.state();
    assert_eq!(state.version, RESULTS_STATE_VERSION);
    assert_eq!(state.non_score_sorter, "originator");

    let mut restored = ResultPaginator::new(1, true, Some(state.clone()));
    restored.init_db(&db);
    // The catalog has 13 entries, the saved list 2: nothing restored yet.
    assert_eq!(restored.page_no(), 0);
    assert_eq!(restored.sorter(), SortField::Cultivar);

    restored.search_results(charm_results());
    assert_eq!(restored.sorter(), SortField::Originator);
    assert_eq!(restored.page_no(), 1);
    assert_eq!(restored.view(), pager.view());
    assert_eq!(restored.state(), state);
}

#[test]
fn test_restored_list_is_sorted_before_paging_on() {
    let db = registry_db();
    let mut pager = ResultPaginator::new(5, true, None);
    pager.init_db(&db);
    pager.set_sorter("country").unwrap();
    let first_page = pager.page();
    let state = pager.state();

    let mut restored = ResultPaginator::new(5, true, Some(state));
    restored.init_db(&db);
    assert_eq!(restored.page(), first_page);

    assert!(restored.go_next());
    assert!(pager.go_next());
    assert_eq!(restored.view(), pager.view());
}

#[test]
fn test_reset_with_force_default_sort() {
    let db = registry_db();
    let mut pager = ResultPaginator::new(5, true, None);
    pager.init_db(&db);
    pager.set_sorter("date").unwrap();
    pager.set_sorter("date").unwrap();
    assert_eq!(pager.direction(), Direction::Descending);

    pager.reset_results(None, false);
    assert_eq!(pager.sorter(), SortField::Date);

    pager.reset_results(None, true);
    assert_eq!(pager.sorter(), SortField::Cultivar);
    assert_eq!(pager.direction(), Direction::Ascending);
    assert_eq!(pager.non_score_sorter(), SortField::Cultivar);
    assert_eq!(ids(pager.view()), vec![5, 3, 4, 10, 1]);
}
