//! End-to-end scheduling on a manual clock: preparation, debounce, force
//! delay, supersession and the view model on top.

use std::time::Duration;

use crate::common::{ids, loaded_model, registry, small_config, CollectingSink};
use petal::{
    Clock, HistoryState, ManualClock, SchedulerState, SearchConfig, SearchKind, SearchScheduler,
    SortField, ViewModel,
};

fn scheduler(config: SearchConfig) -> (SearchScheduler<ManualClock>, ManualClock, CollectingSink) {
    let clock = ManualClock::new();
    let mut scheduler = SearchScheduler::new(clock.clone(), config);
    let mut sink = CollectingSink::default();
    scheduler.init_db(registry(), &mut sink);
    (scheduler, clock, sink)
}

#[test]
fn test_preparation_runs_in_spaced_batches() {
    let (mut s, clock, mut sink) = scheduler(small_config());
    assert_eq!(s.state(), SchedulerState::Preparing);
    assert!(sink.ready.is_none());
    assert_eq!(s.next_deadline(), Some(Duration::from_millis(5)));

    s.run_until_idle(&mut sink);

    // 13 records, 4 per batch: three 5ms gaps.
    assert_eq!(clock.now(), Duration::from_millis(15));
    assert_eq!(sink.ready.as_ref().map(|db| db.len()), Some(13));
    assert_eq!(s.state(), SchedulerState::Idle);
    assert!(sink.deliveries.is_empty());
}

#[test]
fn test_search_before_ready_replays_latest_once() {
    let (mut s, _clock, mut sink) = scheduler(small_config());
    s.search("charm", SearchKind::All);
    s.search("festiva", SearchKind::All);
    s.run_until_idle(&mut sink);

    assert_eq!(sink.deliveries.len(), 1);
    assert_eq!(sink.last_ids(), Some(vec![1, 8]));
}

#[test]
fn test_typing_burst_searches_once() {
    let (mut s, clock, mut sink) = scheduler(small_config());
    s.run_until_idle(&mut sink);

    for query in ["f", "fe", "fes", "fest", "festi", "festiv", "festiva"] {
        s.search(query, SearchKind::All);
        clock.advance_ms(30);
        s.tick(&mut sink);
    }
    assert!(sink.deliveries.is_empty());
    assert_eq!(s.state(), SchedulerState::PendingKeystrokeDelay);

    s.run_until_idle(&mut sink);
    assert_eq!(sink.deliveries.len(), 1);
    assert_eq!(sink.last_ids(), Some(vec![1, 8]));
}

#[test]
fn test_force_delay_caps_continuous_typing() {
    let config = SearchConfig {
        batch_size: 100,
        ..SearchConfig::default()
    };
    let (mut s, clock, mut sink) = scheduler(config);
    assert!(s.is_ready());

    // A keystroke every 50ms never lets the 100ms debounce expire.
    for _ in 0..20 {
        s.search("festiva", SearchKind::All);
        clock.advance_ms(50);
        s.tick(&mut sink);
    }

    assert_eq!(sink.deliveries.len(), 1);
    assert_eq!(sink.last_ids(), Some(vec![1, 8]));
}

#[test]
fn test_new_search_supersedes_running_pass() {
    let (mut s, clock, mut sink) = scheduler(small_config());
    s.run_until_idle(&mut sink);

    s.search("charm", SearchKind::All);
    clock.advance_ms(100);
    s.tick(&mut sink);
    assert_eq!(s.state(), SchedulerState::Searching);

    s.search("festiva", SearchKind::All);
    s.run_until_idle(&mut sink);

    assert_eq!(sink.deliveries.len(), 1);
    assert_eq!(sink.last_ids(), Some(vec![1, 8]));
}

#[test]
fn test_empty_query_cancels_everything() {
    let (mut s, _clock, mut sink) = scheduler(small_config());
    s.run_until_idle(&mut sink);

    s.search("charm", SearchKind::All);
    s.search("  ", SearchKind::All);
    assert_eq!(s.state(), SchedulerState::Idle);
    s.run_until_idle(&mut sink);
    assert!(sink.deliveries.is_empty());
}

// =============================================================================
// VIEW MODEL
// =============================================================================

fn view_ids(vm: &ViewModel<ManualClock>) -> Vec<u64> {
    ids(&vm.page().view)
}

#[test]
fn test_catalog_pages_in_cultivar_order() {
    let mut vm = loaded_model(small_config());
    assert_eq!(vm.page().range, "[1 - 5 of 13]");
    assert_eq!(view_ids(&vm), vec![5, 3, 4, 10, 1]);

    assert!(vm.next());
    assert_eq!(view_ids(&vm), vec![8, 12, 6, 7, 9]);
    assert!(vm.next());
    assert_eq!(view_ids(&vm), vec![2, 11, 13]);
    assert_eq!(vm.page().range, "[11 - 13 of 13]");
    assert!(!vm.page().has_next);
    assert!(!vm.next());

    assert!(vm.goto(0));
    assert!(!vm.prev());
}

#[test]
fn test_date_sort_puts_undated_last() {
    let mut vm = loaded_model(small_config());
    vm.set_sorter("date").unwrap();
    assert_eq!(vm.results().sorter(), SortField::Date);
    assert_eq!(view_ids(&vm), vec![1, 10, 7, 6, 2]);

    vm.set_sorter("date").unwrap();
    assert!(!vm.results().direction().is_ascending());
    assert_eq!(view_ids(&vm), vec![13, 12, 5, 4, 8]);
}

#[test]
fn test_unknown_sorter_is_rejected() {
    let mut vm = loaded_model(small_config());
    assert!(matches!(
        vm.set_sorter("popularity"),
        Err(petal::Error::UnknownSorter(_))
    ));
    assert_eq!(vm.results().sorter(), SortField::Cultivar);
}

#[test]
fn test_search_then_filter_then_reset() {
    let mut vm = loaded_model(small_config());

    vm.set_query("charm");
    vm.run_until_idle();
    assert_eq!(vm.results().sorter(), SortField::Score);
    assert_eq!(view_ids(&vm), vec![4, 9]);

    vm.set_filter("s");
    assert_eq!(vm.query(), "");
    assert_eq!(view_ids(&vm), vec![2, 11]);
    assert_eq!(vm.results().sorter(), SortField::Cultivar);

    vm.reset();
    assert_eq!(vm.alpha(), "");
    assert_eq!(vm.page().total, 13);
}

#[test]
fn test_prefix_filter_uses_romanized_title() {
    let mut vm = loaded_model(small_config());
    vm.set_filter("L");
    assert_eq!(view_ids(&vm), vec![6]);
    vm.set_filter("M");
    assert_eq!(view_ids(&vm), vec![7]);
    vm.set_filter("Q");
    assert_eq!(vm.page().total, 0);
    assert_eq!(vm.page().range, "[0 results]");
}

#[test]
fn test_back_navigation_restores_exact_view() {
    let mut vm = loaded_model(small_config());
    vm.set_sorter("originator").unwrap();
    vm.next();
    let before = vm.page();
    let state = HistoryState::from_json(&vm.state().to_json().unwrap()).unwrap();

    let mut restored = ViewModel::new(ManualClock::new(), small_config(), Some(state)).unwrap();
    restored.load(registry());
    restored.run_until_idle();

    assert_eq!(restored.results().sorter(), SortField::Originator);
    assert_eq!(restored.results().page_no(), 1);
    assert_eq!(restored.page().view, before.view);
    assert_eq!(restored.page().range, before.range);
}

#[test]
fn test_stale_saved_state_falls_back_to_query() {
    let json = r#"{"search":"festiva","alpha":"","kind":"All","results":{"version":0,"sorter":"score","pageNo":1}}"#;
    let state = HistoryState::from_json(json).unwrap();
    assert!(state.results.is_none());

    let mut vm = ViewModel::new(ManualClock::new(), small_config(), Some(state)).unwrap();
    vm.load(registry());
    vm.run_until_idle();

    assert_eq!(vm.results().sorter(), SortField::Score);
    assert_eq!(vm.results().page_no(), 0);
    assert_eq!(view_ids(&vm), vec![1, 8]);
}

#[test]
fn test_page_views_are_published() {
    let mut vm = ViewModel::new(ManualClock::new(), small_config(), None).unwrap();
    let updates = vm.subscribe();
    vm.load(registry());
    vm.run_until_idle();
    vm.next();

    let views: Vec<_> = updates.try_iter().collect();
    assert!(views.len() >= 2);
    let last = views.last().unwrap();
    assert_eq!(last.page_no, 1);
    assert_eq!(last.total, 13);
}
