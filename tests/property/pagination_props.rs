//! Paging and sorting invariants.

use crate::common::make_full_record;
use petal::results::{breadcrumbs, page_count, ResultPaginator};
use petal::{augment_all, Database, SortField};
use proptest::prelude::*;

fn catalog() -> impl Strategy<Value = Database> {
    prop::collection::vec(("[A-Z][a-z]{0,6}", "[A-Z][a-z]{0,6}", 1800u32..2020), 0..60).prop_map(
        |rows| {
            augment_all(
                rows.iter()
                    .enumerate()
                    .map(|(i, (cultivar, originator, year))| {
                        make_full_record(i as u64, cultivar, originator, "", "", &year.to_string())
                    })
                    .collect(),
            )
        },
    )
}

fn sorter() -> impl Strategy<Value = SortField> {
    prop::sample::select(SortField::ALL.to_vec())
}

proptest! {
    /// Walking every page shows each record exactly once.
    #[test]
    fn prop_pages_partition_results(db in catalog(), page_size in 1usize..12) {
        let mut pager = ResultPaginator::new(page_size, true, None);
        pager.init_db(&db);

        let mut seen: Vec<u64> = pager.view().iter().map(|r| r.record.record.id).collect();
        while pager.go_next() {
            prop_assert!(pager.view().len() <= page_size);
            seen.extend(pager.view().iter().map(|r| r.record.record.id));
        }
        seen.sort_unstable();
        let mut all: Vec<u64> = db.iter().map(|r| r.record.id).collect();
        all.sort_unstable();
        prop_assert_eq!(seen, all);
        prop_assert_eq!(pager.page_no() + 1, page_count(db.len(), page_size).max(1));
    }

    /// Flipping a sorter twice gets back the same order.
    #[test]
    fn prop_double_toggle_is_identity(db in catalog(), field in sorter()) {
        let mut pager = ResultPaginator::new(1000, true, None);
        pager.init_db(&db);
        pager.set_sorter(field.name()).unwrap();
        let once: Vec<u64> = pager.view().iter().map(|r| r.record.record.id).collect();
        pager.set_sorter(field.name()).unwrap();
        pager.set_sorter(field.name()).unwrap();
        let thrice: Vec<u64> = pager.view().iter().map(|r| r.record.record.id).collect();
        prop_assert_eq!(once, thrice);
    }

    /// Out-of-range pages are refused without changing anything.
    #[test]
    fn prop_goto_out_of_range_is_noop(db in catalog(), page_size in 1usize..12, extra in 1usize..5) {
        let mut pager = ResultPaginator::new(page_size, true, None);
        pager.init_db(&db);
        let before = pager.page();
        let past = page_count(db.len(), page_size).max(1) - 1 + extra;
        prop_assert!(!pager.goto(past));
        prop_assert_eq!(pager.page(), before);
    }

    /// At most five numbered crumbs, exactly one selected when there are pages.
    #[test]
    fn prop_breadcrumb_window(count in 0usize..50, page in 0usize..50) {
        let page = if count == 0 { 0 } else { page % count };
        let crumbs = breadcrumbs(page, count);
        let numbered = crumbs.iter().filter(|c| c.label.parse::<usize>().is_ok()).count();
        prop_assert!(numbered <= 5);
        let selected = crumbs.iter().filter(|c| c.selected).count();
        prop_assert_eq!(selected, usize::from(count > 0));
    }
}
