// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The result paginator: the list on screen, its order and its page.
//!
//! The paginator owns the current result list (the whole catalog, a prefix
//! filter, or the last search) and everything about how it is shown. Every
//! change ends in a `PageView` snapshot pushed to subscribers, which is all a
//! render layer needs.
//!
//! # Restoring a previous visit
//!
//! A `ResultsState` passed to `new` is held until a result list of exactly
//! `count` records arrives, through either `search_results` or
//! `reset_results`. That list adopts the saved sorter, direction and page, and
//! the saved view is shown as-is. Sorting is deferred until the user actually
//! navigates or changes the sorter, so coming back to a page is free. The
//! saved state is used at most once.

pub mod navigation;
pub mod sort;
pub mod state;

pub use navigation::{breadcrumbs, page_count, range_label, BreadCrumb};
pub use sort::{Direction, SortField, SortMethod, SorterTable};
pub use state::{CachedResults, HistoryState, ResultsState, RESULTS_STATE_VERSION};

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::search::ResultSink;
use crate::types::{Database, ScoredRecord};

/// Everything a render layer needs for one screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub view: Vec<ScoredRecord>,
    pub pages: Vec<BreadCrumb>,
    pub range: String,
    pub has_next: bool,
    pub has_prev: bool,
    pub page_no: usize,
    pub page_count: usize,
    pub total: usize,
    pub sorter: SortField,
    pub direction: Direction,
}

/// Result list + sorter + page.
pub struct ResultPaginator {
    page_size: usize,
    db: Option<Database>,
    results: Vec<ScoredRecord>,
    sorters: SorterTable,
    /// Sorter to return to once a text search is cleared.
    non_score: SortField,
    page_no: usize,
    cached: CachedResults,
    pages: Vec<BreadCrumb>,
    /// Saved state waiting for a result list of matching size.
    prior: Option<ResultsState>,
    /// Restored lists are sorted on first use.
    unsorted: bool,
    subscribers: Vec<Sender<PageView>>,
}

impl ResultPaginator {
    /// `normalized` selects token comparison for the text sorters. A `prior`
    /// state from an older schema version is dropped immediately.
    pub fn new(page_size: usize, normalized: bool, prior: Option<ResultsState>) -> Self {
        let prior = prior.filter(|state| {
            let current = state.is_current_version();
            if !current {
                debug!(version = state.version, "discarding results state from another version");
            }
            current
        });

        Self {
            page_size: page_size.max(1),
            db: None,
            results: Vec::new(),
            sorters: SorterTable::new(normalized),
            non_score: SortField::DEFAULT,
            page_no: 0,
            cached: CachedResults::default(),
            pages: Vec::new(),
            prior,
            unsorted: false,
            subscribers: Vec::new(),
        }
    }

    /// Adopt the full catalog and show it with the remembered sorter.
    pub fn init_db(&mut self, db: &Database) {
        self.db = Some(Arc::clone(db));
        self.reset_results(None, false);
    }

    /// Adopt a search result list: best matches first, page 0.
    pub fn search_results(&mut self, results: Vec<ScoredRecord>) {
        self.results = results;
        if self.try_restore() {
            return;
        }

        self.sorters.assign(SortField::Score, false);
        self.sorters.method_mut(SortField::Score).reset();
        self.sort();
        self.show_page(0);
    }

    /// Adopt `results`, or the whole catalog, with the non-score sorter.
    ///
    /// `force_default_sort` goes back to cultivar ascending and makes it the
    /// remembered sorter.
    pub fn reset_results(&mut self, results: Option<Vec<ScoredRecord>>, force_default_sort: bool) {
        self.results = results.unwrap_or_else(|| self.all_records());
        if self.try_restore() {
            return;
        }

        if force_default_sort {
            self.non_score = SortField::DEFAULT;
            self.sorters.assign(SortField::DEFAULT, false);
            self.sorters.method_mut(SortField::DEFAULT).reset();
        } else {
            self.sorters.assign(self.non_score, false);
        }
        self.sort();
        self.show_page(0);
    }

    /// Pick a sorter by name. Re-picking the current one flips its direction.
    /// The page number stays put.
    pub fn set_sorter(&mut self, name: &str) -> Result<()> {
        let field: SortField = name.parse()?;
        self.prior = None;

        self.sorters.assign(field, true);
        if field != SortField::Score {
            self.non_score = field;
        }
        self.sort();
        self.refresh();
        Ok(())
    }

    /// Jump to a page. Returns false (and changes nothing) when out of range.
    pub fn goto(&mut self, page: usize) -> bool {
        if page > navigation::last_valid_page(self.results.len(), self.page_size) {
            return false;
        }
        self.prior = None;
        if self.unsorted {
            self.sort();
        }
        self.show_page(page);
        true
    }

    pub fn go_next(&mut self) -> bool {
        self.goto(self.page_no + 1)
    }

    pub fn go_prev(&mut self) -> bool {
        match self.page_no.checked_sub(1) {
            Some(page) => self.goto(page),
            None => false,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn page_no(&self) -> usize {
        self.page_no
    }

    pub fn page_count(&self) -> usize {
        page_count(self.results.len(), self.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn sorter(&self) -> SortField {
        self.sorters.current()
    }

    pub fn direction(&self) -> Direction {
        self.sorters.direction()
    }

    pub fn non_score_sorter(&self) -> SortField {
        self.non_score
    }

    pub fn sorters(&self) -> &SorterTable {
        &self.sorters
    }

    /// The full current list, in display order.
    pub fn results(&mut self) -> &[ScoredRecord] {
        if self.unsorted {
            self.sort();
        }
        &self.results
    }

    /// The rows on the current page.
    pub fn view(&self) -> &[ScoredRecord] {
        &self.cached.view
    }

    pub fn range(&self) -> &str {
        &self.cached.range
    }

    pub fn has_next(&self) -> bool {
        self.cached.has_next
    }

    pub fn has_prev(&self) -> bool {
        self.cached.has_prev
    }

    pub fn pages(&self) -> &[BreadCrumb] {
        &self.pages
    }

    /// Snapshot of the current screen.
    pub fn page(&self) -> PageView {
        PageView {
            view: self.cached.view.clone(),
            pages: self.pages.clone(),
            range: self.cached.range.clone(),
            has_next: self.cached.has_next,
            has_prev: self.cached.has_prev,
            page_no: self.page_no,
            page_count: self.page_count(),
            total: self.results.len(),
            sorter: self.sorter(),
            direction: self.direction(),
        }
    }

    /// State to persist for the next visit.
    pub fn state(&self) -> ResultsState {
        ResultsState {
            version: RESULTS_STATE_VERSION,
            sorter: self.sorter().name().to_string(),
            non_score_sorter: self.non_score.name().to_string(),
            page_no: self.page_no,
            direction: self.direction(),
            results: self.cached.clone(),
            count: self.results.len(),
        }
    }

    /// A channel that receives a `PageView` after every view change.
    pub fn subscribe(&mut self) -> Receiver<PageView> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn all_records(&self) -> Vec<ScoredRecord> {
        self.db
            .iter()
            .flat_map(|db| db.iter())
            .map(|record| ScoredRecord::unscored(Arc::clone(record)))
            .collect()
    }

    fn sort(&mut self) {
        self.sorters.sort(&mut self.results);
        self.unsorted = false;
    }

    /// Adopt the saved state if it fits the list just received.
    fn try_restore(&mut self) -> bool {
        let fits = self
            .prior
            .as_ref()
            .is_some_and(|state| state.count == self.results.len());
        if !fits {
            return false;
        }
        let Some(state) = self.prior.take() else {
            return false;
        };

        let (Ok(sorter), Ok(non_score)) = (
            state.sorter.parse::<SortField>(),
            state.non_score_sorter.parse::<SortField>(),
        ) else {
            debug!(sorter = state.sorter.as_str(), "discarding results state with unknown sorter");
            return false;
        };
        if state.page_no > navigation::last_valid_page(state.count, self.page_size) {
            debug!(page = state.page_no, "discarding results state with page out of range");
            return false;
        }

        debug!(count = state.count, page = state.page_no, %sorter, "restoring results state");
        self.sorters.restore(sorter, state.direction);
        self.non_score = if non_score == SortField::Score {
            SortField::DEFAULT
        } else {
            non_score
        };
        self.page_no = state.page_no;
        self.cached = state.results;
        self.pages = breadcrumbs(self.page_no, self.page_count());
        self.unsorted = true;
        self.notify();
        true
    }

    fn show_page(&mut self, page: usize) {
        self.page_no = page;
        self.refresh();
    }

    /// Recompute the view, range, flags and breadcrumbs for the current page.
    fn refresh(&mut self) {
        let total = self.results.len();
        let count = self.page_count();
        let start = (self.page_no * self.page_size).min(total);
        let end = (start + self.page_size).min(total);

        self.cached = CachedResults {
            view: self.results[start..end].to_vec(),
            range: range_label(start, end, total),
            has_next: navigation::has_next(self.page_no, count),
            has_prev: navigation::has_prev(self.page_no),
        };
        self.pages = breadcrumbs(self.page_no, count);
        self.notify();
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let page = self.page();
        self.subscribers.retain(|tx| tx.send(page.clone()).is_ok());
    }
}

impl ResultSink for ResultPaginator {
    fn database_ready(&mut self, db: &Database) {
        self.init_db(db);
    }

    fn search_results(&mut self, results: Vec<ScoredRecord>) {
        ResultPaginator::search_results(self, results);
    }
}
