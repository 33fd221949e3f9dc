// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search page, minus the page.
//!
//! `ViewModel` wires the scheduler to the paginator and keeps the bits of
//! state a search page has: the query box, the kind selector and the A-Z
//! filter. A render layer calls the `set_*`/`next`/`prev`/`reset` methods in
//! response to clicks, drives `tick()` off its timer, and repaints from the
//! `PageView`s it receives via `subscribe()`.
//!
//! Until the database is ready, query and filter changes are only recorded.
//! Once it is, the recorded state is applied: a query wins over a filter,
//! and with neither the whole catalog is shown.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::results::{HistoryState, PageView, ResultPaginator};
use crate::search::{prefix_filter, prefixes, Clock, SearchScheduler};
use crate::types::{Record, ScoredRecord, SearchKind};

/// Query box, kind selector, A-Z filter, scheduler and paginator.
pub struct ViewModel<C: Clock> {
    scheduler: SearchScheduler<C>,
    results: ResultPaginator,
    query: String,
    kind: SearchKind,
    alpha: String,
    ready: bool,
}

impl<C: Clock> ViewModel<C> {
    /// Build a view model, optionally picking up where a previous visit left off.
    pub fn new(clock: C, config: SearchConfig, initial: Option<HistoryState>) -> Result<Self> {
        config.validate()?;
        let initial = initial.unwrap_or_default();

        Ok(Self {
            results: ResultPaginator::new(config.page_size, true, initial.results),
            scheduler: SearchScheduler::new(clock, config),
            query: initial.search,
            kind: initial.kind,
            alpha: initial.alpha,
            ready: false,
        })
    }

    /// Start preparing the dataset. The first batch runs before this returns.
    pub fn load(&mut self, records: Vec<Record>) {
        self.scheduler.init_db(records, &mut self.results);
        self.check_ready();
    }

    /// Run whatever the scheduler has due.
    pub fn tick(&mut self) {
        self.scheduler.tick(&mut self.results);
        self.check_ready();
    }

    /// Drive everything to completion, sleeping on the clock in between.
    pub fn run_until_idle(&mut self) {
        loop {
            self.scheduler.run_until_idle(&mut self.results);
            if !self.check_ready() {
                break;
            }
        }
    }

    /// When the host should call `tick()` next.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Apply the recorded state the first time the database shows up.
    /// Returns true if that happened on this call.
    fn check_ready(&mut self) -> bool {
        if self.ready || !self.scheduler.is_ready() {
            return false;
        }
        self.ready = true;
        debug!(
            query = self.query.as_str(),
            alpha = self.alpha.as_str(),
            "view model ready"
        );

        // With neither, the paginator already shows (or restored) the catalog.
        if !self.query.is_empty() {
            self.on_change();
        } else if !self.alpha.is_empty() {
            let alpha = self.alpha.clone();
            self.set_filter(&alpha);
        }
        true
    }

    // =========================================================================
    // USER ACTIONS
    // =========================================================================

    /// The query box changed.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.on_change();
    }

    /// The kind selector changed.
    pub fn set_kind(&mut self, kind: SearchKind) {
        self.kind = kind;
        self.on_change();
    }

    fn on_change(&mut self) {
        if !self.ready {
            return;
        }

        if self.query.trim().is_empty() {
            // Drops any search still waiting on its debounce.
            self.scheduler.search("", self.kind);
            if self.alpha.is_empty() {
                self.results.reset_results(None, false);
            }
            return;
        }

        self.alpha.clear();
        self.scheduler.search(&self.query, self.kind);
    }

    /// Show only titles starting with `letter`. Clears the query.
    pub fn set_filter(&mut self, letter: &str) {
        self.alpha = letter.to_uppercase();
        self.query.clear();
        self.scheduler.search("", self.kind);

        if let Some(db) = self.ready.then(|| self.scheduler.database()).flatten() {
            let filtered: Vec<ScoredRecord> = prefix_filter(db, &self.alpha)
                .into_iter()
                .map(ScoredRecord::unscored)
                .collect();
            debug!(letter = self.alpha.as_str(), results = filtered.len(), "prefix filter");
            self.results.reset_results(Some(filtered), false);
        }
    }

    /// Clear query and filter and go back to the catalog in default order.
    pub fn reset(&mut self) {
        self.alpha.clear();
        self.query.clear();
        self.scheduler.search("", self.kind);
        if self.ready {
            self.results.reset_results(None, true);
        }
    }

    pub fn next(&mut self) -> bool {
        self.results.go_next()
    }

    pub fn prev(&mut self) -> bool {
        self.results.go_prev()
    }

    pub fn goto(&mut self, page: usize) -> bool {
        self.results.goto(page)
    }

    pub fn set_sorter(&mut self, name: &str) -> Result<()> {
        self.results.set_sorter(name)
    }

    // =========================================================================
    // STATE
    // =========================================================================

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    /// Active prefix letter, empty when none.
    pub fn alpha(&self) -> &str {
        &self.alpha
    }

    /// Letters for the A-Z strip.
    pub fn prefixes(&self) -> Vec<char> {
        prefixes().collect()
    }

    pub fn results(&self) -> &ResultPaginator {
        &self.results
    }

    pub fn scheduler(&self) -> &SearchScheduler<C> {
        &self.scheduler
    }

    /// Current screen.
    pub fn page(&self) -> PageView {
        self.results.page()
    }

    pub fn subscribe(&mut self) -> Receiver<PageView> {
        self.results.subscribe()
    }

    /// What to persist so a later visit can restore this one.
    pub fn state(&self) -> HistoryState {
        HistoryState {
            search: self.query.clone(),
            alpha: self.alpha.clone(),
            kind: self.kind,
            results: Some(self.results.state()),
        }
    }
}
