// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search scheduler: debounce, batch, cancel.
//!
//! Typing "festiva" fires seven `search()` calls in well under a second. We
//! want one scoring pass, for the last one, and we never want a pass to hog the
//! host's event loop. So:
//!
//! ```text
//! search("f") ─┐ arm incremental (100ms) + force (700ms)
//! search("fe") ┤ re-arm incremental only
//! search("fes")┘ re-arm incremental only
//!              │
//!   first timer fires ──► cancel both, run latest
//!                          │
//!                          ├─ batch 0 (sync) ── 5ms ── batch 1 ── ... ── last batch
//!                          │                                              │
//!                          │                             sink.search_results(..)
//!   search(..) meanwhile ──┘ generation += 1: pending batches become no-ops
//! ```
//!
//! The incremental timer restarts on every keystroke; the force timer does
//! not, so continuous typing still gets results within `force_delay`.
//!
//! # Driving it
//!
//! Nothing here sleeps. Every suspension point is a deadline in an internal
//! timer list. The host calls `next_deadline()`, waits however it likes, then
//! calls `tick(sink)`. Native code can just call `run_until_idle(sink)`.
//!
//! # Database readiness
//!
//! Augmentation goes through the same timer list, `batch_size` records per
//! step. Searches issued before it finishes are remembered (latest only) and
//! replayed exactly once, after a zero delay, when the database becomes ready.
//!
//! # Cancellation
//!
//! Every scoring pass carries the generation it was started with. Any new
//! search, or an empty query, bumps the generation and removes the pending
//! continuation. A continuation that fires with an old generation does nothing,
//! so cancelling one that already ran is harmless.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use super::clock::Clock;
use super::ResultSink;
use crate::build::Preparation;
use crate::config::SearchConfig;
use crate::scoring::{score_all, score_record};
use crate::types::{Database, Record, ScoredRecord, SearchKind};
use crate::util::query_terms;

/// Handle for a scheduled continuation.
pub type TimerId = u64;

/// What the scheduler is doing, as the outside world sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No database yet.
    Unloaded,
    /// Augmentation in progress.
    Preparing,
    /// Nothing to do.
    Idle,
    /// Debounce timers armed, waiting for typing to stop.
    PendingKeystrokeDelay,
    /// A batched scoring pass is in flight.
    Searching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Incremental,
    Force,
    ScoreBatch { generation: u64 },
    PrepareBatch,
    Replay,
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Debug, Clone)]
struct PendingSearch {
    query: String,
    kind: SearchKind,
}

#[derive(Debug)]
struct ScoringPass {
    generation: u64,
    search: PendingSearch,
    terms: Vec<String>,
    kind: SearchKind,
    cursor: usize,
    output: Vec<ScoredRecord>,
}

/// Debounced, batched, cancelable search driver.
pub struct SearchScheduler<C: Clock> {
    clock: C,
    config: SearchConfig,
    db: Option<Database>,
    preparation: Option<Preparation>,

    /// Latest search waiting for a timer (or for the database).
    pending: Option<PendingSearch>,
    incremental_timer: Option<TimerId>,
    force_timer: Option<TimerId>,
    progress_timer: Option<TimerId>,
    pass: Option<ScoringPass>,
    generation: u64,

    timers: Vec<Timer>,
    next_timer_id: TimerId,
    /// Latest time observed; scheduling never goes behind it.
    now: Duration,
}

impl<C: Clock> SearchScheduler<C> {
    /// A scheduler with no database. Call `init_db` before results can flow.
    pub fn new(clock: C, config: SearchConfig) -> Self {
        Self {
            clock,
            config,
            db: None,
            preparation: None,
            pending: None,
            incremental_timer: None,
            force_timer: None,
            progress_timer: None,
            pass: None,
            generation: 0,
            timers: Vec::new(),
            next_timer_id: 0,
            now: Duration::ZERO,
        }
    }

    /// A scheduler over an already-augmented database.
    pub fn with_database(clock: C, config: SearchConfig, db: Database) -> Self {
        let mut scheduler = Self::new(clock, config);
        scheduler.db = Some(db);
        scheduler
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Records per step. A zero batch would never finish, so it counts as one.
    fn batch_size(&self) -> usize {
        self.config.batch_size.max(1)
    }

    /// Has augmentation finished?
    pub fn is_ready(&self) -> bool {
        self.db.is_some()
    }

    /// The augmented database, once ready.
    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    pub fn state(&self) -> SchedulerState {
        if self.db.is_none() {
            if self.preparation.is_some() {
                SchedulerState::Preparing
            } else {
                SchedulerState::Unloaded
            }
        } else if self.pass.is_some() {
            SchedulerState::Searching
        } else if self.incremental_timer.is_some() || self.force_timer.is_some() {
            SchedulerState::PendingKeystrokeDelay
        } else {
            SchedulerState::Idle
        }
    }

    // =========================================================================
    // DATABASE PREPARATION
    // =========================================================================

    /// Start augmenting `records`. The first batch runs now; the rest are
    /// spaced `batch_delay` apart. `sink.database_ready` fires on completion.
    ///
    /// Calling it again restarts preparation. A search that was debouncing or
    /// running goes back to waiting for the new database.
    pub fn init_db<S: ResultSink + ?Sized>(&mut self, records: Vec<Record>, sink: &mut S) {
        debug!(records = records.len(), "preparing database");
        if self.pending.is_none() {
            self.pending = self.pass.as_ref().map(|pass| pass.search.clone());
        }
        self.cancel_debounce();
        self.cancel_pass();
        self.timers
            .retain(|timer| !matches!(timer.task, Task::PrepareBatch | Task::Replay));
        self.db = None;
        self.preparation = Some(Preparation::new(records));
        self.prepare_step(sink);
    }

    fn prepare_step<S: ResultSink + ?Sized>(&mut self, sink: &mut S) {
        let batch_size = self.batch_size();
        let Some(prep) = self.preparation.as_mut() else {
            return;
        };

        if !prep.step(batch_size) {
            let (done, total) = prep.progress();
            trace!(done, total, "preparation batch");
            self.schedule(self.config.batch_delay, Task::PrepareBatch);
            return;
        }

        if let Some(prep) = self.preparation.take() {
            let db = prep.finish();
            debug!(records = db.len(), "database ready");
            sink.database_ready(&db);
            self.db = Some(db);
            if self.pending.is_some() {
                self.schedule(Duration::ZERO, Task::Replay);
            }
        }
    }

    // =========================================================================
    // SEARCH REQUESTS
    // =========================================================================

    /// Request a search. See the module docs for the debounce rules.
    pub fn search(&mut self, query: &str, kind: SearchKind) {
        if self.db.is_none() {
            // Only the latest request survives until the database is ready.
            self.pending = (!query.trim().is_empty()).then(|| PendingSearch {
                query: query.to_string(),
                kind,
            });
            trace!(query, "database not ready, search deferred");
            return;
        }

        if query.trim().is_empty() {
            debug!("empty query, cancelling search");
            self.cancel_debounce();
            self.cancel_pass();
            self.pending = None;
            return;
        }

        let previous = self.incremental_timer.take();
        self.cancel(previous);
        self.incremental_timer = Some(self.schedule(self.config.incremental_delay, Task::Incremental));
        if self.force_timer.is_none() {
            self.force_timer = Some(self.schedule(self.config.force_delay, Task::Force));
        }

        self.cancel_pass();
        self.pending = Some(PendingSearch {
            query: query.to_string(),
            kind,
        });
    }

    /// Score the whole database right now, bypassing timers and batching.
    /// Empty until the database is ready.
    pub fn search_now(&self, query: &str, kind: SearchKind) -> Vec<ScoredRecord> {
        match &self.db {
            Some(db) => score_all(&query_terms(query), db, kind),
            None => Vec::new(),
        }
    }

    fn cancel_debounce(&mut self) {
        let incremental = self.incremental_timer.take();
        let force = self.force_timer.take();
        self.cancel(incremental);
        self.cancel(force);
    }

    fn cancel_pass(&mut self) {
        let progress = self.progress_timer.take();
        self.cancel(progress);
        if let Some(pass) = self.pass.take() {
            debug!(
                generation = pass.generation,
                scored = pass.cursor,
                "search pass superseded"
            );
        }
        self.generation += 1;
    }

    fn start_search<S: ResultSink + ?Sized>(&mut self, search: PendingSearch, sink: &mut S) {
        self.generation += 1;
        let terms = query_terms(&search.query);
        debug!(
            query = search.query.as_str(),
            kind = %search.kind,
            terms = terms.len(),
            generation = self.generation,
            "search started"
        );

        if terms.is_empty() {
            sink.search_results(Vec::new());
            return;
        }

        self.pass = Some(ScoringPass {
            generation: self.generation,
            kind: search.kind,
            search,
            terms,
            cursor: 0,
            output: Vec::new(),
        });
        self.score_batch(sink);
    }

    fn score_batch<S: ResultSink + ?Sized>(&mut self, sink: &mut S) {
        let Some(db) = self.db.as_ref().map(Arc::clone) else {
            return;
        };
        let batch_size = self.batch_size();
        let Some(pass) = self.pass.as_mut() else {
            return;
        };

        let end = db.len().min(pass.cursor + batch_size);
        for record in &db[pass.cursor..end] {
            let score = score_record(&pass.terms, record, pass.kind);
            if score > 0.0 {
                pass.output.push(ScoredRecord::new(Arc::clone(record), score));
            }
        }
        pass.cursor = end;

        if end < db.len() {
            trace!(scored = end, total = db.len(), "search batch");
            let generation = pass.generation;
            self.progress_timer =
                Some(self.schedule(self.config.batch_delay, Task::ScoreBatch { generation }));
            return;
        }

        if let Some(pass) = self.pass.take() {
            debug!(
                results = pass.output.len(),
                generation = pass.generation,
                "search finished"
            );
            sink.search_results(pass.output);
        }
    }

    // =========================================================================
    // TIMERS
    // =========================================================================

    fn current_time(&mut self) -> Duration {
        self.now = self.now.max(self.clock.now());
        self.now
    }

    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let due = self.current_time() + delay;
        self.timers.push(Timer { id, due, task });
        id
    }

    fn cancel(&mut self, id: Option<TimerId>) {
        if let Some(id) = id {
            self.timers.retain(|timer| timer.id != id);
        }
    }

    /// Earliest due timer, ties broken by scheduling order.
    fn pop_due(&mut self, now: Duration) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;
        Some(self.timers.swap_remove(index))
    }

    /// When the next continuation is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Run every continuation that is due now.
    pub fn tick<S: ResultSink + ?Sized>(&mut self, sink: &mut S) {
        let now = self.current_time();
        self.fire_due(now, sink);
    }

    /// Keep sleeping and ticking until no continuation is left.
    pub fn run_until_idle<S: ResultSink + ?Sized>(&mut self, sink: &mut S) {
        while let Some(deadline) = self.next_deadline() {
            self.clock.sleep_until(deadline);
            self.now = self.now.max(deadline);
            let now = self.current_time();
            self.fire_due(now, sink);
        }
    }

    fn fire_due<S: ResultSink + ?Sized>(&mut self, now: Duration, sink: &mut S) {
        while let Some(timer) = self.pop_due(now) {
            self.fire(timer, sink);
        }
    }

    fn fire<S: ResultSink + ?Sized>(&mut self, timer: Timer, sink: &mut S) {
        trace!(id = timer.id, task = ?timer.task, "timer fired");
        match timer.task {
            Task::Incremental | Task::Force => {
                self.cancel_debounce();
                if self.db.is_none() {
                    // Stays pending; replayed once the database is ready.
                    return;
                }
                if let Some(search) = self.pending.take() {
                    self.start_search(search, sink);
                }
            }
            Task::ScoreBatch { generation } => {
                let current = self
                    .pass
                    .as_ref()
                    .is_some_and(|pass| pass.generation == generation);
                if current {
                    self.progress_timer = None;
                    self.score_batch(sink);
                }
            }
            Task::PrepareBatch => self.prepare_step(sink),
            Task::Replay => {
                if let Some(search) = self.pending.take() {
                    debug!(query = search.query.as_str(), "replaying deferred search");
                    self.search(&search.query, search.kind);
                }
            }
        }
    }
}
