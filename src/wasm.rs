// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the registry search page.
//!
//! The page owns the timers. After every call that may have scheduled work it
//! asks `nextDelay()` and sets a `setTimeout` for that many milliseconds that
//! calls `tick()`. Every view change is pushed to the `onUpdate` callback.
//!
//! ```js
//! const searcher = new PetalSearcher({ pageSize: 25 }, history.state, view => render(view));
//! const pump = () => {
//!   const delay = searcher.nextDelay();
//!   if (delay >= 0) setTimeout(() => { searcher.tick(); pump(); }, delay);
//! };
//! searcher.load(await (await fetch(dataUrl)).json()); pump();
//! input.oninput = () => { searcher.search(input.value, kind.value); pump(); };
//! ```

use std::sync::mpsc::Receiver;
use std::time::Duration;

use js_sys::{Date, Function};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::config::SearchConfig;
use crate::results::{HistoryState, PageView};
use crate::search::Clock;
use crate::types::{Record, SearchKind};
use crate::viewmodel::ViewModel;

/// `Date.now()` relative to when the searcher was created. Cannot block.
#[derive(Debug, Clone, Copy)]
pub struct JsClock {
    origin_ms: f64,
}

impl JsClock {
    pub fn new() -> Self {
        Self {
            origin_ms: Date::now(),
        }
    }
}

impl Default for JsClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for JsClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64((Date::now() - self.origin_ms).max(0.0) / 1000.0)
    }

    fn sleep_until(&self, _deadline: Duration) {}
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `undefined`/`null` decode to `None`.
fn optional<T: DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(None)
    } else {
        from_value(value).map(Some).map_err(js_error)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(js_error)
}

/// The search page's view model, driven from JavaScript.
#[wasm_bindgen]
pub struct PetalSearcher {
    model: ViewModel<JsClock>,
    events: Receiver<PageView>,
    on_update: Option<Function>,
}

#[wasm_bindgen]
impl PetalSearcher {
    /// `config` is a partial `SearchConfig` (camelCase, durations in ms),
    /// `state` a previously saved `HistoryState`. Both may be `null`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        state: JsValue,
        on_update: Option<Function>,
    ) -> Result<PetalSearcher, JsValue> {
        let config: SearchConfig = optional(config)?.unwrap_or_default();
        // Saved state that no longer parses is dropped, not reported.
        let state: Option<HistoryState> = optional(state).unwrap_or_default();
        let mut model = ViewModel::new(JsClock::new(), config, state).map_err(js_error)?;
        let events = model.subscribe();
        Ok(PetalSearcher {
            model,
            events,
            on_update,
        })
    }

    /// Hand over the decoded dataset (an array of records).
    pub fn load(&mut self, records: JsValue) -> Result<(), JsValue> {
        let records: Vec<Record> = from_value(records).map_err(js_error)?;
        self.model.load(records);
        self.flush()
    }

    /// The query box or kind selector changed. `kind` defaults to `"All"`.
    pub fn search(&mut self, query: &str, kind: Option<String>) -> Result<(), JsValue> {
        let kind = match kind {
            Some(kind) => kind.parse::<SearchKind>().map_err(js_error)?,
            None => SearchKind::All,
        };
        if kind != self.model.kind() {
            self.model.set_kind(kind);
        }
        self.model.set_query(query);
        self.flush()
    }

    #[wasm_bindgen(js_name = "setFilter")]
    pub fn set_filter(&mut self, letter: &str) -> Result<(), JsValue> {
        self.model.set_filter(letter);
        self.flush()
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.model.reset();
        self.flush()
    }

    pub fn next(&mut self) -> Result<bool, JsValue> {
        let moved = self.model.next();
        self.flush()?;
        Ok(moved)
    }

    pub fn prev(&mut self) -> Result<bool, JsValue> {
        let moved = self.model.prev();
        self.flush()?;
        Ok(moved)
    }

    pub fn goto(&mut self, page: usize) -> Result<bool, JsValue> {
        let moved = self.model.goto(page);
        self.flush()?;
        Ok(moved)
    }

    #[wasm_bindgen(js_name = "setSorter")]
    pub fn set_sorter(&mut self, name: &str) -> Result<(), JsValue> {
        self.model.set_sorter(name).map_err(js_error)?;
        self.flush()
    }

    /// Run whatever is due. Call when the `nextDelay()` timeout fires.
    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.model.tick();
        self.flush()
    }

    /// Milliseconds until `tick()` should be called, or -1 when idle.
    #[wasm_bindgen(js_name = "nextDelay")]
    pub fn next_delay(&self) -> f64 {
        match self.model.next_deadline() {
            Some(deadline) => {
                let now = self.model.scheduler().clock().now();
                deadline.saturating_sub(now).as_secs_f64() * 1000.0
            }
            None => -1.0,
        }
    }

    #[wasm_bindgen(js_name = "isReady")]
    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// `HistoryState` to save for the next visit.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.model.state())
    }

    /// The current `PageView`.
    pub fn page(&self) -> Result<JsValue, JsValue> {
        to_js(&self.model.page())
    }

    pub fn prefixes(&self) -> Vec<String> {
        self.model.prefixes().into_iter().map(String::from).collect()
    }

    /// Search kinds as `{ kind, label }` pairs for the selector.
    pub fn kinds(&self) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        struct KindItem {
            kind: SearchKind,
            label: &'static str,
        }
        let items: Vec<KindItem> = SearchKind::ALL_KINDS
            .into_iter()
            .map(|kind| KindItem {
                kind,
                label: kind.label(),
            })
            .collect();
        to_js(&items)
    }

    fn flush(&mut self) -> Result<(), JsValue> {
        let Some(callback) = &self.on_update else {
            // Nobody listening: drop the backlog.
            self.events.try_iter().for_each(drop);
            return Ok(());
        };
        for view in self.events.try_iter() {
            callback.call1(&JsValue::NULL, &to_js(&view)?)?;
        }
        Ok(())
    }
}

/// Normalize text the way the searcher does.
#[wasm_bindgen(js_name = "normalize")]
pub fn normalize_text(text: &str) -> String {
    crate::util::normalize(text)
}

/// Undo the double escaping a query picks up in the site header.
#[wasm_bindgen(js_name = "unescapeQuery")]
pub fn unescape_query(text: &str) -> String {
    crate::util::unescape_query(text)
}
