// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Time sources for the scheduler.
//!
//! The scheduler never sleeps on its own. It asks its clock what time it is,
//! remembers deadlines, and lets whoever drives it decide how to wait: a real
//! sleep natively, `setTimeout` in the browser, or nothing at all in tests,
//! where `ManualClock` just jumps to the next deadline.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source measured from an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin. Never goes backwards.
    fn now(&self) -> Duration;

    /// Block until `deadline`. Clocks that cannot block return immediately;
    /// the scheduler treats the deadline as reached either way.
    fn sleep_until(&self, deadline: Duration);
}

/// Wall-clock time with real sleeps. For native callers.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// Hand-driven time for tests.
///
/// Clones share the same time, so a test can keep one handle and move time
/// forward while the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Convenience for `advance(Duration::from_millis(ms))`.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep_until(&self, deadline: Duration) {
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
    }
}
