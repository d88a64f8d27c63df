//! Distraction tracking.
//!
//! Counts focus-loss events (window blur, app switch) as a distraction
//! proxy while the observed "active" signal - normally the timer's running
//! flag - is true. A one-time settle window after attachment discards the
//! spurious blur events hosts tend to fire right at startup.
//!
//! The tracker never reads the clock itself; callers pass `now` in, so the
//! settle window is exact and testable.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default settle window after attachment, in milliseconds.
pub const DEFAULT_SETTLE_MS: u64 = 500;

/// Queryable tracker state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistractionState {
    pub count: u64,
    pub last_event_at: Option<DateTime<Utc>>,
}

/// Focus-loss counter scoped to one attachment lifetime.
///
/// State is reset only by constructing a fresh tracker; the surrounding
/// system decides when a new tracking session begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistractionTracker {
    count: u64,
    last_event_at: Option<DateTime<Utc>>,
    attached_at: DateTime<Utc>,
    settle_ms: u64,
    subscribed: bool,
}

impl DistractionTracker {
    /// Attach a fresh tracker. The settle window starts now; the tracker
    /// begins unsubscribed until the active signal goes true.
    pub fn attach(settle_ms: u64, now: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            last_event_at: None,
            attached_at: now,
            settle_ms,
            subscribed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> DistractionState {
        DistractionState {
            count: self.count,
            last_event_at: self.last_event_at,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn settle_ms(&self) -> u64 {
        self.settle_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Follow the active signal: subscribe on true, unsubscribe on false.
    /// Idempotent in both directions, so rapid toggling cannot stack
    /// subscriptions.
    pub fn set_active(&mut self, active: bool) {
        self.subscribed = active;
    }

    /// Deliver a focus-loss event observed at `at`.
    ///
    /// Counts only when subscribed and past the settle window; everything
    /// else is discarded without touching state.
    pub fn on_focus_lost(&mut self, at: DateTime<Utc>) -> Option<Event> {
        if !self.subscribed || self.in_settle_window(at) {
            return None;
        }
        self.count = self.count.saturating_add(1);
        self.last_event_at = Some(at);
        Some(Event::DistractionRecorded {
            count: self.count,
            at,
        })
    }

    fn in_settle_window(&self, at: DateTime<Utc>) -> bool {
        at - self.attached_at < Duration::milliseconds(self.settle_ms as i64)
    }
}
