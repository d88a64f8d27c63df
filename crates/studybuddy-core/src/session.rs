//! Session records and the composed session state machine.
//!
//! `SessionState` wires the three engines together: the timer owns elapsed
//! time, the distraction tracker follows the timer's running flag, and the
//! break cycle is evaluated after every tick. `SessionRecord` is the
//! immutable summary appended to history when a session ends with time on
//! the clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::distraction::DistractionTracker;
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::Config;
use crate::timer::{BreakCycle, TimerEngine};

/// Reserved analytics fields carried on every record, pending a real model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderInsights {
    pub smart_break_recommendation: String,
    pub best_focus_hours: String,
    pub personalized_schedule: String,
}

impl Default for PlaceholderInsights {
    fn default() -> Self {
        Self {
            smart_break_recommendation: "Pending".into(),
            best_focus_hours: "Pending".into(),
            personalized_schedule: "Pending".into(),
        }
    }
}

/// Immutable summary of one completed session.
///
/// Field names serialize to the store's historical JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    pub distractions: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "breakInterval")]
    pub break_interval_min: u64,
    #[serde(rename = "placeholderInsights", default)]
    pub placeholder_insights: PlaceholderInsights,
}

impl SessionRecord {
    pub fn new(
        duration_secs: u64,
        distractions: u64,
        break_interval_min: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            duration_secs,
            distractions,
            timestamp,
            break_interval_min,
            placeholder_insights: PlaceholderInsights::default(),
        }
    }
}

/// Timer engine, distraction tracker, and break cycle composed into one
/// session. Serializable as a unit so the CLI can carry a session across
/// invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    engine: TimerEngine,
    tracker: DistractionTracker,
    breaks: BreakCycle,
}

impl SessionState {
    /// Build a fresh session. The break interval is a divisor and must be
    /// positive.
    pub fn new(
        break_interval_secs: u64,
        settle_ms: u64,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            engine: TimerEngine::new(),
            tracker: DistractionTracker::attach(settle_ms, now),
            breaks: BreakCycle::new(break_interval_secs)?,
        })
    }

    /// Build a fresh session from configuration. Total: an invalid break
    /// interval falls back to the default with a warning rather than
    /// failing.
    pub fn from_config(config: &Config, now: DateTime<Utc>) -> Self {
        let interval_secs = config.break_interval_secs();
        let breaks = BreakCycle::new(interval_secs).unwrap_or_else(|_| {
            tracing::warn!(
                interval_secs,
                "invalid break interval in config, using default"
            );
            BreakCycle::default()
        });
        Self {
            engine: TimerEngine::new(),
            tracker: DistractionTracker::attach(config.tracking.settle_ms, now),
            breaks,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn tracker(&self) -> &DistractionTracker {
        &self.tracker
    }

    pub fn breaks(&self) -> &BreakCycle {
        &self.breaks
    }

    /// Full state snapshot, readable at any time without side effects.
    pub fn snapshot(&self) -> Event {
        let elapsed = self.engine.elapsed_secs();
        Event::StateSnapshot {
            state: self.engine.state(),
            elapsed_secs: elapsed,
            distractions: self.tracker.count(),
            break_interval_secs: self.breaks.interval_secs(),
            next_break_in_secs: self.breaks.secs_until_next(elapsed),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the timer; the tracker subscribes to focus-loss events.
    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        if event.is_some() {
            self.tracker.set_active(true);
        }
        event
    }

    /// Pause the timer; the tracker unsubscribes immediately.
    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause();
        if event.is_some() {
            self.tracker.set_active(false);
        }
        event
    }

    /// Reset to a fresh session: timer to zero, break cycle to zero, and a
    /// reattached tracker (new settle window, unsubscribed).
    pub fn reset(&mut self, now: DateTime<Utc>) -> Event {
        let event = self.engine.reset();
        self.breaks.reset();
        self.tracker = DistractionTracker::attach(self.tracker.settle_ms(), now);
        event
    }

    /// Advance one logical second and evaluate the break cycle.
    /// At most two events: the tick and a break notification.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);
        if let Some(tick) = self.engine.tick() {
            events.push(tick);
            if let Some(due) = self.breaks.evaluate(self.engine.elapsed_secs()) {
                events.push(due);
            }
        }
        events
    }

    /// Deliver a focus-loss event to the tracker.
    pub fn focus_lost(&mut self, at: DateTime<Utc>) -> Option<Event> {
        self.tracker.on_focus_lost(at)
    }

    /// Reconfigure the break interval mid-session; effective on the next
    /// evaluation against the current elapsed time.
    pub fn set_break_interval_secs(&mut self, interval_secs: u64) -> Result<(), ValidationError> {
        self.breaks.set_interval_secs(interval_secs)
    }

    /// End the session: produce a record when there is elapsed time, then
    /// reset to a fresh session either way.
    pub fn end(&mut self, now: DateTime<Utc>) -> Option<SessionRecord> {
        let duration_secs = self.engine.elapsed_secs();
        let record = (duration_secs > 0).then(|| {
            SessionRecord::new(
                duration_secs,
                self.tracker.count(),
                self.breaks.interval_secs() / 60,
                now,
            )
        });
        self.reset(now);
        record
    }
}
