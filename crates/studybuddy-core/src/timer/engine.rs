//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or wall-clock deltas - the caller schedules `tick()` once per
//! second while the timer runs, and each tick adds exactly one second.
//! Delayed ticks are not compensated for; a late tick still adds one second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! any state --reset()--> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start();
//! // Once per second while running:
//! engine.tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Core timer engine.
///
/// Owns the elapsed-seconds counter and the running flag. All operations
/// are total: commands that don't apply in the current state are no-ops
/// and return `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    elapsed_secs: u64,
}

impl TimerEngine {
    /// Create a new engine in the `Idle` state with zero elapsed time.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) ticking. Idempotent: returns `None` when already
    /// running.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    /// Halt ticking, keeping the elapsed time. Idempotent: returns `None`
    /// unless the timer was running.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Return to `Idle` with zero elapsed time, unconditionally.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance one logical second. Suspended entirely while not running:
    /// returns `None` and leaves the counter untouched.
    pub fn tick(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.elapsed_secs = self.elapsed_secs.saturating_add(1);
                Some(Event::TimerTick {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pause_start() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = TimerEngine::new();
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn pause_outside_running_is_noop() {
        let mut engine = TimerEngine::new();
        assert!(engine.pause().is_none());
        engine.start();
        engine.pause();
        assert!(engine.pause().is_none());
        assert_eq!(engine.state(), TimerState::Paused);
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut engine = TimerEngine::new();
        assert!(engine.tick().is_none());
        assert_eq!(engine.elapsed_secs(), 0);

        engine.start();
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.elapsed_secs(), 10);

        engine.pause();
        assert!(engine.tick().is_none());
        assert_eq!(engine.elapsed_secs(), 10);

        engine.start();
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.elapsed_secs(), 15);
    }

    #[test]
    fn reset_from_any_state() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        engine.tick();
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed_secs(), 0);

        engine.start();
        engine.tick();
        engine.pause();
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed_secs(), 0);
    }
}
