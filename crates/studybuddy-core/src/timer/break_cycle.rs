//! Break-cycle notifier.
//!
//! Watches the timer's elapsed seconds and fires a `BreakDue` event each
//! time a new multiple of the configured break interval is crossed. When an
//! evaluation skips several boundaries at once (coarse evaluation cadence,
//! external clock jump), a single event fires and the cycle counter snaps
//! forward - missed boundaries are not queued or replayed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Default break interval when none is configured: 10 minutes.
pub const DEFAULT_BREAK_INTERVAL_SECS: u64 = 600;

/// Cycle counter over `elapsed_secs / interval_secs`.
///
/// The caller evaluates it against the current elapsed time whenever that
/// time changes, and resets it alongside the timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakCycle {
    interval_secs: u64,
    last_fired_cycle: u64,
}

impl Default for BreakCycle {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_BREAK_INTERVAL_SECS,
            last_fired_cycle: 0,
        }
    }
}

impl BreakCycle {
    /// Create a notifier for the given interval. The interval is a divisor
    /// and must be positive.
    pub fn new(interval_secs: u64) -> Result<Self, ValidationError> {
        if interval_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "interval_secs".into(),
                message: "break interval must be positive".into(),
            });
        }
        Ok(Self {
            interval_secs,
            last_fired_cycle: 0,
        })
    }

    /// Convenience constructor for an interval given in minutes.
    pub fn from_minutes(interval_min: u64) -> Result<Self, ValidationError> {
        Self::new(interval_min.saturating_mul(60))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn last_fired_cycle(&self) -> u64 {
        self.last_fired_cycle
    }

    /// Seconds until the next boundary from the given elapsed time.
    pub fn secs_until_next(&self, elapsed_secs: u64) -> u64 {
        self.interval_secs - elapsed_secs % self.interval_secs
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the interval. Takes effect on the next evaluation against the
    /// current elapsed time.
    pub fn set_interval_secs(&mut self, interval_secs: u64) -> Result<(), ValidationError> {
        if interval_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "interval_secs".into(),
                message: "break interval must be positive".into(),
            });
        }
        self.interval_secs = interval_secs;
        Ok(())
    }

    /// Evaluate against the current elapsed time.
    ///
    /// Returns `Some(BreakDue)` exactly once per forward boundary crossing.
    /// A backward jump of the cycle number (interval reconfigured upward
    /// mid-session) clamps the counter down silently so a future legitimate
    /// crossing still notifies.
    pub fn evaluate(&mut self, elapsed_secs: u64) -> Option<Event> {
        let current_cycle = elapsed_secs / self.interval_secs;
        if current_cycle > self.last_fired_cycle {
            self.last_fired_cycle = current_cycle;
            return Some(Event::BreakDue {
                cycle: current_cycle,
                interval_secs: self.interval_secs,
                at: Utc::now(),
            });
        }
        if current_cycle < self.last_fired_cycle {
            self.last_fired_cycle = current_cycle;
        }
        None
    }

    /// Return to cycle zero. Callers invoke this whenever elapsed time
    /// resets to zero.
    pub fn reset(&mut self) {
        self.last_fired_cycle = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_interval() {
        assert!(BreakCycle::new(0).is_err());
        let mut cycle = BreakCycle::new(60).unwrap();
        assert!(cycle.set_interval_secs(0).is_err());
        assert_eq!(cycle.interval_secs(), 60);
    }

    #[test]
    fn fires_exactly_at_boundary() {
        let mut cycle = BreakCycle::new(60).unwrap();
        assert!(cycle.evaluate(0).is_none());
        assert!(cycle.evaluate(59).is_none());
        assert_eq!(cycle.last_fired_cycle(), 0);

        let event = cycle.evaluate(60);
        match event {
            Some(Event::BreakDue {
                cycle: n,
                interval_secs,
                ..
            }) => {
                assert_eq!(n, 1);
                assert_eq!(interval_secs, 60);
            }
            other => panic!("Expected BreakDue, got {other:?}"),
        }
        assert_eq!(cycle.last_fired_cycle(), 1);

        // Same boundary does not fire twice.
        assert!(cycle.evaluate(60).is_none());
        assert!(cycle.evaluate(61).is_none());
    }

    #[test]
    fn skipped_boundaries_collapse_to_one_event() {
        let mut cycle = BreakCycle::new(60).unwrap();
        assert!(cycle.evaluate(60).is_some());
        // Jump from 60 to 125 skips the 120 boundary check entirely.
        let event = cycle.evaluate(125);
        assert!(event.is_some());
        assert_eq!(cycle.last_fired_cycle(), 2);
        assert!(cycle.evaluate(125).is_none());
    }

    #[test]
    fn backward_jump_clamps_without_firing() {
        let mut cycle = BreakCycle::new(60).unwrap();
        assert!(cycle.evaluate(300).is_some());
        assert_eq!(cycle.last_fired_cycle(), 5);

        // Widening the interval drops the current cycle below the counter.
        cycle.set_interval_secs(600).unwrap();
        assert!(cycle.evaluate(300).is_none());
        assert_eq!(cycle.last_fired_cycle(), 0);

        // The next forward crossing under the new interval still notifies.
        assert!(cycle.evaluate(650).is_some());
        assert_eq!(cycle.last_fired_cycle(), 1);
    }

    #[test]
    fn reset_returns_to_cycle_zero() {
        let mut cycle = BreakCycle::new(60).unwrap();
        cycle.evaluate(180);
        assert_eq!(cycle.last_fired_cycle(), 3);
        cycle.reset();
        assert_eq!(cycle.last_fired_cycle(), 0);
        assert!(cycle.evaluate(0).is_none());
        assert!(cycle.evaluate(60).is_some());
    }

    #[test]
    fn secs_until_next_boundary() {
        let cycle = BreakCycle::new(600).unwrap();
        assert_eq!(cycle.secs_until_next(0), 600);
        assert_eq!(cycle.secs_until_next(100), 500);
        assert_eq!(cycle.secs_until_next(600), 600);
    }
}
