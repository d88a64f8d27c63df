use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The display layer consumes them; the session runner streams them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// One logical second of study time elapsed.
    TimerTick {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// A new break-cycle boundary was crossed. Fires at most once per
    /// evaluation, even when several boundaries were skipped.
    BreakDue {
        cycle: u64,
        interval_secs: u64,
        at: DateTime<Utc>,
    },
    /// A qualifying focus-loss event was counted.
    DistractionRecorded {
        count: u64,
        at: DateTime<Utc>,
    },
    /// The session ended with study time on the clock.
    SessionEnded {
        duration_secs: u64,
        distractions: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        elapsed_secs: u64,
        distractions: u64,
        break_interval_secs: u64,
        next_break_in_secs: u64,
        at: DateTime<Utc>,
    },
}
