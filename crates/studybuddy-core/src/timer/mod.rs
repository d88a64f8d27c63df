mod break_cycle;
mod engine;

pub use break_cycle::{BreakCycle, DEFAULT_BREAK_INTERVAL_SECS};
pub use engine::{TimerEngine, TimerState};
