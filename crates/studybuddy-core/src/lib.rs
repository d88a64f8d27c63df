//! # StudyBuddy Core Library
//!
//! Core business logic for the StudyBuddy study-session tracker. It follows
//! a CLI-first philosophy: every operation is available through the
//! standalone CLI binary, with any GUI being a thin display layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; the caller (or the
//!   async runner) invokes `tick()` once per second while running
//! - **Distraction Tracker**: counts focus-loss events while the timer
//!   runs, after a short settle window
//! - **Break Cycle**: fires a single notification per crossed break
//!   boundary
//! - **Storage**: JSON key-value session history and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`SessionState`]: the three engines composed into one session
//! - [`SessionRunner`]: tokio ticker driving a session
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration

pub mod distraction;
pub mod error;
pub mod events;
pub mod export;
pub mod insights;
pub mod runner;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use distraction::{DistractionState, DistractionTracker};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use runner::SessionRunner;
pub use session::{PlaceholderInsights, SessionRecord, SessionState};
pub use stats::SessionSummary;
pub use storage::{Config, Database, SessionHistory};
pub use timer::{BreakCycle, TimerEngine, TimerState};
