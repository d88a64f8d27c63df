pub mod config;
pub mod distraction;
pub mod export;
pub mod session;
pub mod stats;
pub mod timer;

use chrono::Utc;
use studybuddy_core::{Config, Database, SessionState};

const SESSION_STATE_KEY: &str = "session_state";

/// Load the carried session, or begin a fresh one. The break interval is
/// re-read from config on every invocation so a settings change applies to
/// the running session.
pub(crate) fn load_session(db: &Database, config: &Config) -> SessionState {
    match db.get_json::<SessionState>(SESSION_STATE_KEY) {
        Ok(Some(mut session)) => {
            if let Err(e) = session.set_break_interval_secs(config.break_interval_secs()) {
                tracing::warn!(error = %e, "keeping previous break interval");
            }
            session
        }
        Ok(None) => SessionState::from_config(config, Utc::now()),
        Err(e) => {
            tracing::warn!(error = %e, "could not load carried session, starting fresh");
            SessionState::from_config(config, Utc::now())
        }
    }
}

pub(crate) fn save_session(
    db: &Database,
    session: &SessionState,
) -> Result<(), Box<dyn std::error::Error>> {
    db.set_json(SESSION_STATE_KEY, session)?;
    Ok(())
}

/// `H:MM:SS` above an hour, `MM:SS` below.
pub(crate) fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
