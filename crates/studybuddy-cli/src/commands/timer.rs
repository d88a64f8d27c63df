use chrono::Utc;
use clap::Subcommand;
use studybuddy_core::{Config, Database, Event};

use super::{load_session, save_session};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the session timer
    Start,
    /// Pause the session timer
    Pause,
    /// Reset the timer and begin a fresh session
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Advance simulated seconds while the timer runs (scripting aid)
    Tick {
        /// Number of seconds to advance
        #[arg(long, default_value = "1")]
        count: u64,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut session = load_session(&db, &config);

    match action {
        TimerAction::Start => {
            if let Some(event) = session.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            }
        }
        TimerAction::Pause => {
            if let Some(event) = session.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            }
        }
        TimerAction::Reset => {
            let event = session.reset(Utc::now());
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        TimerAction::Tick { count } => {
            for _ in 0..count {
                for event in session.tick() {
                    if matches!(event, Event::BreakDue { .. }) {
                        println!("{}", serde_json::to_string_pretty(&event)?);
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
    }

    save_session(&db, &session)?;
    Ok(())
}
