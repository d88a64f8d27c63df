use chrono::Utc;
use clap::Subcommand;
use studybuddy_core::{Config, Database};

use super::{load_session, save_session};

#[derive(Subcommand)]
pub enum DistractionAction {
    /// Record a focus-loss event against the carried session
    Add,
    /// Print tracker state as JSON
    Status,
}

pub fn run(action: DistractionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut session = load_session(&db, &config);

    match action {
        DistractionAction::Add => {
            match session.focus_lost(Utc::now()) {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                // Discarded: timer not running, or still inside the settle window.
                None => println!("ignored"),
            }
            save_session(&db, &session)?;
        }
        DistractionAction::Status => {
            println!(
                "{}",
                serde_json::to_string_pretty(&session.tracker().state())?
            );
        }
    }
    Ok(())
}
