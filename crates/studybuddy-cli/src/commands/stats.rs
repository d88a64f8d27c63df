use clap::Subcommand;
use studybuddy_core::insights::{
    countdown_message, InsightRotation, BEST_FOCUS_HOURS, PERSONALIZED_SCHEDULE,
    SMART_BREAK_RECOMMENDATION,
};
use studybuddy_core::{stats, Config, Database, SessionHistory};

use super::load_session;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Summary over recorded sessions
    Summary,
    /// Insight strings and the break countdown
    Insights,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Summary => {
            let history = SessionHistory::new(&db);
            let summary = stats::summarize(&history.records()?);
            let lengths = stats::session_lengths_min(&history.durations()?);
            let out = serde_json::json!({
                "summary": summary,
                "session_lengths_min": lengths,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Insights => {
            let config = Config::load_or_default();
            let session = load_session(&db, &config);
            let countdown = countdown_message(
                session.engine().elapsed_secs(),
                config.break_interval_secs(),
            );
            let mut rotation = InsightRotation::new();
            let out = serde_json::json!({
                "insight": format!("{countdown} {}", rotation.next_message()),
                "smart_break_recommendation": SMART_BREAK_RECOMMENDATION,
                "best_focus_hours": BEST_FOCUS_HOURS,
                "personalized_schedule": PERSONALIZED_SCHEDULE,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
