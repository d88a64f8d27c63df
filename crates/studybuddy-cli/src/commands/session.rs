use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use studybuddy_core::insights::InsightRotation;
use studybuddy_core::{Config, Database, SessionHistory, SessionRunner};

use super::{format_duration, load_session, save_session};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run a live session until Ctrl-C or for a fixed duration
    Run {
        /// Stop automatically after this many wall-clock seconds
        #[arg(long)]
        duration_secs: Option<u64>,
        /// Tick period in milliseconds (accelerated demos and tests)
        #[arg(long, default_value = "1000")]
        tick_ms: u64,
    },
    /// End the carried session, recording it when time was studied
    End,
    /// List recorded sessions as JSON
    List,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Run {
            duration_secs,
            tick_ms,
        } => run_live(duration_secs, tick_ms),
        SessionAction::End => {
            let config = Config::load_or_default();
            let db = Database::open()?;
            let mut session = load_session(&db, &config);
            match session.end(Utc::now()) {
                Some(record) => {
                    SessionHistory::new(&db).append(&record)?;
                    println!("Session recorded: {}", format_duration(record.duration_secs));
                }
                None => println!("no study time to record"),
            }
            save_session(&db, &session)?;
            Ok(())
        }
        SessionAction::List => {
            let db = Database::open()?;
            let records = SessionHistory::new(&db).records()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
    }
}

fn run_live(duration_secs: Option<u64>, tick_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let rotation_period = Duration::from_secs(config.insights.rotation_secs.max(1));
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let db = Database::open()?;
        let (runner, mut events) =
            SessionRunner::with_tick_interval(&config, Duration::from_millis(tick_ms.max(1)));
        tracing::info!(session_id = %runner.session_id(), "live session started");
        runner.start().await;

        let mut rotation = InsightRotation::new();
        let mut rotate = tokio::time::interval(rotation_period);
        rotate.tick().await; // skip the immediate first tick
        let deadline =
            duration_secs.map(|secs| tokio::time::Instant::now() + Duration::from_secs(secs));

        loop {
            tokio::select! {
                maybe = events.recv() => match maybe {
                    Some(event) => println!("{}", serde_json::to_string(&event)?),
                    None => break,
                },
                _ = rotate.tick() => {
                    let line = serde_json::json!({
                        "type": "Insight",
                        "quote": rotation.next_quote(),
                        "message": rotation.next_message(),
                    });
                    println!("{line}");
                }
                _ = tokio::signal::ctrl_c() => break,
                _ = sleep_until_deadline(deadline) => break,
            }
        }

        let record = runner.end().await;
        // Drain anything emitted between the last poll and teardown.
        while let Ok(event) = events.try_recv() {
            println!("{}", serde_json::to_string(&event)?);
        }
        match record {
            Some(record) => {
                SessionHistory::new(&db).append(&record)?;
                println!("Session recorded: {}", format_duration(record.duration_secs));
            }
            None => println!("no study time to record"),
        }
        Ok(())
    })
}

async fn sleep_until_deadline(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
