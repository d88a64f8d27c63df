//! Async session runner.
//!
//! Drives a `SessionState` with a periodic tick task and streams the
//! resulting events over a channel. The ticker is an abortable task handle:
//! pause, reset, end, and drop all cancel it, so no callback can mutate
//! state after the runner is gone. Event delivery is best-effort - when the
//! receiver is dropped the session keeps running and events are discarded.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time;
use uuid::Uuid;

use crate::events::Event;
use crate::session::{SessionRecord, SessionState};
use crate::storage::Config;

pub struct SessionRunner {
    session_id: Uuid,
    shared: Arc<Mutex<SessionState>>,
    events: mpsc::UnboundedSender<Event>,
    ticker: StdMutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl SessionRunner {
    /// Build a runner with the standard one-second tick.
    pub fn new(config: &Config) -> (Self, mpsc::UnboundedReceiver<Event>) {
        Self::with_tick_interval(config, Duration::from_secs(1))
    }

    /// Build a runner with a custom tick period (tests, accelerated demos).
    pub fn with_tick_interval(
        config: &Config,
        tick_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            session_id: Uuid::new_v4(),
            shared: Arc::new(Mutex::new(SessionState::from_config(config, Utc::now()))),
            events: tx,
            ticker: StdMutex::new(None),
            tick_interval,
        };
        (runner, rx)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Start (or resume) the session and spawn the tick task.
    pub async fn start(&self) {
        let started = {
            let mut guard = self.shared.lock().await;
            guard.start()
        };
        if let Some(event) = started {
            self.emit(event);
            self.spawn_ticker();
        }
    }

    /// Pause the session and cancel the tick task.
    pub async fn pause(&self) {
        let paused = {
            let mut guard = self.shared.lock().await;
            guard.pause()
        };
        if let Some(event) = paused {
            self.emit(event);
        }
        self.cancel_ticker();
    }

    /// Reset to a fresh session and cancel the tick task.
    pub async fn reset(&self) {
        let event = {
            let mut guard = self.shared.lock().await;
            guard.reset(Utc::now())
        };
        self.emit(event);
        self.cancel_ticker();
    }

    /// Deliver a focus-loss event observed now.
    pub async fn focus_lost(&self) {
        let recorded = {
            let mut guard = self.shared.lock().await;
            guard.focus_lost(Utc::now())
        };
        if let Some(event) = recorded {
            self.emit(event);
        }
    }

    /// Current composed state, without side effects.
    pub async fn snapshot(&self) -> Event {
        self.shared.lock().await.snapshot()
    }

    /// End the session: cancel ticking, emit `SessionEnded` when there was
    /// study time, and return the record for the caller to persist.
    pub async fn end(&self) -> Option<SessionRecord> {
        self.cancel_ticker();
        let record = {
            let mut guard = self.shared.lock().await;
            guard.end(Utc::now())
        };
        if let Some(ref record) = record {
            self.emit(Event::SessionEnded {
                duration_secs: record.duration_secs,
                distractions: record.distractions,
                at: record.timestamp,
            });
        }
        record
    }

    fn spawn_ticker(&self) {
        let shared = self.shared.clone();
        let tx = self.events.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            // The first interval tick completes immediately; consume it so
            // the first second of study time lands after one full period.
            interval.tick().await;
            loop {
                interval.tick().await;
                let events = {
                    let mut guard = shared.lock().await;
                    if !guard.engine().is_running() {
                        break;
                    }
                    guard.tick()
                };
                for event in events {
                    let _ = tx.send(event);
                }
            }
        });

        if let Ok(mut slot) = self.ticker.lock() {
            if let Some(old) = slot.replace(handle) {
                old.abort();
            }
        }
    }

    fn cancel_ticker(&self) {
        if let Ok(mut slot) = self.ticker.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::debug!("event receiver dropped, discarding event");
        }
    }
}

impl Drop for SessionRunner {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerState;

    fn fast_runner() -> (SessionRunner, mpsc::UnboundedReceiver<Event>) {
        let mut config = Config::default();
        config.tracking.settle_ms = 0;
        SessionRunner::with_tick_interval(&config, Duration::from_millis(20))
    }

    async fn elapsed_of(runner: &SessionRunner) -> u64 {
        match runner.snapshot().await {
            Event::StateSnapshot { elapsed_secs, .. } => elapsed_secs,
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ticker_advances_while_running() {
        let (runner, mut rx) = fast_runner();
        runner.start().await;

        assert!(matches!(rx.recv().await, Some(Event::TimerStarted { .. })));

        time::sleep(Duration::from_millis(250)).await;
        assert!(elapsed_of(&runner).await >= 2);
    }

    #[tokio::test]
    async fn pause_halts_ticking() {
        let (runner, _rx) = fast_runner();
        runner.start().await;
        time::sleep(Duration::from_millis(100)).await;

        runner.pause().await;
        let frozen = elapsed_of(&runner).await;
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(elapsed_of(&runner).await, frozen);

        match runner.snapshot().await {
            Event::StateSnapshot { state, .. } => assert_eq!(state, TimerState::Paused),
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn focus_loss_counts_while_running() {
        let (runner, _rx) = fast_runner();
        runner.start().await;
        runner.focus_lost().await;
        match runner.snapshot().await {
            Event::StateSnapshot { distractions, .. } => assert_eq!(distractions, 1),
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn end_returns_record_and_resets() {
        let (runner, _rx) = fast_runner();
        runner.start().await;
        time::sleep(Duration::from_millis(150)).await;

        let record = runner.end().await.expect("record");
        assert!(record.duration_secs >= 1);
        assert_eq!(elapsed_of(&runner).await, 0);
    }

    #[tokio::test]
    async fn end_without_study_time_records_nothing() {
        let (runner, _rx) = fast_runner();
        assert!(runner.end().await.is_none());
    }
}
