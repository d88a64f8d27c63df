//! Display statistics over recorded sessions.

use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub total_sessions: u64,
    pub total_study_min: f64,
    pub avg_session_min: f64,
    pub total_distractions: u64,
    /// Share of sessions with non-zero duration, as a whole percentage.
    pub consistency_pct: u64,
}

/// Reduce recorded sessions into the summary shown by the analytics view.
pub fn summarize(records: &[SessionRecord]) -> SessionSummary {
    if records.is_empty() {
        return SessionSummary::default();
    }
    let total_secs: u64 = records.iter().map(|r| r.duration_secs).sum();
    let total_study_min = total_secs as f64 / 60.0;
    let nonzero = records.iter().filter(|r| r.duration_secs > 0).count();

    SessionSummary {
        total_sessions: records.len() as u64,
        total_study_min,
        avg_session_min: total_study_min / records.len() as f64,
        total_distractions: records.iter().map(|r| r.distractions).sum(),
        consistency_pct: ((nonzero as f64 / records.len() as f64) * 100.0).round() as u64,
    }
}

/// Per-session lengths in minutes, rounded to one decimal for display.
pub fn session_lengths_min(durations: &[u64]) -> Vec<f64> {
    durations
        .iter()
        .map(|&secs| (secs as f64 / 60.0 * 10.0).round() / 10.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(duration_secs: u64, distractions: u64) -> SessionRecord {
        SessionRecord::new(duration_secs, distractions, 10, Utc::now())
    }

    #[test]
    fn empty_history_summarizes_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.consistency_pct, 0);
    }

    #[test]
    fn summary_totals() {
        let records = vec![record(300, 2), record(600, 0), record(900, 1)];
        let summary = summarize(&records);
        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_study_min, 30.0);
        assert_eq!(summary.avg_session_min, 10.0);
        assert_eq!(summary.total_distractions, 3);
        assert_eq!(summary.consistency_pct, 100);
    }

    #[test]
    fn consistency_counts_nonzero_share() {
        let records = vec![record(300, 0), record(0, 0), record(600, 0)];
        assert_eq!(summarize(&records).consistency_pct, 67);
    }

    #[test]
    fn lengths_round_to_one_decimal() {
        assert_eq!(session_lengths_min(&[300, 100, 65]), vec![5.0, 1.7, 1.1]);
    }
}
