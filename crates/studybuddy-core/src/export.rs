//! CSV export of recorded sessions.

use chrono::SecondsFormat;

use crate::session::SessionRecord;

pub const CSV_HEADER: &str = "Session,Duration (sec),Distractions,Timestamp,Break Interval (min),Smart Break Recommendation,Best Focus Hours,Personalized Schedule";

/// Render session records as CSV, one row per session in recorded order.
///
/// Fields are comma-joined as-is, without quoting or escaping; a comma
/// inside an insight string would shift the columns of that row.
pub fn to_csv(records: &[SessionRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for (idx, record) in records.iter().enumerate() {
        let insights = &record.placeholder_insights;
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            idx + 1,
            record.duration_secs,
            record.distractions,
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.break_interval_min,
            insights.smart_break_recommendation,
            insights.best_focus_hours,
            insights.personalized_schedule,
        ));
    }
    out
}
