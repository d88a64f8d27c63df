//! Motivational quotes, rotating messages, and the break countdown copy.
//!
//! All insight text is hardcoded; the placeholder analytics strings stay in
//! place until a real model exists to replace them.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Every minute counts!",
    "Keep pushing forward!",
    "You're doing great!",
    "Stay focused and conquer!",
    "Believe in yourself!",
];

pub const AI_MESSAGES: [&str; 5] = [
    "Did you know? Consistency builds mastery.",
    "AI Insight: A brief pause can boost your focus.",
    "Your current study rhythm is impressive!",
    "AI says: A short break can help retention.",
    "Keep it up! Each minute teaches you something new.",
];

pub const SMART_BREAK_RECOMMENDATION: &str =
    "Based on your recent sessions, a 15-min break is recommended at 2 PM.";
pub const BEST_FOCUS_HOURS: &str = "Your optimal focus period is between 10 AM and 12 PM.";
pub const PERSONALIZED_SCHEDULE: &str =
    "Suggested schedule: Study 9-11 AM, break 11-11:15 AM, resume 11:15 AM - 1 PM.";

/// Countdown copy toward the next break boundary.
///
/// Under a minute of study time the insight is still "locked"; within a
/// minute of the boundary the copy switches to the wind-down message.
pub fn countdown_message(elapsed_secs: u64, break_interval_secs: u64) -> String {
    let interval = break_interval_secs.max(1);
    let time_since_break = elapsed_secs % interval;
    let time_to_break = interval - time_since_break;
    if elapsed_secs < 60 {
        "Start studying to unlock your personalized AI insights!".into()
    } else if time_to_break <= 60 {
        "Great work! It's almost time to take a break.".into()
    } else {
        let minutes_left = time_to_break / 60;
        let seconds_left = time_to_break % 60;
        format!("Keep focused! Just {minutes_left} min {seconds_left} sec until your next break.")
    }
}

/// Random rotation over the quote and message tables.
///
/// Seedable so display layers can be tested deterministically.
pub struct InsightRotation {
    rng: Pcg64,
}

impl InsightRotation {
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos() as u64;
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    pub fn next_quote(&mut self) -> &'static str {
        MOTIVATIONAL_QUOTES[self.rng.gen_range(0..MOTIVATIONAL_QUOTES.len())]
    }

    pub fn next_message(&mut self) -> &'static str {
        AI_MESSAGES[self.rng.gen_range(0..AI_MESSAGES.len())]
    }
}

impl Default for InsightRotation {
    fn default() -> Self {
        Self::new()
    }
}
