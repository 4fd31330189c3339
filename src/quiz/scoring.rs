//! Presentation helpers derived from a final score.

use crate::quiz::question::Question;

fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(total) * 100.0
}

/// Closing message shown on the results screen.
pub fn score_message(score: u32, total: u32) -> &'static str {
    let pct = percentage(score, total);
    if pct >= 90.0 {
        "Outstanding! You're a Champions League expert!"
    } else if pct >= 70.0 {
        "Great job! You really know your Champions League facts!"
    } else if pct >= 50.0 {
        "Not bad! You have decent knowledge of the Champions League."
    } else {
        "Keep learning! The Champions League has a rich history to explore."
    }
}

/// Star rating from 1 to 5.
pub fn star_count(score: u32, total: u32) -> u8 {
    match percentage(score, total) {
        pct if pct >= 90.0 => 5,
        pct if pct >= 70.0 => 4,
        pct if pct >= 50.0 => 3,
        pct if pct >= 30.0 => 2,
        _ => 1,
    }
}

/// Feedback line revealing the right option once a question is resolved.
pub fn feedback_text(question: &Question) -> String {
    format!("{} is the correct answer.", question.correct_option())
}

/// Render seconds as `m:ss`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
