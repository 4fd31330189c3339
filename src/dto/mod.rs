use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Healthcheck payload.
pub mod health;
/// Leaderboard entries and score submissions.
pub mod leaderboard;
/// Questions and the sampling query.
pub mod question;
/// Custom validators.
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

fn parse_system_time(value: &str) -> Option<SystemTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok().map(Into::into)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn timestamps_survive_formatting() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let text = format_system_time(time);
        assert_eq!(text, "2023-11-14T22:13:20Z");
        assert_eq!(parse_system_time(&text), Some(time));
        assert_eq!(parse_system_time("yesterday"), None);
    }
}
