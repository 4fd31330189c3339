//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::{
    dto::leaderboard::SubmitScoreRequest,
    quiz::leaderboard::{NameError, validate_player_name},
};

/// Validates a player name: non-blank once trimmed and at most 15 characters.
///
/// # Examples
///
/// ```ignore
/// validate_player_name_field("Kaka")             // Ok
/// validate_player_name_field("   ")              // Err - blank
/// validate_player_name_field("sixteen chars!!!") // Err - too long
/// ```
pub fn validate_player_name_field(name: &str) -> Result<(), ValidationError> {
    validate_player_name(name).map(|_| ()).map_err(|err| {
        let code = match err {
            NameError::Empty => "player_name_empty",
            NameError::TooLong { .. } => "player_name_length",
        };
        let mut validation = ValidationError::new(code);
        validation.message = Some(err.to_string().into());
        validation
    })
}

/// Rejects a score above the number of questions played.
pub fn validate_score_bounds(request: &SubmitScoreRequest) -> Result<(), ValidationError> {
    if request.score > request.total_questions {
        let mut err = ValidationError::new("score_exceeds_total");
        err.message = Some(
            format!(
                "Score ({}) cannot exceed total questions ({})",
                request.score, request.total_questions
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(score: u32, total_questions: u32) -> SubmitScoreRequest {
        SubmitScoreRequest {
            player_name: "Ronaldo".into(),
            score,
            total_questions,
            time_in_seconds: 90,
        }
    }

    #[test]
    fn test_validate_player_name_field_valid() {
        assert!(validate_player_name_field("Kaka").is_ok());
        assert!(validate_player_name_field("  Seedorf  ").is_ok());
        assert!(validate_player_name_field("fifteen chars!!").is_ok());
    }

    #[test]
    fn test_validate_player_name_field_invalid() {
        let err = validate_player_name_field("").unwrap_err();
        assert_eq!(err.code, "player_name_empty");
        assert_eq!(err.message.as_deref(), Some("Please enter your name"));

        let err = validate_player_name_field("sixteen chars!!!").unwrap_err();
        assert_eq!(err.code, "player_name_length");
        assert_eq!(
            err.message.as_deref(),
            Some("Name must be 15 characters or less")
        );
    }

    #[test]
    fn test_validate_score_bounds() {
        assert!(validate_score_bounds(&request(0, 10)).is_ok());
        assert!(validate_score_bounds(&request(10, 10)).is_ok());
        assert!(validate_score_bounds(&request(11, 10)).is_err());
    }
}
