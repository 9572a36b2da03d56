//! Error types for quiz scoring.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// An answer referenced a question that is not in the bank.
    /// The whole submission is rejected; nothing is scored or stored.
    #[error("Unknown question id: {0}")]
    UnknownQuestionId(String),

    #[error("Duplicate question id in bank: {0}")]
    DuplicateQuestionId(String),
}

impl QuizError {
    /// True when the error was caused by the submitted payload
    pub fn is_client_error(&self) -> bool {
        matches!(self, QuizError::UnknownQuestionId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_message_names_the_id() {
        let err = QuizError::UnknownQuestionId("Z9".to_string());
        assert_eq!(err.to_string(), "Unknown question id: Z9");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_duplicate_id_is_not_client_error() {
        let err = QuizError::DuplicateQuestionId("A1".to_string());
        assert!(!err.is_client_error());
    }
}
