//! Error types for puzzle generation and the content contract.
//!
//! Interaction sessions never return these: invalid moves are no-ops.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size {size} cannot hold words of {max_word_len} letters")]
    GridTooSmall { size: usize, max_word_len: usize },
    #[error("grid size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: usize, max: usize },
    #[error("at least one generation attempt is required")]
    NoAttempts,
    #[error("word length range {min}..={max} is empty")]
    EmptyLengthRange { min: usize, max: usize },
    #[error("at least one mistake must be allowed")]
    NoMistakes,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("not enough words: {required} needed, {found} usable")]
    InsufficientInput { required: usize, found: usize },
    #[error("only {placed} word(s) could be connected in the grid")]
    DegenerateLayout { placed: usize },
    #[error("only {found} distinct categories could be formed")]
    InsufficientCategories { found: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Failures of the external study-content collaborator. All are retryable.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content provider failed: {0}")]
    Provider(String),
    #[error("generated content is malformed: {0}")]
    Malformed(String),
    #[error("a generation request is already in flight")]
    Busy,
    #[error("generated content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = GenerationError::InsufficientInput { required: 16, found: 15 };
        assert_eq!(e.to_string(), "not enough words: 16 needed, 15 usable");

        let e: GenerationError = ConfigError::NoAttempts.into();
        assert_eq!(
            e.to_string(),
            "invalid configuration: at least one generation attempt is required"
        );
    }
}
