//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Record contains no data")]
    EmptyRecord,

    #[error("Field {0} holds a non-finite number")]
    NonFiniteValue(String),

    #[error("Unknown ESG category: {0}")]
    UnknownCategory(String),

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid validation config: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Check if this error was caused by malformed caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyRecord | DomainError::NonFiniteValue(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_display() {
        let error = DomainError::EmptyRecord;
        assert_eq!(error.to_string(), "Record contains no data");
    }

    #[test]
    fn test_is_invalid_input() {
        assert!(DomainError::EmptyRecord.is_invalid_input());
        assert!(DomainError::NonFiniteValue("environmental.emissions".to_string()).is_invalid_input());
        assert!(!DomainError::UnknownCategory("financial".to_string()).is_invalid_input());
        assert!(!DomainError::InvalidWeights("sum".to_string()).is_invalid_input());
    }
}
