//! Parsing error types for module extraction
//!
//! Only whole-run failures are represented here. Missing optional fields on
//! a listing node are never errors; they default to empty values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Listing container '{selector}' not found")]
    ContainerNotFound { selector: String },

    #[error("Invalid CSS selector for {field}: '{selector}' - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("Document snapshot failed: {message}")]
    SnapshotFailed { message: String },

    #[error("Page probe failed: {message}")]
    ProbeFailed { message: String },
}

impl ParsingError {
    pub fn container_not_found(selector: &str) -> Self {
        Self::ContainerNotFound {
            selector: selector.to_string(),
        }
    }

    pub fn invalid_selector(field: &str, selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn snapshot_failed(message: impl std::fmt::Display) -> Self {
        Self::SnapshotFailed {
            message: message.to_string(),
        }
    }

    pub fn probe_failed(message: impl std::fmt::Display) -> Self {
        Self::ProbeFailed {
            message: message.to_string(),
        }
    }

    /// Configuration mistakes won't go away by sampling the page again
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ContainerNotFound { .. } => true,
            Self::InvalidSelector { .. } => false,
            Self::SnapshotFailed { .. } => true,
            Self::ProbeFailed { .. } => true,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_selector() {
        let err = ParsingError::container_not_found(".items");
        assert_eq!(err.to_string(), "Listing container '.items' not found");

        let err = ParsingError::invalid_selector("price", "..price", "unexpected token");
        assert!(err.to_string().contains("price"));
        assert!(!err.is_recoverable());
    }
}
