//! Unified error handling for Stackseed Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stackseed Core operations.
#[derive(Debug, Error, Clone)]
pub enum SeedError {
    /// Errors from the domain layer (business rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SeedError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your settings and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Stackseed".into(),
                "Please report this issue at: https://github.com/stackseed/stackseed/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error aborts a generation run before any work happens.
    ///
    /// Only invalid configuration and missing tools do; everything else
    /// degrades to a per-step or per-dependency failure.
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::Domain(_)
                | Self::Configuration { .. }
                | Self::Application(ApplicationError::ToolMissing { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SeedResult<T> = Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_missing_is_precondition_failure() {
        let err: SeedError = ApplicationError::ToolMissing { tool: "go".into() }.into();
        assert!(err.is_precondition_failure());
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn timeout_is_not_precondition_failure() {
        let err: SeedError = ApplicationError::CommandTimedOut {
            command: "go mod tidy".into(),
            timeout: std::time::Duration::from_secs(30),
        }
        .into();
        assert!(!err.is_precondition_failure());
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn domain_validation_maps_to_validation_category() {
        let err: SeedError = DomainError::MissingRequiredField {
            field: "project_name",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("project_name")));
    }
}
