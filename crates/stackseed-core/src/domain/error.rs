// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy per dependency)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid module path '{path}': {reason}")]
    InvalidModulePath { path: String, reason: String },

    #[error("Package locator must not be empty")]
    EmptyLocator,

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    // ========================================================================
    // Compatibility Errors (409-level equivalent)
    // ========================================================================
    #[error("{ecosystem} dependency '{identifier}' cannot go into a {manifest} manifest")]
    EcosystemMismatch {
        ecosystem: String,
        identifier: String,
        manifest: String,
    },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("No catalog entry for capability '{0}'")]
    UnmappedCapability(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration(msg) => vec![
                "Check your project settings file".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Set '{}' in your settings or on the command line", field),
            ],
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use letters, digits, hyphens, and underscores".into(),
                "Examples: my-api, inventory_service, shop-ui".into(),
            ],
            Self::InvalidModulePath { path, .. } => vec![
                format!("'{}' is not a usable Go module path", path),
                "Module paths look like github.com/<owner>/<repo>".into(),
            ],
            Self::UnknownValue { kind, value } => vec![
                format!("'{}' is not a recognised {}", value, kind),
                "The feature will be treated as disabled".into(),
            ],
            Self::UnmappedCapability(cap) => vec![
                format!("Capability '{}' has no catalog entry", cap),
                "This is a bug in the dependency catalog, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration(_)
            | Self::MissingRequiredField { .. }
            | Self::InvalidProjectName { .. }
            | Self::InvalidModulePath { .. }
            | Self::EmptyLocator
            | Self::UnknownValue { .. } => ErrorCategory::Validation,
            Self::EcosystemMismatch { .. } => ErrorCategory::Compatibility,
            Self::UnmappedCapability(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
