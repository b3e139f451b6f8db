//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A registry source could not produce a version list.
    #[error("Registry '{source_name}' failed for {locator}: {reason}")]
    RegistryUnavailable {
        source_name: String,
        locator: String,
        reason: String,
    },

    /// A required external binary is not installed or not on PATH.
    #[error("Required tool '{tool}' is not available")]
    ToolMissing { tool: String },

    /// A child process could not be started.
    #[error("Failed to start '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// A child process ran past its deadline and was killed.
    #[error("'{command}' timed out after {}s", timeout.as_secs())]
    CommandTimedOut { command: String, timeout: Duration },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The project directory already holds a manifest the caller asked us
    /// not to touch.
    #[error("Manifest already exists at {path}")]
    ManifestExists { path: PathBuf },

    /// Shared state lock was poisoned.
    #[error("Internal lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RegistryUnavailable { source_name, .. } => vec![
                format!("Could not reach {}", source_name),
                "Check your network connection or proxy settings".into(),
                "Use --offline to resolve from built-in defaults".into(),
            ],
            Self::ToolMissing { tool } => vec![
                format!("Install '{}' and make sure it is on your PATH", tool),
                match tool.as_str() {
                    "go" => "  • https://go.dev/dl/".into(),
                    "pnpm" | "npm" => "  • https://nodejs.org/ (Node 18 or newer)".into(),
                    "git" => "  • https://git-scm.com/downloads".into(),
                    _ => "  • Check the tool's documentation".into(),
                },
            ],
            Self::CommandTimedOut { command, .. } => vec![
                format!("'{}' did not finish in time", command),
                "Raise the timeout in your stackseed config".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ManifestExists { path } => vec![
                format!("A manifest already exists at {}", path.display()),
                "Use the deps subcommands to modify it instead".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RegistryUnavailable { .. } => ErrorCategory::Internal,
            Self::ToolMissing { .. } => ErrorCategory::NotFound,
            Self::SpawnFailed { .. } | Self::CommandTimedOut { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ManifestExists { .. } => ErrorCategory::Validation,
        }
    }
}
