//! Error handling for the stackseed CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::path::PathBuf;
use std::{error::Error, fmt::Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use stackseed_core::error::SeedError;

pub use stackseed_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Neither the command line nor the settings file names the project.
    #[error("No project name given")]
    MissingProjectName,

    /// A settings file could not be read or parsed.
    #[error("Cannot use settings file {path}: {message}")]
    SettingsFile { path: PathBuf, message: String },

    /// `deps` was pointed at a directory with no manifest.
    #[error("No go.mod or package.json in {dir}")]
    ManifestNotFound { dir: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config init` would overwrite a file.
    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `stackseed-core` or an adapter.
    #[error(transparent)]
    Core(#[from] SeedError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A package-manager operation ran and failed.
    #[error("'{operation}' failed in {dir}")]
    OperationFailed { operation: String, dir: PathBuf },

    /// The run finished but some steps or dependencies failed.
    #[error("Generation finished with {failed_steps} failed step(s) and {failed_dependencies} failed dependency(ies)")]
    GenerationIncomplete {
        failed_steps: usize,
        failed_dependencies: usize,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::MissingProjectName => vec![
                "Pass the name as the first argument: stackseed resolve orders -e go".into(),
                "Or set `project_name` in the --settings file".into(),
            ],

            Self::SettingsFile { path, .. } => vec![
                format!("Check that {} exists and is valid JSON or TOML", path.display()),
                "Files ending in .toml are read as TOML, anything else as JSON".into(),
            ],

            Self::ManifestNotFound { dir } => vec![
                format!("Run inside a project, or pass --dir (currently {})", dir.display()),
                "Create the project first: stackseed generate <name> -e go".into(),
                "Or name the ecosystem explicitly with --ecosystem".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the active file with 'stackseed config path'".into(),
                "Use 'stackseed config init' to create a default config".into(),
            ],

            Self::ConfigExists { path } => vec![
                format!("Edit {} directly", path.display()),
                "Use --force to overwrite it with the current values".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::OperationFailed { operation, .. } => vec![
                format!("The package manager rejected '{operation}'"),
                "Re-run with -vv to see the command and its stderr".into(),
            ],

            Self::GenerationIncomplete { .. } => vec![
                "The project was created; failed packages were skipped".into(),
                "Retry a package with 'stackseed deps add <package> --dir <project>'".into(),
                "Re-run with -v to see each step's output".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::MissingProjectName
            | Self::SettingsFile { .. }
            | Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. }
            | Self::OperationFailed { .. }
            | Self::GenerationIncomplete { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        );
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = writeln!(
                    output,
                    "\n  {} {}",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                );
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = write!(output, "\n{}\n", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {suggestion}");
            }
        }

        if !verbose {
            output.push('\n');
            let _ = writeln!(
                output,
                "{} {}",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = write!(out, "\nError: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, SeedError> {
    /// Core errors already carry their own context.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackseed_core::{application::ApplicationError, domain::DomainError};
    use std::io;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn missing_manifest_suggests_dir() {
        let err = CliError::ManifestNotFound {
            dir: PathBuf::from("/tmp/empty"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--dir")));
    }

    #[test]
    fn config_exists_suggests_force() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("/tmp/config.toml"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let core: SeedError = ApplicationError::ToolMissing { tool: "go".into() }.into();
        let expected = core.suggestions();
        assert_eq!(CliError::Core(core).suggestions(), expected);
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(CliError::MissingProjectName.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(
            CliError::ManifestNotFound {
                dir: PathBuf::from(".")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let core = SeedError::Configuration {
            message: "bad".into(),
        };
        assert_eq!(CliError::Core(core).exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
        assert_eq!(
            CliError::GenerationIncomplete {
                failed_steps: 0,
                failed_dependencies: 1
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn missing_tool_is_not_found() {
        let core: SeedError = ApplicationError::ToolMissing { tool: "pnpm".into() }.into();
        assert_eq!(CliError::Core(core).exit_code(), 3);
    }

    #[test]
    fn domain_validation_is_user_error() {
        let core: SeedError = DomainError::EmptyLocator.into();
        assert_eq!(CliError::Core(core).category(), ErrorCategory::UserError);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let err = CliError::MissingProjectName;
        let s = err.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing go.mod".into(),
            source: io::Error::other("disk full"),
        };
        assert!(err.format_plain(true).contains("Caused by: disk full"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading settings");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
