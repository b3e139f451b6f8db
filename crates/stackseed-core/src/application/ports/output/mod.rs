//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world:
//! a filesystem, registry sources, a way to run child processes, the
//! command vocabulary of each package manager, and version control. The
//! `stackseed-adapters` crate provides implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{Configuration, Dependency, PackageLocator, PackageManagerKind};
use crate::error::SeedResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackseed_adapters::filesystem::LocalFilesystem` (production)
/// - `stackseed_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SeedResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SeedResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SeedResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for one registry lookup tier.
///
/// Implementations do network I/O and may fail in any way; the registry
/// client above them never lets those failures escape.
///
/// Implemented by:
/// - `stackseed_adapters::registry::GithubReleases` (Go primary)
/// - `stackseed_adapters::registry::GoProxy` (Go secondary)
/// - `stackseed_adapters::registry::NpmLatest` / `NpmVersions` (Node)
/// - `stackseed_adapters::registry::GoToolchain` (`go` directive)
/// - `stackseed_adapters::registry::Offline` (always fails)
pub trait VersionSource: Send + Sync {
    /// Short name used in logs, e.g. `github` or `goproxy`.
    fn name(&self) -> &str;

    /// Every version the source knows for `locator`, unfiltered.
    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>>;
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Last non-empty stderr line, else stdout's. For one-line warnings.
    pub fn summary(&self) -> &str {
        fn last(s: &str) -> Option<&str> {
            s.lines().rev().find(|l| !l.trim().is_empty()).map(str::trim)
        }
        last(&self.stderr)
            .or_else(|| last(&self.stdout))
            .unwrap_or("no output")
    }
}

/// A single child process to run: program, arguments, deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    /// Command line for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Port for running child processes.
///
/// Implemented by:
/// - `stackseed_adapters::process::SystemRunner` (production)
/// - `stackseed_adapters::process::ScriptedRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run to completion or kill at `invocation.timeout`.
    ///
    /// A non-zero exit is `Ok` with that status; only spawn failures and
    /// timeouts are errors.
    fn run(&self, invocation: &Invocation, cwd: &Path) -> SeedResult<CommandOutput>;

    /// Whether `program` can be started at all.
    fn is_available(&self, program: &str) -> bool;
}

/// Port describing a package manager's command vocabulary.
///
/// Pure: implementations only build [`Invocation`]s. Running them, timing
/// them out, and turning failures into warnings is the manifest mutator's
/// job. An operation the tool does not support returns an empty list.
///
/// Implemented by:
/// - `stackseed_adapters::package_manager::GoModules`
/// - `stackseed_adapters::package_manager::NodePackageManager` (pnpm / npm)
pub trait PackageManager: Send + Sync {
    fn kind(&self) -> PackageManagerKind;

    /// Cheap command proving the tool is installed, e.g. `go version`.
    fn probe(&self) -> Invocation;

    /// Create an empty manifest for the project.
    fn init(&self, configuration: &Configuration) -> Vec<Invocation>;

    /// Declare one dependency, pinned when it has a version.
    fn add(&self, dependency: &Dependency) -> Vec<Invocation>;

    fn remove(&self, identifier: &str) -> Vec<Invocation>;

    /// Update one package (optionally to `version`) or, with `None`, all.
    fn update(&self, identifier: Option<&str>, version: Option<&str>) -> Vec<Invocation>;

    /// `go mod tidy` / `pnpm dedupe`.
    fn tidy(&self) -> Vec<Invocation>;

    /// `go mod download` / `pnpm install`.
    fn install(&self) -> Vec<Invocation>;

    /// The tool's own consistency check.
    fn verify(&self) -> Vec<Invocation>;

    fn list(&self) -> Vec<Invocation>;

    fn outdated(&self) -> Vec<Invocation>;

    fn audit(&self) -> Vec<Invocation>;

    /// Drop packages no longer declared.
    fn prune(&self) -> Vec<Invocation>;

    /// Developer tools worth installing for this configuration.
    fn dev_tools(&self, configuration: &Configuration) -> Vec<Invocation>;
}

/// Port for the one-shot repository bootstrap at the end of a run.
///
/// Implemented by `stackseed_adapters::vcs::GitCli`.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Init, stage everything, and make the first commit.
    fn bootstrap(&self, dir: &Path, message: &str) -> SeedResult<()>;

    /// Whether `dir` is already inside a repository.
    fn is_repository(&self, dir: &Path) -> bool;
}

/// Manifest path for a project directory.
pub fn manifest_path(project_dir: &Path, kind: PackageManagerKind) -> PathBuf {
    project_dir.join(kind.ecosystem().manifest_file())
}
