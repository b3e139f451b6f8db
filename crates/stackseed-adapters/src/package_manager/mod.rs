//! Package-manager vocabularies: `go`, `pnpm`, `npm`.
//!
//! These only build invocations. The manifest mutator runs them.

mod go;
mod node;

pub use go::GoModules;
pub use node::{NodePackageManager, detect_node_manager};

use std::time::Duration;

/// Deadlines for package-manager subprocesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Single operations: init, add, remove, list.
    pub command: Duration,
    /// Long passes that download or build: tidy, install, audit, tool installs.
    pub install: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            command: Duration::from_secs(30),
            install: Duration::from_secs(300),
        }
    }
}
