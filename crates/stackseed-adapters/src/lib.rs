//! Infrastructure adapters for Stackseed.
//!
//! This crate implements the ports defined in `stackseed-core::application::ports`.
//! It contains all external dependencies and I/O operations: registry HTTP
//! calls, child processes, the local filesystem, and git.

pub mod filesystem;
pub mod http;
pub mod package_manager;
pub mod process;
pub mod registry;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{HttpClient, HttpConfig, RegistryError};
pub use package_manager::{GoModules, NodePackageManager, Timeouts, detect_node_manager};
pub use process::{ScriptedRunner, SystemRunner};
pub use registry::{RegistryEndpoints, registry_client, toolchain_source};
pub use vcs::GitCli;
