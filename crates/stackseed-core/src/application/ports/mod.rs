//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackseed-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `VersionSource`: One registry lookup tier
//!   - `CommandRunner`: Bounded child-process execution
//!   - `PackageManager`: Command vocabulary of `go` / `pnpm` / `npm`
//!   - `VersionControl`: Repository bootstrap
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The CLI calls services directly)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, Filesystem, Invocation, PackageManager, VersionControl,
    VersionSource, manifest_path,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockVersionControl};
