//! Application layer for Stackseed.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RegistryClient, ResolverService,
//!   ManifestMutator, GenerationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    GenerationOptions, GenerationReport, GenerationService, ManifestMutator, RegistryClient,
    ResolverService, StepOutcome,
};

pub use ports::{
    CommandOutput, CommandRunner, Filesystem, Invocation, PackageManager, VersionControl,
    VersionSource,
};

pub use error::ApplicationError;
