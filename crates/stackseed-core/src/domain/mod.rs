//! Core domain layer for Stackseed.
//!
//! Pure business logic: the dependency catalog, settings normalization,
//! dependency planning, version selection, and manifest synthesis. All I/O
//! (registries, package managers, filesystem) is reached through ports in
//! the application layer.
//!
//! ## Rules
//!
//! - **No I/O**: no filesystem, network, or subprocess calls
//! - **Deterministic**: equal inputs give equal outputs, including order
//! - **Immutable inputs**: settings are merged into new values, never patched

pub mod catalog;
pub mod entities;
pub mod error;
pub mod manifest;
pub mod planning;
pub mod value_objects;
pub mod version;

mod validation;

pub use catalog::{CATALOG, Capability, CatalogEntry, entries_for, find_by_identifier};
pub use entities::{
    BackendConfig, BackendSettings, Configuration, Dependency, DependencyState, FrontendConfig,
    FrontendSettings, Normalized, PackageLocator, ProjectSettings,
};
pub use error::{DomainError, ErrorCategory};
pub use manifest::{GO_TOOLCHAIN_FALLBACK, Manifest, synthesize};
pub use planning::plan_dependencies;
pub use validation::DomainValidator;
pub use value_objects::{
    BackendKind, Category, Ecosystem, FrontendKind, PackageManagerKind, Purpose, VersionOrigin,
};
pub use version::{ResolvedVersion, VersionRecord, select_latest_stable};
