//! Stackseed Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stackseed's
//! dependency engine: it maps a project configuration onto a version-pinned
//! dependency set and applies it to a Go or Node manifest, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackseed-cli (CLI)            │
//! │     (Builds adapters, calls services)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (RegistryClient, ResolverService,      │
//! │   ManifestMutator, GenerationService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (VersionSource, CommandRunner,         │
//! │   PackageManager, Filesystem, VCS)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stackseed-adapters (Infrastructure)   │
//! │  (GitHub/proxy/npm sources, go/pnpm,    │
//! │   SystemRunner, LocalFilesystem, git)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Catalog, Settings, Planning,          │
//! │   Version selection, Manifest text)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackseed_core::prelude::*;
//!
//! // 1. Settings with overrides
//! let settings = ProjectSettings::defaults_for(Ecosystem::Go, "orders")
//!     .merged_with(&serde_json::json!({ "database": { "type": "mysql" } }))?;
//!
//! // 2. Resolve with injected registry sources
//! let resolver = ResolverService::new(RegistryClient::new(primary, secondary));
//! let configuration = settings.normalize()?.configuration;
//! let dependencies = resolver.resolve(&configuration)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationOptions, GenerationReport, GenerationService, ManifestMutator, RegistryClient,
        ResolverService,
        ports::{CommandOutput, CommandRunner, Filesystem, Invocation, PackageManager, VersionControl, VersionSource},
    };
    pub use crate::domain::{
        Capability, Category, Configuration, Dependency, DependencyState, Ecosystem, Manifest,
        PackageLocator, PackageManagerKind, ProjectSettings, ResolvedVersion, VersionOrigin,
    };
    pub use crate::error::{SeedError, SeedResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
