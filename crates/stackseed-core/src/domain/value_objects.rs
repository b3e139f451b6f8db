//! Domain value objects: ecosystems, project kinds, feature choices.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO catalog knowledge. Which packages a choice pulls in lives in
//! `catalog.rs`. This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add the matching entries in `catalog.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Ecosystem ────────────────────────────────────────────────────────────────

/// A package ecosystem with its own registry, manifest, and package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Go modules: Gin backend skeletons, `go.mod`.
    Go,
    /// npm registry: Vue 3 frontend skeletons, `package.json`.
    Node,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 2] = [Self::Go, Self::Node];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Node => "node",
        }
    }

    /// File name of the native dependency manifest.
    pub const fn manifest_file(&self) -> &'static str {
        match self {
            Self::Go => "go.mod",
            Self::Node => "package.json",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" | "golang" | "gin" | "backend" => Ok(Self::Go),
            "node" | "npm" | "vue" | "frontend" => Ok(Self::Node),
            other => Err(DomainError::UnknownValue {
                kind: "ecosystem",
                value: other.into(),
            }),
        }
    }
}

// ── Category / Purpose ───────────────────────────────────────────────────────

/// Whether a dependency ships with the application or only supports
/// development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Production,
    Development,
}

impl Category {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }

    pub const fn is_dev(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-purpose refining a dependency's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Purpose {
    Framework,
    Database,
    Auth,
    Config,
    Logging,
    Validation,
    Http,
    Docs,
    Testing,
    Metrics,
    RateLimit,
    Cache,
    Messaging,
    Rpc,
    Routing,
    State,
    Build,
    TypeScript,
    Lint,
    Format,
    Css,
    Pwa,
}

impl Purpose {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::Database => "database",
            Self::Auth => "auth",
            Self::Config => "config",
            Self::Logging => "logging",
            Self::Validation => "validation",
            Self::Http => "http",
            Self::Docs => "docs",
            Self::Testing => "testing",
            Self::Metrics => "metrics",
            Self::RateLimit => "rate-limit",
            Self::Cache => "cache",
            Self::Messaging => "messaging",
            Self::Rpc => "rpc",
            Self::Routing => "routing",
            Self::State => "state",
            Self::Build => "build",
            Self::TypeScript => "typescript",
            Self::Lint => "lint",
            Self::Format => "format",
            Self::Css => "css",
            Self::Pwa => "pwa",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Project kinds ────────────────────────────────────────────────────────────

/// Kind of Go/Gin backend project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Api,
    Web,
    Microservice,
    Grpc,
}

impl BackendKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Web => "web",
            Self::Microservice => "microservice",
            Self::Grpc => "grpc",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" | "rest" => Ok(Self::Api),
            "web" => Ok(Self::Web),
            "microservice" | "service" => Ok(Self::Microservice),
            "grpc" => Ok(Self::Grpc),
            other => Err(DomainError::UnknownValue {
                kind: "backend project type",
                value: other.into(),
            }),
        }
    }
}

/// Kind of Vue 3 frontend project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontendKind {
    #[default]
    Spa,
    Pwa,
    ComponentLib,
    AdminDashboard,
}

impl FrontendKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spa => "spa",
            Self::Pwa => "pwa",
            Self::ComponentLib => "component-lib",
            Self::AdminDashboard => "admin-dashboard",
        }
    }
}

impl fmt::Display for FrontendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrontendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spa" => Ok(Self::Spa),
            "pwa" => Ok(Self::Pwa),
            "component-lib" | "component_lib" | "lib" => Ok(Self::ComponentLib),
            "admin-dashboard" | "admin_dashboard" | "admin" => Ok(Self::AdminDashboard),
            other => Err(DomainError::UnknownValue {
                kind: "frontend project type",
                value: other.into(),
            }),
        }
    }
}

// ── Feature choices ──────────────────────────────────────────────────────────

/// Database driver behind the ORM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    Postgres,
    Mysql,
    Sqlite,
}

impl DatabaseDriver {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for DatabaseDriver {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(DomainError::UnknownValue {
                kind: "database driver",
                value: other.into(),
            }),
        }
    }
}

/// Token scheme for the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    Jwt,
}

impl FromStr for AuthScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            other => Err(DomainError::UnknownValue {
                kind: "auth scheme",
                value: other.into(),
            }),
        }
    }
}

/// How the generated service reads its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// YAML files loaded through viper.
    Yaml,
    /// Plain environment variables, no extra package.
    Env,
}

impl FromStr for ConfigFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "env" => Ok(Self::Env),
            other => Err(DomainError::UnknownValue {
                kind: "config format",
                value: other.into(),
            }),
        }
    }
}

/// Structured logging library for the Go service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLibrary {
    Logrus,
    Zap,
}

impl FromStr for LoggingLibrary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logrus" => Ok(Self::Logrus),
            "zap" => Ok(Self::Zap),
            other => Err(DomainError::UnknownValue {
                kind: "logging library",
                value: other.into(),
            }),
        }
    }
}

/// API documentation generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocsFormat {
    Swagger,
}

impl FromStr for DocsFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "swagger" | "openapi" => Ok(Self::Swagger),
            other => Err(DomainError::UnknownValue {
                kind: "docs format",
                value: other.into(),
            }),
        }
    }
}

/// Cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
}

impl FromStr for CacheBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            other => Err(DomainError::UnknownValue {
                kind: "cache backend",
                value: other.into(),
            }),
        }
    }
}

/// Message broker client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageBroker {
    RabbitMq,
    Nats,
}

impl FromStr for MessageBroker {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rabbitmq" | "amqp" => Ok(Self::RabbitMq),
            "nats" => Ok(Self::Nats),
            other => Err(DomainError::UnknownValue {
                kind: "message broker",
                value: other.into(),
            }),
        }
    }
}

/// CSS framework for the Vue project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssFramework {
    Tailwind,
    Bootstrap,
    Bulma,
}

impl FromStr for CssFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tailwind" | "tailwindcss" => Ok(Self::Tailwind),
            "bootstrap" => Ok(Self::Bootstrap),
            "bulma" => Ok(Self::Bulma),
            other => Err(DomainError::UnknownValue {
                kind: "css framework",
                value: other.into(),
            }),
        }
    }
}

// ── Package managers ─────────────────────────────────────────────────────────

/// Host package manager binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    Go,
    Pnpm,
    Npm,
}

impl PackageManagerKind {
    /// Binary name looked up on PATH.
    pub const fn program(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Pnpm => "pnpm",
            Self::Npm => "npm",
        }
    }

    pub const fn ecosystem(&self) -> Ecosystem {
        match self {
            Self::Go => Ecosystem::Go,
            Self::Pnpm | Self::Npm => Ecosystem::Node,
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManagerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" => Ok(Self::Go),
            "pnpm" => Ok(Self::Pnpm),
            "npm" => Ok(Self::Npm),
            other => Err(DomainError::UnknownValue {
                kind: "package manager",
                value: other.into(),
            }),
        }
    }
}

// ── Version origin ───────────────────────────────────────────────────────────

/// Which tier of the registry fallback chain produced a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionOrigin {
    Primary,
    Secondary,
    /// Both registry sources failed; the catalog's known-good pin was used.
    FallbackDefault,
}

impl VersionOrigin {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::FallbackDefault => "fallback-default",
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackDefault)
    }
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
