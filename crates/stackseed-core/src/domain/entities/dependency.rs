//! The `Dependency` entity and its per-run lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::CatalogEntry,
    error::DomainError,
    value_objects::{Category, Ecosystem, Purpose, VersionOrigin},
    version::ResolvedVersion,
};

/// Where a dependency is in one generation run.
///
/// ```text
/// Declared ──▶ VersionPinned ──▶ Applied
///     │              │
///     └──────────────┴──────────▶ Failed (terminal)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "kebab-case")]
pub enum DependencyState {
    Declared,
    VersionPinned,
    Applied,
    Failed(String),
}

impl DependencyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Applied | Self::Failed(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::VersionPinned => "version-pinned",
            Self::Applied => "applied",
            Self::Failed(_) => "failed",
        }
    }
}

/// What a registry source needs to look a package up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocator {
    ecosystem: Ecosystem,
    identifier: String,
    repository: Option<String>,
    fallback: Option<String>,
}

impl PackageLocator {
    /// Build a locator; the identifier must be non-empty.
    pub fn new(ecosystem: Ecosystem, identifier: impl Into<String>) -> Result<Self, DomainError> {
        let identifier = identifier.into().trim().to_string();
        if identifier.is_empty() {
            return Err(DomainError::EmptyLocator);
        }
        Ok(Self {
            ecosystem,
            identifier,
            repository: None,
            fallback: None,
        })
    }

    /// GitHub `owner/repo` used by release-tag sources.
    pub fn with_repository(mut self, repository: Option<impl Into<String>>) -> Self {
        self.repository = repository.map(Into::into);
        self
    }

    /// Hardcoded version returned when every source fails.
    pub fn with_fallback(mut self, fallback: Option<impl Into<String>>) -> Self {
        self.fallback = fallback.map(Into::into);
        self
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

impl fmt::Display for PackageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ecosystem, self.identifier)
    }
}

/// A single required package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Abstract catalog name, e.g. `orm` or `postgres-driver`.
    pub name: String,
    /// Module path or registry package name.
    pub identifier: String,
    pub ecosystem: Ecosystem,
    pub category: Category,
    pub purpose: Option<Purpose>,
    /// `None` until pinned; the manifest treats it as "latest".
    pub version: Option<String>,
    pub origin: Option<VersionOrigin>,
    pub state: DependencyState,
    #[serde(skip)]
    repository: Option<String>,
    #[serde(skip)]
    fallback_version: Option<String>,
}

impl Dependency {
    /// Declare a dependency from its catalog entry.
    pub fn declared(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            identifier: entry.identifier.to_string(),
            ecosystem: entry.capability.ecosystem(),
            category: entry.category,
            purpose: Some(entry.purpose),
            version: None,
            origin: None,
            state: DependencyState::Declared,
            repository: entry.repository.map(str::to_string),
            fallback_version: Some(entry.fallback_version.to_string()),
        }
    }

    /// Declare a dependency the catalog does not know about, e.g. one named
    /// on the command line.
    pub fn ad_hoc(
        ecosystem: Ecosystem,
        identifier: impl Into<String>,
        category: Category,
    ) -> Result<Self, DomainError> {
        let identifier = identifier.into().trim().to_string();
        if identifier.is_empty() {
            return Err(DomainError::EmptyLocator);
        }
        Ok(Self {
            name: identifier.clone(),
            identifier,
            ecosystem,
            category,
            purpose: None,
            version: None,
            origin: None,
            state: DependencyState::Declared,
            repository: None,
            fallback_version: None,
        })
    }

    /// Pin an explicit version chosen by the caller.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        let normalized = crate::domain::version::normalize(&version).to_string();
        self.version = Some(normalized);
        self.state = DependencyState::VersionPinned;
        self
    }

    /// Registry lookup key for this dependency.
    pub fn locator(&self) -> PackageLocator {
        PackageLocator {
            ecosystem: self.ecosystem,
            identifier: self.identifier.clone(),
            repository: self.repository.clone(),
            fallback: self.fallback_version.clone(),
        }
    }

    /// Attach a resolved version. Only valid from `Declared`.
    pub fn pin(&mut self, resolved: ResolvedVersion) -> bool {
        if self.state != DependencyState::Declared {
            return false;
        }
        self.version = Some(resolved.version);
        self.origin = Some(resolved.origin);
        self.state = DependencyState::VersionPinned;
        true
    }

    /// Record a successful install. Unpinned dependencies install as
    /// "latest".
    pub fn mark_applied(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = DependencyState::Applied;
        true
    }

    /// Record a failure at any stage. Terminal.
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = DependencyState::Failed(reason.into());
        true
    }

    /// Version for display and manifests; `latest` when unpinned.
    pub fn version_or_latest(&self) -> &str {
        self.version.as_deref().unwrap_or("latest")
    }

    /// Whether the pin came from the hardcoded fallback table.
    pub fn used_fallback(&self) -> bool {
        self.origin.is_some_and(|o| o.is_fallback())
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, DependencyState::Failed(_))
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.identifier, self.version_or_latest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Capability, entries_for};

    fn gin() -> Dependency {
        let entries = entries_for(Capability::WebFramework, Ecosystem::Go).unwrap();
        Dependency::declared(entries[0])
    }

    #[test]
    fn declared_carries_catalog_data() {
        let dep = gin();
        assert_eq!(dep.identifier, "github.com/gin-gonic/gin");
        assert_eq!(dep.state, DependencyState::Declared);
        assert_eq!(dep.locator().repository(), Some("gin-gonic/gin"));
        assert_eq!(dep.locator().fallback(), Some("1.9.1"));
    }

    #[test]
    fn lifecycle_declared_pinned_applied() {
        let mut dep = gin();
        assert!(dep.pin(ResolvedVersion::new("1.10.0", VersionOrigin::Primary)));
        assert_eq!(dep.state, DependencyState::VersionPinned);
        assert!(dep.mark_applied());
        assert_eq!(dep.state, DependencyState::Applied);
        assert_eq!(dep.to_string(), "github.com/gin-gonic/gin@1.10.0");
    }

    #[test]
    fn failed_is_terminal() {
        let mut dep = gin();
        assert!(dep.mark_failed("go get exited with 1"));
        assert!(!dep.mark_applied());
        assert!(!dep.pin(ResolvedVersion::new("1.0.0", VersionOrigin::Primary)));
        assert!(dep.is_failed());
    }

    #[test]
    fn cannot_pin_twice() {
        let mut dep = gin();
        assert!(dep.pin(ResolvedVersion::new("1.9.1", VersionOrigin::FallbackDefault)));
        assert!(!dep.pin(ResolvedVersion::new("2.0.0", VersionOrigin::Primary)));
        assert_eq!(dep.version.as_deref(), Some("1.9.1"));
        assert!(dep.used_fallback());
    }

    #[test]
    fn ad_hoc_rejects_empty_identifier() {
        assert_eq!(
            Dependency::ad_hoc(Ecosystem::Node, "  ", Category::Production),
            Err(DomainError::EmptyLocator)
        );
    }

    #[test]
    fn unpinned_reads_as_latest() {
        let dep = Dependency::ad_hoc(Ecosystem::Node, "lodash", Category::Production).unwrap();
        assert_eq!(dep.version_or_latest(), "latest");
        assert!(dep.locator().fallback().is_none());
    }

    #[test]
    fn explicit_version_is_normalized() {
        let dep = Dependency::ad_hoc(Ecosystem::Go, "github.com/google/uuid", Category::Production)
            .unwrap()
            .with_version("v1.5.0");
        assert_eq!(dep.version.as_deref(), Some("1.5.0"));
        assert_eq!(dep.state, DependencyState::VersionPinned);
    }

    #[test]
    fn locator_requires_identifier() {
        assert!(PackageLocator::new(Ecosystem::Go, "").is_err());
        let loc = PackageLocator::new(Ecosystem::Go, "gorm.io/gorm").unwrap();
        assert_eq!(loc.to_string(), "go:gorm.io/gorm");
    }
}
