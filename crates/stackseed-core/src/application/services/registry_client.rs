//! Registry Client - tiered "latest stable version" lookup.
//!
//! Primary source, then secondary source, then the locator's hardcoded
//! default. Source failures are logged and swallowed; they never reach the
//! caller.

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::VersionSource,
    domain::{PackageLocator, ResolvedVersion, VersionOrigin, VersionRecord},
};

/// Two-tier registry lookup with a static last resort.
pub struct RegistryClient {
    primary: Box<dyn VersionSource>,
    secondary: Box<dyn VersionSource>,
}

impl RegistryClient {
    pub fn new(primary: Box<dyn VersionSource>, secondary: Box<dyn VersionSource>) -> Self {
        Self { primary, secondary }
    }

    /// Source names in lookup order, for diagnostics.
    pub fn source_names(&self) -> [&str; 2] {
        [self.primary.name(), self.secondary.name()]
    }

    /// Resolve the newest non-pre-release version of a package.
    ///
    /// Returns `None` only when both sources fail and the locator carries
    /// no fallback, which never happens for catalog entries.
    #[instrument(skip_all, fields(package = %locator))]
    pub fn resolve_latest_version(&self, locator: &PackageLocator) -> Option<ResolvedVersion> {
        let tiers = [
            (self.primary.as_ref(), VersionOrigin::Primary),
            (self.secondary.as_ref(), VersionOrigin::Secondary),
        ];

        for (source, origin) in tiers {
            if let Some(version) = Self::query(source, locator) {
                debug!(source = source.name(), %version, "Version resolved");
                return Some(ResolvedVersion::new(version, origin));
            }
        }

        match locator.fallback() {
            Some(version) => {
                warn!(
                    package = %locator,
                    %version,
                    "Registries unavailable, using built-in default version"
                );
                Some(ResolvedVersion::new(version, VersionOrigin::FallbackDefault))
            }
            None => {
                warn!(package = %locator, "No version available from any source");
                None
            }
        }
    }

    fn query(source: &dyn VersionSource, locator: &PackageLocator) -> Option<String> {
        match source.fetch_versions(locator) {
            Ok(versions) => {
                let record = VersionRecord::from_candidates(versions);
                if record.latest_stable.is_none() {
                    debug!(
                        source = source.name(),
                        candidates = record.versions.len(),
                        "No stable version in response"
                    );
                }
                record.latest_stable
            }
            Err(e) => {
                debug!(source = source.name(), error = %e, "Registry source failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{FailingSource, FixedSource};
    use crate::domain::Ecosystem;

    fn locator() -> PackageLocator {
        PackageLocator::new(Ecosystem::Go, "github.com/gin-gonic/gin")
            .unwrap()
            .with_repository(Some("gin-gonic/gin"))
            .with_fallback(Some("1.9.1"))
    }

    #[test]
    fn primary_wins_when_it_answers() {
        let client = RegistryClient::new(
            Box::new(FixedSource::new("github", &["v1.10.0"])),
            Box::new(FixedSource::new("goproxy", &["v1.9.0"])),
        );
        let resolved = client.resolve_latest_version(&locator()).unwrap();
        assert_eq!(resolved, ResolvedVersion::new("1.10.0", VersionOrigin::Primary));
    }

    #[test]
    fn secondary_filters_prereleases() {
        let client = RegistryClient::new(
            Box::new(FailingSource::new("github")),
            Box::new(FixedSource::new("goproxy", &["2.1.0", "2.2.0-beta", "2.0.9"])),
        );
        let resolved = client.resolve_latest_version(&locator()).unwrap();
        assert_eq!(resolved.version, "2.1.0");
        assert_eq!(resolved.origin, VersionOrigin::Secondary);
    }

    #[test]
    fn primary_with_only_prereleases_falls_through() {
        let client = RegistryClient::new(
            Box::new(FixedSource::new("github", &["v2.0.0-rc.1"])),
            Box::new(FixedSource::new("goproxy", &["v1.9.1"])),
        );
        let resolved = client.resolve_latest_version(&locator()).unwrap();
        assert_eq!(resolved.origin, VersionOrigin::Secondary);
    }

    #[test]
    fn total_failure_yields_fallback_every_time() {
        let client = RegistryClient::new(
            Box::new(FailingSource::new("github")),
            Box::new(FailingSource::new("goproxy")),
        );
        for _ in 0..2 {
            let resolved = client.resolve_latest_version(&locator()).unwrap();
            assert_eq!(resolved.version, "1.9.1");
            assert!(resolved.origin.is_fallback());
        }
    }

    #[test]
    fn no_fallback_means_none() {
        let client = RegistryClient::new(
            Box::new(FailingSource::new("npm-latest")),
            Box::new(FixedSource::new("npm-versions", &[])),
        );
        let bare = PackageLocator::new(Ecosystem::Node, "left-pad").unwrap();
        assert_eq!(client.resolve_latest_version(&bare), None);
        assert_eq!(client.source_names(), ["npm-latest", "npm-versions"]);
    }
}
