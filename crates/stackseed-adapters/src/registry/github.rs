//! GitHub "latest release" lookup, the primary Go source.

use serde::Deserialize;
use stackseed_core::{
    application::ports::VersionSource,
    domain::{PackageLocator, version::parse_lenient},
    error::SeedResult,
};
use tracing::instrument;

use crate::http::{HttpClient, RegistryError};

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Reads `tag_name` of a repository's latest release.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    http: HttpClient,
    api_base: String,
}

impl GithubReleases {
    pub fn new(http: HttpClient, api_base: &str) -> Self {
        Self {
            http,
            api_base: super::trim_base(api_base),
        }
    }

    fn latest_tag(&self, locator: &PackageLocator) -> Result<String, RegistryError> {
        let repository = locator
            .repository()
            .ok_or_else(|| RegistryError::MissingRepository {
                identifier: locator.identifier().to_string(),
            })?;
        let url = format!("{}/repos/{}/releases/latest", self.api_base, repository);
        let release: LatestRelease = self.http.get_github_json(&url)?;
        check_major(locator.identifier(), &release.tag_name)?;
        Ok(release.tag_name)
    }
}

impl VersionSource for GithubReleases {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip_all, fields(package = %locator))]
    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        self.latest_tag(locator)
            .map(|tag| vec![tag])
            .map_err(|e| e.for_source(self.name(), locator))
    }
}

/// Major version a Go module path commits to.
///
/// `example.com/mod/v5` and `gopkg.in/yaml.v3` carry it explicitly; any other
/// path is restricted to v0 or v1.
pub fn module_major(identifier: &str) -> Option<u64> {
    let last = identifier.rsplit('/').next()?;
    let suffix = if identifier.starts_with("gopkg.in/") {
        last.rsplit_once(".v").map(|(_, n)| n)
    } else {
        last.strip_prefix('v')
    }?;
    suffix.parse().ok().filter(|n| *n >= 2 || identifier.starts_with("gopkg.in/"))
}

/// Reject a release tag from a different major line than the module path.
///
/// One repository often hosts several majors, and its newest release can
/// belong to a path the caller did not ask for.
pub fn check_major(identifier: &str, tag: &str) -> Result<(), RegistryError> {
    let Some(version) = parse_lenient(tag) else {
        return Ok(());
    };
    let matches = match module_major(identifier) {
        Some(major) => version.major == major,
        None => version.major <= 1,
    };
    if matches {
        Ok(())
    } else {
        Err(RegistryError::MajorMismatch {
            identifier: identifier.to_string(),
            tag: tag.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackseed_core::domain::Ecosystem;

    #[test]
    fn module_major_reads_path_suffixes() {
        assert_eq!(module_major("github.com/golang-jwt/jwt/v5"), Some(5));
        assert_eq!(module_major("github.com/gin-gonic/gin"), None);
        assert_eq!(module_major("gopkg.in/yaml.v3"), Some(3));
        assert_eq!(module_major("github.com/swaggo/gin-swagger"), None);
        // v1 suffixes are not a thing in Go module paths
        assert_eq!(module_major("example.com/thing/v1"), None);
    }

    #[test]
    fn check_major_rejects_other_major_lines() {
        assert!(check_major("github.com/golang-jwt/jwt/v5", "v5.2.1").is_ok());
        assert!(matches!(
            check_major("github.com/golang-jwt/jwt/v5", "v4.5.0"),
            Err(RegistryError::MajorMismatch { .. })
        ));
        assert!(check_major("github.com/gin-gonic/gin", "v1.10.0").is_ok());
        assert!(check_major("github.com/gin-gonic/gin", "v2.0.0").is_err());
        assert!(check_major("github.com/redis/go-redis/v9", "v9.5.1").is_ok());
    }

    #[test]
    fn unparseable_tags_pass_through_for_selection_to_discard() {
        assert!(check_major("github.com/gin-gonic/gin", "nightly").is_ok());
    }

    #[test]
    fn missing_repository_fails_without_network() {
        let http = HttpClient::new(crate::http::HttpConfig::default()).unwrap();
        let source = GithubReleases::new(http, "http://127.0.0.1:9/");
        let locator = PackageLocator::new(Ecosystem::Go, "gorm.io/gorm").unwrap();
        let err = source.fetch_versions(&locator).unwrap_err();
        assert!(err.to_string().contains("no repository known"));
    }
}
