//! Go module proxy `@v/list`, the secondary Go source.

use stackseed_core::{
    application::ports::VersionSource, domain::PackageLocator, error::SeedResult,
};
use tracing::instrument;

use crate::http::{HttpClient, RegistryError};

#[derive(Debug, Clone)]
pub struct GoProxy {
    http: HttpClient,
    base: String,
}

impl GoProxy {
    pub fn new(http: HttpClient, base: &str) -> Self {
        Self {
            http,
            base: super::trim_base(base),
        }
    }

    fn list(&self, identifier: &str) -> Result<Vec<String>, RegistryError> {
        let url = format!("{}/{}/@v/list", self.base, escape_module_path(identifier));
        let versions = parse_version_list(&self.http.get_text(&url)?);
        if versions.is_empty() {
            return Err(RegistryError::NoVersions {
                identifier: identifier.to_string(),
            });
        }
        Ok(versions)
    }
}

impl VersionSource for GoProxy {
    fn name(&self) -> &str {
        "goproxy"
    }

    #[instrument(skip_all, fields(package = %locator))]
    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        self.list(locator.identifier())
            .map_err(|e| e.for_source(self.name(), locator))
    }
}

/// Case-encode a module path for the proxy protocol: each upper-case letter
/// becomes `!` followed by its lower-case form.
pub fn escape_module_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// One version per line; blank lines ignored.
pub fn parse_version_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackseed_core::domain::select_latest_stable;

    #[test]
    fn escapes_upper_case_letters() {
        assert_eq!(
            escape_module_path("github.com/BurntSushi/toml"),
            "github.com/!burnt!sushi/toml"
        );
        assert_eq!(escape_module_path("gorm.io/gorm"), "gorm.io/gorm");
    }

    #[test]
    fn list_feeds_stable_selection() {
        let body = "v1.9.0\nv1.9.1\n\nv1.10.0-rc1\nv1.8.2\n";
        let versions = parse_version_list(body);
        assert_eq!(versions.len(), 4);
        assert_eq!(select_latest_stable(&versions).as_deref(), Some("1.9.1"));
    }
}
