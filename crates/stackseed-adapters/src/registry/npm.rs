//! npm registry lookups, both Node tiers.

use std::collections::BTreeMap;

use serde::{Deserialize, de::IgnoredAny};
use stackseed_core::{
    application::ports::VersionSource, domain::PackageLocator, error::SeedResult,
};
use tracing::instrument;

use crate::http::{HttpClient, RegistryError};

/// Abbreviated metadata document; only the fields we read.
const ABBREVIATED: &str = "application/vnd.npm.install-v1+json";

#[derive(Debug, Deserialize)]
struct DistTagLatest {
    version: String,
}

/// Package document ("packument") from `GET /{name}`.
#[derive(Debug, Default, Deserialize)]
pub struct Packument {
    #[serde(default, rename = "dist-tags")]
    pub dist_tags: BTreeMap<String, String>,
    #[serde(default)]
    pub versions: BTreeMap<String, IgnoredAny>,
}

impl Packument {
    /// Every published version, in registry key order.
    pub fn into_versions(self) -> Vec<String> {
        self.versions.into_keys().collect()
    }
}

/// Scoped names keep their `@` but encode the slash.
pub fn encode_package_name(name: &str) -> String {
    name.replace('/', "%2F")
}

/// `GET /{name}/latest`: the `latest` dist-tag's manifest.
#[derive(Debug, Clone)]
pub struct NpmLatest {
    http: HttpClient,
    base: String,
}

impl NpmLatest {
    pub fn new(http: HttpClient, base: &str) -> Self {
        Self {
            http,
            base: super::trim_base(base),
        }
    }
}

impl VersionSource for NpmLatest {
    fn name(&self) -> &str {
        "npm-latest"
    }

    #[instrument(skip_all, fields(package = %locator))]
    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        let url = format!(
            "{}/{}/latest",
            self.base,
            encode_package_name(locator.identifier())
        );
        self.http
            .get_json::<DistTagLatest>(&url, "application/json")
            .map(|latest| vec![latest.version])
            .map_err(|e| e.for_source(self.name(), locator))
    }
}

/// `GET /{name}`: every published version.
#[derive(Debug, Clone)]
pub struct NpmVersions {
    http: HttpClient,
    base: String,
}

impl NpmVersions {
    pub fn new(http: HttpClient, base: &str) -> Self {
        Self {
            http,
            base: super::trim_base(base),
        }
    }

    fn versions(&self, identifier: &str) -> Result<Vec<String>, RegistryError> {
        let url = format!("{}/{}", self.base, encode_package_name(identifier));
        let versions = self.http.get_json::<Packument>(&url, ABBREVIATED)?.into_versions();
        if versions.is_empty() {
            return Err(RegistryError::NoVersions {
                identifier: identifier.to_string(),
            });
        }
        Ok(versions)
    }
}

impl VersionSource for NpmVersions {
    fn name(&self) -> &str {
        "npm-versions"
    }

    #[instrument(skip_all, fields(package = %locator))]
    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        self.versions(locator.identifier())
            .map_err(|e| e.for_source(self.name(), locator))
    }
}
