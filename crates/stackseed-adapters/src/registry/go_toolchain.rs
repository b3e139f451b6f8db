//! Go release index at `go.dev/dl`.

use serde::Deserialize;
use stackseed_core::{
    application::ports::VersionSource, domain::PackageLocator, error::SeedResult,
};

use crate::http::HttpClient;

/// One entry of the `?mode=json` download index.
#[derive(Debug, Clone, Deserialize)]
pub struct GoRelease {
    pub version: String,
    #[serde(default)]
    pub stable: bool,
}

/// Stable releases with the `go` prefix stripped.
pub fn stable_versions(releases: Vec<GoRelease>) -> Vec<String> {
    releases
        .into_iter()
        .filter(|r| r.stable)
        .map(|r| r.version.trim_start_matches("go").to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct GoToolchain {
    http: HttpClient,
    url: String,
}

impl GoToolchain {
    pub fn new(http: HttpClient, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }
}

impl VersionSource for GoToolchain {
    fn name(&self) -> &str {
        "go.dev"
    }

    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        self.http
            .get_json::<Vec<GoRelease>>(&self.url, "application/json")
            .map(stable_versions)
            .map_err(|e| e.for_source(self.name(), locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stable_releases_survive() {
        let body = r#"[
            { "version": "go1.23rc2", "stable": false, "files": [] },
            { "version": "go1.22.5", "stable": true, "files": [] },
            { "version": "go1.21.12", "stable": true, "files": [] }
        ]"#;
        let releases: Vec<GoRelease> = serde_json::from_str(body).unwrap();
        assert_eq!(stable_versions(releases), vec!["1.22.5", "1.21.12"]);
    }
}
