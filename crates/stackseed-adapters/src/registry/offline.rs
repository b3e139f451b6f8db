//! A source that never answers, for `--offline` runs.

use stackseed_core::{
    application::{ApplicationError, ports::VersionSource},
    domain::PackageLocator,
    error::SeedResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl VersionSource for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        Err(ApplicationError::RegistryUnavailable {
            source_name: self.name().into(),
            locator: locator.to_string(),
            reason: "offline mode".into(),
        }
        .into())
    }
}
