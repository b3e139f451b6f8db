//! Configuration-to-Dependency Resolver.
//!
//! Plans the dependency list from the catalog, then pins each entry through
//! the registry client. Structure is deterministic; versions drift with the
//! registries.

use tracing::{info, instrument, warn};

use crate::{
    application::{ports::VersionSource, services::RegistryClient},
    domain::{
        Configuration, Dependency, DependencyState, GO_TOOLCHAIN_FALLBACK, ResolvedVersion,
        VersionOrigin, plan_dependencies, select_latest_stable,
    },
    error::SeedResult,
};

pub struct ResolverService {
    registry: RegistryClient,
    toolchain: Option<Box<dyn VersionSource>>,
}

impl ResolverService {
    pub fn new(registry: RegistryClient) -> Self {
        Self {
            registry,
            toolchain: None,
        }
    }

    /// Source for the Go `go` directive.
    pub fn with_toolchain(mut self, source: Box<dyn VersionSource>) -> Self {
        self.toolchain = Some(source);
        self
    }

    /// Ordered, version-pinned dependency list for a configuration.
    ///
    /// Only a catalog gap can fail this; registry trouble degrades per entry.
    #[instrument(
        skip_all,
        fields(project = %configuration.project_name(), ecosystem = %configuration.ecosystem())
    )]
    pub fn resolve(&self, configuration: &Configuration) -> SeedResult<Vec<Dependency>> {
        let mut dependencies = plan_dependencies(configuration)?;
        for dependency in &mut dependencies {
            self.pin(dependency);
        }

        let fallbacks = dependencies.iter().filter(|d| d.used_fallback()).count();
        info!(count = dependencies.len(), fallbacks, "Dependencies resolved");
        Ok(dependencies)
    }

    /// Pin one declared dependency. Already pinned ones are left alone.
    pub fn pin(&self, dependency: &mut Dependency) -> bool {
        if dependency.state != DependencyState::Declared {
            return false;
        }
        match self.registry.resolve_latest_version(&dependency.locator()) {
            Some(resolved) => dependency.pin(resolved),
            None => {
                warn!(dependency = %dependency.identifier, "Left unpinned, will install latest");
                false
            }
        }
    }

    /// Version for the `go` directive of a synthesized `go.mod`.
    ///
    /// `None` for Node and when the configuration pins its own version.
    pub fn resolve_toolchain(&self, configuration: &Configuration) -> Option<ResolvedVersion> {
        let Configuration::Backend(cfg) = configuration else {
            return None;
        };
        if cfg.go_version.is_some() {
            return None;
        }

        let latest = self.toolchain.as_ref().and_then(|source| {
            let locator = crate::domain::PackageLocator::new(configuration.ecosystem(), "go").ok()?;
            match source.fetch_versions(&locator) {
                Ok(versions) => select_latest_stable(&versions),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Toolchain lookup failed");
                    None
                }
            }
        });

        Some(match latest {
            Some(version) => ResolvedVersion::new(version, VersionOrigin::Primary),
            None => {
                warn!(
                    version = GO_TOOLCHAIN_FALLBACK,
                    "Using built-in Go toolchain version"
                );
                ResolvedVersion::new(GO_TOOLCHAIN_FALLBACK, VersionOrigin::FallbackDefault)
            }
        })
    }
}
