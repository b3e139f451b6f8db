//! Adapter wiring: the one place that picks concrete implementations.

use std::path::Path;

use stackseed_adapters::{
    GitCli, GoModules, LocalFilesystem, SystemRunner, detect_node_manager,
    http::{HttpClient, HttpConfig},
    registry::{registry_client, toolchain_source},
};
use stackseed_core::{
    application::ports::{CommandRunner, PackageManager},
    domain::{Ecosystem, PackageManagerKind},
    prelude::{ManifestMutator, ResolverService},
};
use tracing::debug;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Settings shared by every command that touches a registry or a tool.
pub struct Engine<'a> {
    config: &'a AppConfig,
    offline: bool,
}

impl<'a> Engine<'a> {
    /// `offline` from the command line is OR-ed with the config value.
    pub fn new(config: &'a AppConfig, offline: bool) -> Self {
        Self {
            config,
            offline: offline || config.registry.offline,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    fn http(&self) -> CliResult<HttpClient> {
        HttpClient::new(HttpConfig {
            timeout: self.config.http_timeout(),
            ..HttpConfig::default()
        })
        .map_err(|e| CliError::ConfigError {
            message: format!("cannot build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Resolver over the ecosystem's two registry tiers, plus the Go
    /// toolchain index for Go.
    pub fn resolver(&self, ecosystem: Ecosystem) -> CliResult<ResolverService> {
        let http = self.http()?;
        let endpoints = self.config.endpoints();
        let resolver = ResolverService::new(registry_client(
            ecosystem,
            self.offline,
            &endpoints,
            &http,
        ));
        debug!(%ecosystem, offline = self.offline, "Resolver ready");
        Ok(match ecosystem {
            Ecosystem::Go => {
                resolver.with_toolchain(toolchain_source(self.offline, &endpoints, &http))
            }
            Ecosystem::Node => resolver,
        })
    }

    /// `go` for Go; for Node, the preferred manager if installed, then pnpm,
    /// then npm.
    pub fn package_manager(
        &self,
        ecosystem: Ecosystem,
        preferred: Option<PackageManagerKind>,
        runner: &dyn CommandRunner,
    ) -> CliResult<Box<dyn PackageManager>> {
        let timeouts = self.config.timeouts();
        match ecosystem {
            Ecosystem::Go => Ok(Box::new(GoModules::new(timeouts))),
            Ecosystem::Node => {
                let preferred = match preferred {
                    Some(kind) => Some(kind),
                    None => Some(self.configured_node_manager()?),
                };
                Ok(Box::new(detect_node_manager(runner, preferred, timeouts)?))
            }
        }
    }

    fn configured_node_manager(&self) -> CliResult<PackageManagerKind> {
        let raw = &self.config.node.package_manager;
        match raw.parse::<PackageManagerKind>() {
            Ok(kind) if kind.ecosystem() == Ecosystem::Node => Ok(kind),
            _ => Err(CliError::ConfigError {
                message: format!("node.package_manager must be 'pnpm' or 'npm', not '{raw}'"),
                source: None,
            }),
        }
    }

    /// Mutator over the real filesystem and real subprocesses.
    pub fn mutator(
        &self,
        ecosystem: Ecosystem,
        preferred: Option<PackageManagerKind>,
        project_dir: &Path,
    ) -> CliResult<ManifestMutator> {
        let runner = SystemRunner::new();
        let manager = self.package_manager(ecosystem, preferred, &runner)?;
        Ok(ManifestMutator::new(
            manager,
            Box::new(runner),
            Box::new(LocalFilesystem::new()),
            project_dir,
        ))
    }

    pub fn git(&self) -> GitCli {
        GitCli::new(Box::new(SystemRunner::new()), self.config.timeouts().command)
    }
}
