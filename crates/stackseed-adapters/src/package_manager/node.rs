//! Node package managers: `pnpm`, with `npm` as the fallback.

use stackseed_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Invocation, PackageManager},
    },
    domain::{Configuration, Dependency, PackageManagerKind},
    error::SeedResult,
};
use tracing::debug;

use super::Timeouts;

#[derive(Debug, Clone, Copy)]
pub struct NodePackageManager {
    kind: PackageManagerKind,
    timeouts: Timeouts,
}

impl NodePackageManager {
    pub fn pnpm(timeouts: Timeouts) -> Self {
        Self {
            kind: PackageManagerKind::Pnpm,
            timeouts,
        }
    }

    pub fn npm(timeouts: Timeouts) -> Self {
        Self {
            kind: PackageManagerKind::Npm,
            timeouts,
        }
    }

    fn is_npm(&self) -> bool {
        self.kind == PackageManagerKind::Npm
    }

    fn cmd<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.kind.program(), args, self.timeouts.command)
    }

    fn long<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(self.kind.program(), args, self.timeouts.install)
    }
}

/// Pick the Node package manager: `preferred` if installed, else pnpm,
/// else npm.
pub fn detect_node_manager(
    runner: &dyn CommandRunner,
    preferred: Option<PackageManagerKind>,
    timeouts: Timeouts,
) -> SeedResult<NodePackageManager> {
    let order = preferred
        .into_iter()
        .chain([PackageManagerKind::Pnpm, PackageManagerKind::Npm])
        .filter(|k| matches!(k, PackageManagerKind::Pnpm | PackageManagerKind::Npm));

    for kind in order {
        if runner.is_available(kind.program()) {
            debug!(manager = %kind, "Node package manager detected");
            return Ok(NodePackageManager { kind, timeouts });
        }
    }

    Err(ApplicationError::ToolMissing {
        tool: preferred
            .filter(|k| *k != PackageManagerKind::Go)
            .unwrap_or(PackageManagerKind::Pnpm)
            .program()
            .to_string(),
    }
    .into())
}

impl PackageManager for NodePackageManager {
    fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    fn probe(&self) -> Invocation {
        self.cmd(["--version"])
    }

    fn init(&self, configuration: &Configuration) -> Vec<Invocation> {
        match configuration {
            Configuration::Frontend(_) if self.is_npm() => vec![self.cmd(["init", "-y"])],
            Configuration::Frontend(_) => vec![self.cmd(["init"])],
            Configuration::Backend(_) => Vec::new(),
        }
    }

    fn add(&self, dependency: &Dependency) -> Vec<Invocation> {
        let spec = format!("{}@{}", dependency.identifier, dependency.version_or_latest());
        let dev = dependency.category.is_dev();
        let args: Vec<String> = match (self.is_npm(), dev) {
            (true, true) => vec!["install".into(), "--save-dev".into(), spec],
            (true, false) => vec!["install".into(), spec],
            (false, true) => vec!["add".into(), "-D".into(), spec],
            (false, false) => vec!["add".into(), spec],
        };
        vec![self.long(args)]
    }

    fn remove(&self, identifier: &str) -> Vec<Invocation> {
        let verb = if self.is_npm() { "uninstall" } else { "remove" };
        vec![self.cmd([verb, identifier])]
    }

    fn update(&self, identifier: Option<&str>, version: Option<&str>) -> Vec<Invocation> {
        match (identifier, version) {
            // `npm update` ignores version specs; an explicit one is an install.
            (Some(id), Some(v)) if self.is_npm() => {
                vec![self.long(["install".to_string(), format!("{id}@{v}")])]
            }
            (Some(id), Some(v)) => vec![self.long(["update".to_string(), format!("{id}@{v}")])],
            (Some(id), None) => vec![self.long(["update", id])],
            (None, _) => vec![self.long(["update"])],
        }
    }

    fn tidy(&self) -> Vec<Invocation> {
        vec![self.long(["dedupe"])]
    }

    fn install(&self) -> Vec<Invocation> {
        vec![self.long(["install"])]
    }

    fn verify(&self) -> Vec<Invocation> {
        vec![self.cmd(["ls", "--depth", "0"])]
    }

    fn list(&self) -> Vec<Invocation> {
        vec![self.cmd(["list", "--json", "--depth", "0"])]
    }

    fn outdated(&self) -> Vec<Invocation> {
        vec![self.long(["outdated", "--json"])]
    }

    fn audit(&self) -> Vec<Invocation> {
        vec![self.long(["audit"])]
    }

    fn prune(&self) -> Vec<Invocation> {
        vec![self.long(["prune"])]
    }

    fn dev_tools(&self, _configuration: &Configuration) -> Vec<Invocation> {
        // Vue tooling ships as devDependencies.
        Vec::new()
    }
}
