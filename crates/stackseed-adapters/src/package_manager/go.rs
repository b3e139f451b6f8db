//! Go modules through the `go` tool.

use stackseed_core::{
    application::ports::{Invocation, PackageManager},
    domain::{Configuration, Dependency, PackageManagerKind},
};

use super::Timeouts;

const GO: &str = "go";

/// Tools installed with `go install <path>@latest`.
const DEV_TOOLS: &[&str] = &[
    "github.com/air-verse/air",
    "github.com/swaggo/swag/cmd/swag",
    "github.com/golangci/golangci-lint/cmd/golangci-lint",
    "golang.org/x/tools/cmd/goimports",
    "go.uber.org/mock/mockgen",
];

const GRPC_TOOLS: &[&str] = &[
    "google.golang.org/protobuf/cmd/protoc-gen-go",
    "google.golang.org/grpc/cmd/protoc-gen-go-grpc",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct GoModules {
    timeouts: Timeouts,
}

impl GoModules {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }

    fn cmd<const N: usize>(&self, args: [&str; N]) -> Invocation {
        Invocation::new(GO, args, self.timeouts.command)
    }

    fn long<const N: usize>(&self, args: [&str; N]) -> Invocation {
        Invocation::new(GO, args, self.timeouts.install)
    }
}

/// `module@vX.Y.Z` for numeric versions, `module@<query>` for `latest` or
/// a branch, and `module@latest` when unpinned.
fn module_query(identifier: &str, version: Option<&str>) -> String {
    match version.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => {
            let bare = v.strip_prefix('v').unwrap_or(v);
            if bare.starts_with(|c: char| c.is_ascii_digit()) {
                format!("{identifier}@v{bare}")
            } else {
                format!("{identifier}@{v}")
            }
        }
        None => format!("{identifier}@latest"),
    }
}

impl PackageManager for GoModules {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Go
    }

    fn probe(&self) -> Invocation {
        self.cmd(["version"])
    }

    fn init(&self, configuration: &Configuration) -> Vec<Invocation> {
        match configuration {
            Configuration::Backend(cfg) => vec![self.cmd(["mod", "init", &cfg.module_path])],
            Configuration::Frontend(_) => Vec::new(),
        }
    }

    fn add(&self, dependency: &Dependency) -> Vec<Invocation> {
        let query = module_query(&dependency.identifier, dependency.version.as_deref());
        vec![self.cmd(["get", &query])]
    }

    fn remove(&self, identifier: &str) -> Vec<Invocation> {
        let drop = format!("-droprequire={identifier}");
        vec![
            self.cmd(["mod", "edit", &drop]),
            self.long(["mod", "tidy"]),
        ]
    }

    fn update(&self, identifier: Option<&str>, version: Option<&str>) -> Vec<Invocation> {
        match (identifier, version) {
            (Some(id), Some(v)) => vec![self.cmd(["get", &module_query(id, Some(v))])],
            (Some(id), None) => vec![self.cmd(["get", "-u", id])],
            (None, _) => vec![self.long(["get", "-u", "./..."])],
        }
    }

    fn tidy(&self) -> Vec<Invocation> {
        vec![self.long(["mod", "tidy"])]
    }

    fn install(&self) -> Vec<Invocation> {
        vec![self.long(["mod", "download"])]
    }

    fn verify(&self) -> Vec<Invocation> {
        vec![self.long(["mod", "verify"])]
    }

    fn list(&self) -> Vec<Invocation> {
        vec![self.cmd(["list", "-m", "all"])]
    }

    fn outdated(&self) -> Vec<Invocation> {
        vec![self.long(["list", "-m", "-u", "all"])]
    }

    fn audit(&self) -> Vec<Invocation> {
        vec![self.long(["run", "golang.org/x/vuln/cmd/govulncheck@latest", "./..."])]
    }

    fn prune(&self) -> Vec<Invocation> {
        // `go mod tidy` already drops unused requirements.
        Vec::new()
    }

    fn dev_tools(&self, configuration: &Configuration) -> Vec<Invocation> {
        let Configuration::Backend(cfg) = configuration else {
            return Vec::new();
        };
        let grpc = if cfg.grpc { GRPC_TOOLS } else { &[] };
        DEV_TOOLS
            .iter()
            .chain(grpc)
            .map(|tool| self.long(["install", &format!("{tool}@latest")]))
            .collect()
    }
}
