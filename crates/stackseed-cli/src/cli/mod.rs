//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stackseed_core::domain::{Ecosystem, PackageManagerKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackseed",
    bin_name = "stackseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Resolve and inject dependencies for Go/Gin and Vue 3 skeletons",
    long_about = "Stackseed maps a project configuration onto a version-pinned \
                  dependency set and applies it to go.mod or package.json \
                  through the ecosystem's own package manager.",
    after_help = "EXAMPLES:\n\
        \x20 stackseed resolve orders --ecosystem go --set database.type=mysql\n\
        \x20 stackseed manifest shop-ui --ecosystem node --set css_framework=tailwindcss\n\
        \x20 stackseed generate orders -e go --settings orders.json --git\n\
        \x20 stackseed deps add github.com/google/uuid --dir ./orders\n\
        \x20 stackseed completions bash > /usr/share/bash-completion/completions/stackseed",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the pinned dependency list for a configuration.
    #[command(
        visible_alias = "r",
        about = "Resolve dependencies and versions",
        after_help = "EXAMPLES:\n\
            \x20 stackseed resolve orders --ecosystem go\n\
            \x20 stackseed resolve shop-ui -e node --type pwa --output-format json\n\
            \x20 stackseed resolve --settings orders.toml --offline"
    )]
    Resolve(ProjectArgs),

    /// Render go.mod or package.json from the resolved list.
    #[command(
        about = "Synthesize the manifest file",
        after_help = "EXAMPLES:\n\
            \x20 stackseed manifest orders -e go\n\
            \x20 stackseed manifest orders -e go --write --dir ./orders"
    )]
    Manifest(ManifestArgs),

    /// Run the whole pipeline against a project directory.
    #[command(
        visible_alias = "g",
        about = "Resolve, write the manifest and install dependencies",
        after_help = "EXAMPLES:\n\
            \x20 stackseed generate orders -e go\n\
            \x20 stackseed generate orders -e go --dir ./svc/orders --dev-tools --git\n\
            \x20 stackseed generate shop-ui -e node --package-manager npm"
    )]
    Generate(GenerateArgs),

    /// Edit an existing project's dependencies.
    #[command(
        about = "Package-manager operations on an existing project",
        after_help = "EXAMPLES:\n\
            \x20 stackseed deps add github.com/google/uuid\n\
            \x20 stackseed deps add vitest --dev --dir ./shop-ui\n\
            \x20 stackseed deps update gorm.io/gorm --version v1.25.12\n\
            \x20 stackseed deps outdated"
    )]
    Deps(DepsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackseed completions bash > ~/.local/share/bash-completion/completions/stackseed\n\
            \x20 stackseed completions zsh  > ~/.zfunc/_stackseed\n\
            \x20 stackseed completions fish > ~/.config/fish/completions/stackseed.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the stackseed configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackseed config init\n\
            \x20 stackseed config get registry.go_proxy\n\
            \x20 stackseed config list"
    )]
    Config(ConfigCommands),
}

// ── project selection ─────────────────────────────────────────────────────────

/// Which project configuration to work with.
///
/// Flags win over the settings file, which wins over built-in defaults.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project name; taken from the settings file when omitted.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Target ecosystem.
    #[arg(
        short = 'e',
        long = "ecosystem",
        value_name = "ECOSYSTEM",
        value_enum,
        help = "Target ecosystem"
    )]
    pub ecosystem: Option<EcosystemArg>,

    /// Project type, e.g. `api`, `microservice`, `spa`, `pwa`.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        help = "Project type"
    )]
    pub project_type: Option<String>,

    /// JSON or TOML file with settings overrides.
    #[arg(
        short = 's',
        long = "settings",
        value_name = "FILE",
        help = "Settings file (JSON or TOML)"
    )]
    pub settings: Option<PathBuf>,

    /// Individual overrides as dotted paths, e.g. `database.type=mysql`.
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        help = "Override one setting (repeatable)"
    )]
    pub set: Vec<String>,
}

// ── manifest ──────────────────────────────────────────────────────────────────

/// Arguments for `stackseed manifest`.
#[derive(Debug, Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the manifest into `--dir` instead of printing it.
    #[arg(short = 'w', long = "write", help = "Write the file instead of printing")]
    pub write: bool,

    /// Target directory for `--write`.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        requires = "write",
        help = "Project directory (default: ./<name>)"
    )]
    pub dir: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stackseed generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Project directory.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Project directory (default: ./<name>)"
    )]
    pub dir: Option<PathBuf>,

    /// Node package manager to prefer when several are installed.
    #[arg(
        long = "package-manager",
        value_name = "TOOL",
        value_enum,
        help = "Preferred Node package manager"
    )]
    pub package_manager: Option<NodeManagerArg>,

    /// Create the manifest with the package manager's `init` instead.
    #[arg(long = "no-synthesize", help = "Use the package manager's init")]
    pub no_synthesize: bool,

    /// Install Go developer tools after the dependencies.
    #[arg(long = "dev-tools", help = "Install developer tools (Go)")]
    pub dev_tools: bool,

    /// Initialise a git repository with an initial commit.
    #[arg(long = "git", help = "Create a git repository and initial commit")]
    pub git: bool,
}

// ── deps ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackseed deps`.
#[derive(Debug, Args)]
pub struct DepsArgs {
    /// Project directory containing go.mod or package.json.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        global = true,
        help = "Project directory"
    )]
    pub dir: PathBuf,

    /// Ecosystem; detected from the manifest when omitted.
    #[arg(
        short = 'e',
        long = "ecosystem",
        value_enum,
        global = true,
        help = "Target ecosystem"
    )]
    pub ecosystem: Option<EcosystemArg>,

    /// Node package manager to prefer when several are installed.
    #[arg(
        long = "package-manager",
        value_name = "TOOL",
        value_enum,
        global = true,
        help = "Preferred Node package manager"
    )]
    pub package_manager: Option<NodeManagerArg>,

    #[command(subcommand)]
    pub action: DepsCommands,
}

/// Subcommands for `stackseed deps`.
#[derive(Debug, Subcommand)]
pub enum DepsCommands {
    /// Add one package, pinned to the latest stable version unless given.
    Add {
        /// Module path or package name.
        package: String,
        /// Exact version to pin.
        #[arg(long = "version", value_name = "VERSION")]
        version: Option<String>,
        /// Record as a development dependency.
        #[arg(short = 'D', long = "dev")]
        dev: bool,
    },
    /// Remove one package.
    Remove {
        /// Module path or package name.
        package: String,
    },
    /// Update one package, or everything when no package is given.
    Update {
        /// Module path or package name.
        package: Option<String>,
        /// Target version.
        #[arg(long = "version", value_name = "VERSION", requires = "package")]
        version: Option<String>,
    },
    /// Tidy the manifest (`go mod tidy`, `pnpm dedupe`).
    Tidy,
    /// Download or install everything the manifest declares.
    Install,
    /// Check installed packages against the manifest.
    Verify,
    /// Remove packages the manifest no longer declares.
    Prune,
    /// List installed packages.
    List,
    /// Show packages with newer versions.
    Outdated,
    /// Report known vulnerabilities.
    Audit,
}

impl DepsCommands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Update { .. } => "update",
            Self::Tidy => "tidy",
            Self::Install => "install",
            Self::Verify => "verify",
            Self::Prune => "prune",
            Self::List => "list",
            Self::Outdated => "outdated",
            Self::Audit => "audit",
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackseed completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackseed config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with the current values.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.npm_registry`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported ecosystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum EcosystemArg {
    /// Go modules with Gin; also accepted as `golang`, `backend`.
    #[value(alias = "golang", alias = "backend")]
    Go,
    /// Node with Vue 3; also accepted as `vue`, `frontend`.
    #[value(alias = "vue", alias = "frontend")]
    Node,
}

impl From<EcosystemArg> for Ecosystem {
    fn from(arg: EcosystemArg) -> Self {
        match arg {
            EcosystemArg::Go => Ecosystem::Go,
            EcosystemArg::Node => Ecosystem::Node,
        }
    }
}

impl std::fmt::Display for EcosystemArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Ecosystem::from(*self))
    }
}

/// Node package managers that can be preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum NodeManagerArg {
    Pnpm,
    Npm,
}

impl From<NodeManagerArg> for PackageManagerKind {
    fn from(arg: NodeManagerArg) -> Self {
        match arg {
            NodeManagerArg::Pnpm => PackageManagerKind::Pnpm,
            NodeManagerArg::Npm => PackageManagerKind::Npm,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ecosystem_display() {
        assert_eq!(EcosystemArg::Go.to_string(), "go");
        assert_eq!(EcosystemArg::Node.to_string(), "node");
    }

    #[test]
    fn parse_resolve_command() {
        let cli = Cli::parse_from([
            "stackseed",
            "resolve",
            "orders",
            "--ecosystem",
            "go",
            "--set",
            "database.type=mysql",
            "--set",
            "cache.enabled=true",
        ]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected Resolve command");
        };
        assert_eq!(args.name.as_deref(), Some("orders"));
        assert_eq!(args.ecosystem, Some(EcosystemArg::Go));
        assert_eq!(args.set.len(), 2);
    }

    #[test]
    fn vue_alias() {
        let cli = Cli::parse_from(["stackseed", "resolve", "ui", "-e", "vue"]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected Resolve command");
        };
        assert_eq!(args.ecosystem, Some(EcosystemArg::Node));
    }

    #[test]
    fn generate_flags() {
        let cli = Cli::parse_from([
            "stackseed",
            "generate",
            "orders",
            "-e",
            "go",
            "--dir",
            "/tmp/orders",
            "--dev-tools",
            "--git",
            "--offline",
        ]);
        assert!(cli.global.offline);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert!(args.dev_tools && args.git && !args.no_synthesize);
        assert_eq!(args.dir, Some(PathBuf::from("/tmp/orders")));
    }

    #[test]
    fn deps_add_with_dir_after_subcommand() {
        let cli = Cli::parse_from([
            "stackseed", "deps", "add", "vitest", "--dev", "--dir", "ui",
        ]);
        let Commands::Deps(args) = cli.command else {
            panic!("expected Deps command");
        };
        assert_eq!(args.dir, PathBuf::from("ui"));
        assert!(matches!(args.action, DepsCommands::Add { dev: true, .. }));
    }

    #[test]
    fn deps_update_version_needs_package() {
        let result = Cli::try_parse_from(["stackseed", "deps", "update", "--version", "1.0.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn manifest_dir_needs_write() {
        let result = Cli::try_parse_from(["stackseed", "manifest", "x", "--dir", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stackseed", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }
}
