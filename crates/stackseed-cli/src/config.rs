//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STACKSEED_*` environment variables, `__` between sections
//!    (`STACKSEED_REGISTRY__OFFLINE=true`)
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use stackseed_adapters::{RegistryEndpoints, Timeouts};
use tracing::debug;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STACKSEED";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream indexes.
    pub registry: RegistryConfig,
    /// Subprocess deadlines.
    pub commands: CommandConfig,
    /// Node tool choice.
    pub node: NodeConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub github_api: String,
    pub go_proxy: String,
    pub npm_registry: String,
    pub go_toolchain_index: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Skip every registry and use fallback versions.
    pub offline: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let endpoints = RegistryEndpoints::default();
        Self {
            github_api: endpoints.github_api,
            go_proxy: endpoints.go_proxy,
            npm_registry: endpoints.npm_registry,
            go_toolchain_index: endpoints.go_toolchain_index,
            timeout_secs: 10,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub timeout_secs: u64,
    /// Downloads, installs, audits and tool builds.
    pub install_timeout_secs: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        let timeouts = Timeouts::default();
        Self {
            timeout_secs: timeouts.command.as_secs(),
            install_timeout_secs: timeouts.install.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// `pnpm` or `npm`; the other is used when this one is not installed.
    pub package_manager: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            package_manager: "pnpm".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// An explicit `config_file` must exist; the platform default may not.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("Failed to encode defaults")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        debug!(offline = config.registry.offline, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stackseed.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stackseed", "stackseed")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stackseed.toml"))
    }

    /// The file `config init` writes and `config path` reports.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    pub fn endpoints(&self) -> RegistryEndpoints {
        RegistryEndpoints {
            github_api: self.registry.github_api.clone(),
            go_proxy: self.registry.go_proxy.clone(),
            npm_registry: self.registry.npm_registry.clone(),
            go_toolchain_index: self.registry.go_toolchain_index.clone(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs.max(1))
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            command: Duration::from_secs(self.commands.timeout_secs.max(1)),
            install: Duration::from_secs(self.commands.install_timeout_secs.max(1)),
        }
    }

    /// Look up a dotted key, e.g. `registry.go_proxy`.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        match tree.pointer(&pointer)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Every key with its value, for `config list`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
