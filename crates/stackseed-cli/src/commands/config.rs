//! `stackseed config`: inspect and initialise configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` flag, if any.
pub fn execute(
    cmd: ConfigCommands,
    config: &AppConfig,
    config_file: Option<&Path>,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            let path = AppConfig::active_path(config_file);
            write_config(config, &path, force)?;
            output.success(&format!("Wrote {}", path.display()))?;
        }

        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(config)?;
            } else {
                output.header("Current Configuration:")?;
                output.data(&serialise(config)?)?;
            }
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::active_path(config_file).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn serialise(config: &AppConfig) -> CliResult<String> {
    config.to_toml().map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn write_config(config: &AppConfig, path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, serialise(config)?)
        .with_cli_context(|| format!("writing {}", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
