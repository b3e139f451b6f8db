//! `stackseed manifest`: render go.mod or package.json.
//!
//! Printing is the default. `--write` creates the file but never replaces
//! one that exists.

use std::path::PathBuf;

use serde::Serialize;
use stackseed_adapters::LocalFilesystem;
use stackseed_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Ecosystem, synthesize},
    error::SeedError,
};
use tracing::{info, instrument};

use crate::{
    cli::{GlobalArgs, ManifestArgs},
    commands::{engine::Engine, project},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ManifestOutput<'a> {
    ecosystem: Ecosystem,
    file: &'static str,
    path: Option<PathBuf>,
    toolchain: Option<&'a str>,
    content: &'a str,
}

#[instrument(skip_all)]
pub fn execute(
    args: ManifestArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let project = project::load(&args.project)?;
    let resolver = Engine::new(config, global.offline).resolver(project.ecosystem())?;

    let spinner = output.spinner("Resolving versions");
    let dependencies = resolver.resolve(&project.configuration);
    let toolchain = resolver.resolve_toolchain(&project.configuration);
    spinner.finish_and_clear();
    let dependencies = dependencies?;

    let toolchain = toolchain.as_ref().map(|t| t.version.as_str());
    let manifest = synthesize(&project.configuration, &dependencies, toolchain)
        .map_err(SeedError::from)?;

    for warning in &project.warnings {
        output.warning(warning)?;
    }

    let written = if args.write {
        let dir = args
            .dir
            .unwrap_or_else(|| PathBuf::from(project.name()));
        let path = dir.join(manifest.file_name());

        let fs = LocalFilesystem::new();
        if fs.exists(&path) {
            return Err(SeedError::from(ApplicationError::ManifestExists { path }).into());
        }
        fs.create_dir_all(&dir)?;
        fs.write_file(&path, &manifest.content)?;
        info!(path = %path.display(), "Manifest written");
        Some(path)
    } else {
        None
    };

    if output.is_json() {
        output.json(&ManifestOutput {
            ecosystem: manifest.ecosystem,
            file: manifest.file_name(),
            path: written,
            toolchain,
            content: &manifest.content,
        })?;
    } else if let Some(path) = written {
        output.success(&format!("Wrote {}", path.display()))?;
    } else {
        output.data(&manifest.content)?;
    }

    Ok(())
}
