//! `stackseed resolve`: print the pinned dependency list.

use serde::Serialize;
use stackseed_core::domain::{Dependency, Ecosystem};
use tracing::{info, instrument};

use crate::{
    cli::{GlobalArgs, ProjectArgs},
    commands::{dependency_row, engine::Engine, project},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    project: &'a str,
    ecosystem: Ecosystem,
    offline: bool,
    warnings: &'a [String],
    dependencies: &'a [Dependency],
}

#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("")))]
pub fn execute(
    args: ProjectArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let project = project::load(&args)?;
    let engine = Engine::new(config, global.offline);
    let resolver = engine.resolver(project.ecosystem())?;

    let spinner = output.spinner("Resolving versions");
    let dependencies = resolver.resolve(&project.configuration);
    spinner.finish_and_clear();
    let dependencies = dependencies?;

    info!(count = dependencies.len(), "Dependencies resolved");

    if output.is_json() {
        output.json(&ResolveOutput {
            project: project.name(),
            ecosystem: project.ecosystem(),
            offline: engine.is_offline(),
            warnings: &project.warnings,
            dependencies: &dependencies,
        })?;
        return Ok(());
    }

    for warning in &project.warnings {
        output.warning(warning)?;
    }

    output.header(&format!(
        "{} {} dependencies for '{}' ({})",
        dependencies.len(),
        project.ecosystem(),
        project.name(),
        project.configuration.kind_str()
    ))?;
    for dep in &dependencies {
        output.data(&dependency_row(dep))?;
    }

    let fallbacks = dependencies.iter().filter(|d| d.used_fallback()).count();
    if fallbacks > 0 && !engine.is_offline() {
        output.warning(&format!(
            "{fallbacks} version(s) came from the built-in fallback table; registries were unreachable"
        ))?;
    }

    Ok(())
}
