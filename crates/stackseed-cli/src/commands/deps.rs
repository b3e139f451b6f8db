//! `stackseed deps`: package-manager operations on an existing project.

use std::path::Path;

use stackseed_core::{
    application::ports::CommandOutput,
    domain::{Category, Dependency, Ecosystem, PackageManagerKind, find_by_identifier},
    error::SeedError,
    prelude::ResolverService,
};
use tracing::{debug, info, instrument};

use crate::{
    cli::{DepsArgs, DepsCommands, GlobalArgs},
    commands::engine::Engine,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(operation = args.action.name(), dir = %args.dir.display()))]
pub fn execute(
    args: DepsArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let ecosystem = match args.ecosystem {
        Some(arg) => Ecosystem::from(arg),
        None => detect_ecosystem(&args.dir)?,
    };
    debug!(%ecosystem, "Ecosystem selected");

    let engine = Engine::new(config, global.offline);
    let preferred = args.package_manager.map(PackageManagerKind::from);
    let mutator = engine.mutator(ecosystem, preferred, &args.dir)?;
    mutator.check_tool()?;

    let operation = args.action.name();
    let ok = match args.action {
        DepsCommands::Add {
            package,
            version,
            dev,
        } => {
            let resolver = engine.resolver(ecosystem)?;
            let mut dependency = declare(ecosystem, &package, version.as_deref(), dev, &resolver)?;
            let ok = mutator.apply(&mut dependency);
            if ok {
                announce_added(&dependency, output)?;
            }
            ok
        }
        DepsCommands::Remove { package } => mutator.remove(&package),
        DepsCommands::Update { package, version } => {
            mutator.update(package.as_deref(), version.as_deref())
        }
        DepsCommands::Tidy => mutator.tidy(),
        DepsCommands::Install => mutator.install(),
        DepsCommands::Verify => mutator.verify(),
        DepsCommands::Prune => mutator.prune(),
        DepsCommands::List => show(mutator.list(), output)?,
        DepsCommands::Outdated => show(mutator.outdated(), output)?,
        DepsCommands::Audit => show(mutator.audit(), output)?,
    };

    if !ok {
        return Err(CliError::OperationFailed {
            operation: operation.to_string(),
            dir: args.dir,
        });
    }

    info!(operation, "Operation finished");
    if !matches!(operation, "add" | "list" | "outdated" | "audit") {
        output.success(&format!("{operation} finished in {}", args.dir.display()))?;
    }
    Ok(())
}

/// `go.mod` wins when both manifests are present.
fn detect_ecosystem(dir: &Path) -> CliResult<Ecosystem> {
    [Ecosystem::Go, Ecosystem::Node]
        .into_iter()
        .find(|eco| dir.join(eco.manifest_file()).is_file())
        .ok_or_else(|| CliError::ManifestNotFound {
            dir: dir.to_path_buf(),
        })
}

/// Build the dependency to add.
///
/// Catalog packages keep their repository and fallback version so they
/// resolve like a generated project would. An explicit version skips the
/// registry entirely.
fn declare(
    ecosystem: Ecosystem,
    package: &str,
    version: Option<&str>,
    dev: bool,
    resolver: &ResolverService,
) -> CliResult<Dependency> {
    let (identifier, inline_version) = split_version(ecosystem, package);
    // `latest` is a query, not a pin.
    let version = version
        .or(inline_version)
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("latest"));

    let mut dependency = match find_by_identifier(ecosystem, identifier) {
        Some(entry) => Dependency::declared(entry),
        None => Dependency::ad_hoc(ecosystem, identifier, Category::Production)
            .map_err(SeedError::from)?,
    };
    if dev {
        dependency.category = Category::Development;
    }

    match version {
        Some(v) => Ok(dependency.with_version(v)),
        None => {
            resolver.pin(&mut dependency);
            Ok(dependency)
        }
    }
}

/// Accept `pkg@1.2.3` as shorthand for `pkg --version 1.2.3`. Scoped npm
/// names (`@vue/test-utils`) keep their leading `@`.
fn split_version(ecosystem: Ecosystem, package: &str) -> (&str, Option<&str>) {
    let search_from = match ecosystem {
        Ecosystem::Node if package.starts_with('@') => 1,
        _ => 0,
    };
    match package[search_from..].rfind('@') {
        Some(at) => {
            let at = at + search_from;
            let version = &package[at + 1..];
            if version.is_empty() || version == "latest" {
                (&package[..at], None)
            } else {
                (&package[..at], Some(version))
            }
        }
        None => (package, None),
    }
}

fn announce_added(dependency: &Dependency, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(dependency)?;
        return Ok(());
    }
    let origin = dependency
        .origin
        .map_or_else(|| "as requested".to_string(), |o| format!("from {o}"));
    output.success(&format!(
        "Added {} {} ({}, {origin})",
        dependency.identifier,
        dependency.version_or_latest(),
        dependency.category,
    ))?;
    if dependency.used_fallback() {
        output.warning("Registries were unreachable; the pinned version is a built-in default")?;
    }
    Ok(())
}

/// Print a report command's output; `None` means the command never ran.
fn show(report: Option<CommandOutput>, output: &OutputManager) -> CliResult<bool> {
    let Some(report) = report else {
        return Ok(false);
    };
    if !report.stdout.trim().is_empty() {
        output.data(&report.stdout)?;
    }
    if !report.success() && !report.stderr.trim().is_empty() {
        output.warning(report.summary())?;
    }
    Ok(true)
}
