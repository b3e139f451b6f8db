//! `stackseed generate`: the full resolution and injection run.
//!
//! Responsibility: wire adapters, call `GenerationService`, print the
//! per-step summary. A finished run with failures still prints everything
//! and then exits non-zero.

use std::path::PathBuf;

use stackseed_core::{
    domain::{DependencyState, PackageManagerKind},
    prelude::{GenerationOptions, GenerationReport, GenerationService},
};
use tracing::{info, instrument};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    commands::{dependency_row, engine::Engine, project},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    // Invalid settings fail before any tool lookup.
    let settings = project::load(&args.project)?.settings;
    let ecosystem = settings.ecosystem();
    let project_dir = args
        .dir
        .unwrap_or_else(|| PathBuf::from(settings.project_name()));

    let engine = Engine::new(config, global.offline);
    let preferred = args.package_manager.map(PackageManagerKind::from);
    let mutator = engine.mutator(ecosystem, preferred, &project_dir)?;
    let options = GenerationOptions {
        synthesize_manifest: !args.no_synthesize,
        install_dev_tools: args.dev_tools,
        bootstrap_vcs: args.git,
    };

    let mut service =
        GenerationService::new(engine.resolver(ecosystem)?, mutator).with_options(options);
    if args.git {
        service = service.with_version_control(Box::new(engine.git()));
    }

    output.header(&format!(
        "Generating '{}' in {}",
        settings.project_name(),
        project_dir.display()
    ))?;

    let spinner = output.spinner("Resolving and installing dependencies");
    let report = service.generate(&settings);
    spinner.finish_and_clear();
    let report = report?;

    info!(run_id = %report.run_id, "Run complete");

    if output.is_json() {
        output.json(&report)?;
    } else {
        print_summary(&report, output)?;
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::GenerationIncomplete {
            failed_steps: report
                .steps
                .iter()
                .filter(|s| s.required && !s.success)
                .count(),
            failed_dependencies: report.failed().count(),
        })
    }
}

fn print_summary(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    output.print("")?;
    for step in &report.steps {
        let line = match &step.detail {
            Some(detail) => format!("{}: {detail}", step.name),
            None => step.name.clone(),
        };
        match (step.success, step.required) {
            (true, _) => output.success(&line)?,
            (false, true) => output.error(&line)?,
            (false, false) => output.warning(&line)?,
        }
    }

    let applied: Vec<_> = report.applied().collect();
    if !applied.is_empty() {
        output.print("")?;
        output.header(&format!("Applied ({})", applied.len()))?;
        for dep in applied {
            output.print(&dependency_row(dep))?;
        }
    }

    let failed: Vec<_> = report.failed().collect();
    if !failed.is_empty() {
        output.print("")?;
        output.header(&format!("Failed ({})", failed.len()))?;
        for dep in failed {
            let reason = match &dep.state {
                DependencyState::Failed(reason) => reason.as_str(),
                other => other.as_str(),
            };
            output.error(&format!("{}: {reason}", dep.identifier))?;
        }
    }

    let fallbacks: Vec<_> = report
        .fallback_used()
        .map(|d| d.identifier.as_str())
        .collect();
    if !fallbacks.is_empty() {
        output.print("")?;
        output.warning(&format!(
            "Fallback versions used for: {}",
            fallbacks.join(", ")
        ))?;
    }

    let seconds = report.duration().num_milliseconds() as f64 / 1000.0;
    output.print("")?;
    output.info(&format!(
        "Run {} finished in {seconds:.1}s ({})",
        report.run_id,
        report
            .finished_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
    ))?;
    if report.is_success() {
        output.success(&format!("Project '{}' is ready", report.project))?;
        output.print(&format!("  cd {}", report.project_dir.display()))?;
    }

    Ok(())
}
