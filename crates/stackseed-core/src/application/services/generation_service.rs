//! Generation Service - main application orchestrator.
//!
//! This service coordinates a whole dependency-injection run:
//! 1. Normalize settings (fail fast, no I/O)
//! 2. Check the package manager is installed
//! 3. Resolve and pin dependencies
//! 4. Bootstrap the manifest if it does not exist
//! 5. Add each dependency, tidy, install, verify
//! 6. Optional dev tools and repository bootstrap
//!
//! Only steps 1 and 2 abort the run. Everything after degrades to a failed
//! step or a failed dependency in the report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ports::VersionControl,
        services::{ManifestMutator, ResolverService},
    },
    domain::{Configuration, Dependency, Ecosystem, ProjectSettings},
    error::{SeedError, SeedResult},
};

/// Knobs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Write the manifest from the resolved list instead of `init`.
    pub synthesize_manifest: bool,
    pub install_dev_tools: bool,
    pub bootstrap_vcs: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            synthesize_manifest: true,
            install_dev_tools: false,
            bootstrap_vcs: false,
        }
    }
}

/// Outcome of one step of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub name: String,
    pub success: bool,
    /// Optional steps never fail the run.
    pub required: bool,
    pub detail: Option<String>,
}

impl StepOutcome {
    fn required(name: &str, success: bool, detail: Option<String>) -> Self {
        Self {
            name: name.into(),
            success,
            required: true,
            detail,
        }
    }

    fn optional(name: &str, success: bool, detail: Option<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, success, detail)
        }
    }
}

/// Everything a caller needs to print the end-of-run summary.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub project: String,
    pub ecosystem: Ecosystem,
    pub project_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Settings values that were ignored during normalization.
    pub warnings: Vec<String>,
    pub steps: Vec<StepOutcome>,
    pub dependencies: Vec<Dependency>,
}

impl GenerationReport {
    pub fn applied(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .iter()
            .filter(|d| d.state == crate::domain::DependencyState::Applied)
    }

    pub fn failed(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_failed())
    }

    /// Dependencies pinned from the built-in table because registries
    /// were unreachable. Their versions may be stale.
    pub fn fallback_used(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.used_fallback())
    }

    /// All required steps passed and no dependency failed.
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|s| s.success || !s.required) && self.failed().next().is_none()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

pub struct GenerationService {
    resolver: ResolverService,
    mutator: ManifestMutator,
    vcs: Option<Box<dyn VersionControl>>,
    options: GenerationOptions,
}

impl GenerationService {
    pub fn new(resolver: ResolverService, mutator: ManifestMutator) -> Self {
        Self {
            resolver,
            mutator,
            vcs: None,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_version_control(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    /// Run the whole pipeline for `settings`.
    ///
    /// Errors only for invalid settings, a package manager from the wrong
    /// ecosystem, or a missing tool. Anything later is in the report.
    #[instrument(
        skip_all,
        fields(project = %settings.project_name(), dir = %self.mutator.project_dir().display())
    )]
    pub fn generate(&self, settings: &ProjectSettings) -> SeedResult<GenerationReport> {
        let started_at = Utc::now();

        // 1. Preconditions
        let normalized = settings.normalize()?;
        for warning in &normalized.warnings {
            warn!(%warning, "Feature disabled");
        }
        let configuration = normalized.configuration;
        if configuration.ecosystem() != self.mutator.kind().ecosystem() {
            return Err(SeedError::Configuration {
                message: format!(
                    "{} cannot manage a {} project",
                    self.mutator.kind(),
                    configuration.ecosystem()
                ),
            });
        }
        self.mutator.check_tool()?;

        // 2. Resolve
        let mut dependencies = self.resolver.resolve(&configuration)?;
        let mut steps = vec![StepOutcome::required(
            "resolve",
            true,
            Some(format!("{} dependencies", dependencies.len())),
        )];

        // 3. Manifest
        steps.push(self.bootstrap_manifest(&configuration, &dependencies));

        // 4. Dependencies, one at a time
        for dependency in &mut dependencies {
            self.mutator.apply(dependency);
        }
        let failed = dependencies.iter().filter(|d| d.is_failed()).count();
        steps.push(StepOutcome::required(
            "add",
            failed == 0,
            Some(format!("{} applied, {failed} failed", dependencies.len() - failed)),
        ));

        // 5. Consistency
        steps.push(StepOutcome::required("tidy", self.mutator.tidy(), None));
        steps.push(StepOutcome::required("install", self.mutator.install(), None));
        steps.push(StepOutcome::required("verify", self.mutator.verify(), None));

        // 6. Extras
        if self.options.install_dev_tools {
            steps.push(self.dev_tools(&configuration));
        }
        if self.options.bootstrap_vcs {
            steps.push(self.bootstrap_vcs(&configuration));
        }

        let report = GenerationReport {
            run_id: Uuid::new_v4(),
            project: configuration.project_name().to_string(),
            ecosystem: configuration.ecosystem(),
            project_dir: self.mutator.project_dir().to_path_buf(),
            started_at,
            finished_at: Utc::now(),
            warnings: normalized.warnings.iter().map(ToString::to_string).collect(),
            steps,
            dependencies,
        };

        info!(
            run_id = %report.run_id,
            success = report.is_success(),
            applied = report.applied().count(),
            failed = report.failed().count(),
            fallbacks = report.fallback_used().count(),
            "Generation finished"
        );
        Ok(report)
    }

    fn bootstrap_manifest(
        &self,
        configuration: &Configuration,
        dependencies: &[Dependency],
    ) -> StepOutcome {
        if self.mutator.manifest_exists() {
            return StepOutcome::required("manifest", true, Some("kept existing".into()));
        }

        if !self.options.synthesize_manifest {
            let ok = self.mutator.init(configuration);
            return StepOutcome::required("manifest", ok, Some("package manager init".into()));
        }

        let toolchain = self.resolver.resolve_toolchain(configuration);
        let written = self
            .mutator
            .synthesize(configuration, dependencies, toolchain.as_ref().map(|t| t.version.as_str()))
            .and_then(|manifest| self.mutator.write_manifest_if_absent(&manifest));

        match written {
            Ok(_) => StepOutcome::required(
                "manifest",
                true,
                Some(format!("wrote {}", self.mutator.manifest_path().display())),
            ),
            Err(e) => {
                warn!(error = %e, "Manifest bootstrap failed");
                StepOutcome::required("manifest", false, Some(e.to_string()))
            }
        }
    }

    fn dev_tools(&self, configuration: &Configuration) -> StepOutcome {
        let results = self.mutator.install_dev_tools(configuration);
        let failed: Vec<_> = results
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(tool, _)| tool.as_str())
            .collect();
        let detail = if failed.is_empty() {
            format!("{} installed", results.len())
        } else {
            format!("skipped: {}", failed.join(", "))
        };
        StepOutcome::optional("dev-tools", failed.is_empty(), Some(detail))
    }

    fn bootstrap_vcs(&self, configuration: &Configuration) -> StepOutcome {
        let Some(vcs) = &self.vcs else {
            return StepOutcome::optional("git", false, Some("no version control configured".into()));
        };
        let dir = self.mutator.project_dir();
        if vcs.is_repository(dir) {
            return StepOutcome::optional("git", true, Some("already a repository".into()));
        }

        let message = format!("Initial commit: {} generated", configuration.project_name());
        match vcs.bootstrap(dir, &message) {
            Ok(()) => StepOutcome::optional("git", true, None),
            Err(e) => {
                warn!(error = %e, "Repository bootstrap failed");
                StepOutcome::optional("git", false, Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockFilesystem, MockVersionControl},
        services::{
            RegistryClient,
            test_support::{FailingSource, FakeManager, RecordingRunner},
        },
    };
    use crate::domain::DependencyState;
    use serde_json::json;

    fn resolver() -> ResolverService {
        ResolverService::new(RegistryClient::new(
            Box::new(FailingSource::new("primary")),
            Box::new(FailingSource::new("secondary")),
        ))
    }

    fn filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn service(runner: RecordingRunner) -> GenerationService {
        let mutator = ManifestMutator::new(
            Box::new(FakeManager),
            Box::new(runner),
            Box::new(filesystem()),
            "/work/orders",
        );
        GenerationService::new(resolver(), mutator)
    }

    fn go_settings() -> ProjectSettings {
        ProjectSettings::defaults_for(Ecosystem::Go, "orders")
    }

    #[test]
    fn happy_path_applies_everything() {
        let report = service(RecordingRunner::default())
            .generate(&go_settings())
            .unwrap();
        assert!(report.is_success());
        assert!(report.dependencies.iter().all(|d| d.state == DependencyState::Applied));
        assert_eq!(
            report.fallback_used().count(),
            report.dependencies.len(),
            "offline registries pin everything from the built-in table"
        );
        let names: Vec<_> = report.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["resolve", "manifest", "add", "tidy", "install", "verify"]);
    }

    #[test]
    fn one_bad_dependency_does_not_stop_the_rest() {
        let report = service(RecordingRunner::failing_on(&["gorm.io/driver/postgres"]))
            .generate(&go_settings())
            .unwrap();
        let failed: Vec<_> = report.failed().map(|d| d.identifier.as_str()).collect();
        assert_eq!(failed, ["gorm.io/driver/postgres"]);
        assert!(report.applied().count() > 1);
        assert!(!report.is_success());
    }

    #[test]
    fn invalid_settings_fail_before_any_command() {
        let runner = RecordingRunner::default();
        let svc = service(runner);
        let err = svc
            .generate(&ProjectSettings::defaults_for(Ecosystem::Go, ""))
            .unwrap_err();
        assert!(err.is_precondition_failure());
    }

    #[test]
    fn missing_tool_aborts() {
        let err = service(RecordingRunner::without_tools())
            .generate(&go_settings())
            .unwrap_err();
        assert!(matches!(
            err,
            SeedError::Application(ApplicationError::ToolMissing { .. })
        ));
    }

    #[test]
    fn wrong_ecosystem_is_a_configuration_error() {
        let err = service(RecordingRunner::default())
            .generate(&ProjectSettings::defaults_for(Ecosystem::Node, "shop"))
            .unwrap_err();
        assert!(matches!(err, SeedError::Configuration { .. }));
    }

    #[test]
    fn unknown_choice_is_reported_as_warning() {
        let settings = go_settings()
            .merged_with(&json!({ "cache": { "enabled": true, "type": "memcached" } }))
            .unwrap();
        let report = service(RecordingRunner::default())
            .generate(&settings)
            .unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("memcached"));
    }

    #[test]
    fn vcs_failure_is_not_fatal() {
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_repository().return_const(false);
        vcs.expect_bootstrap()
            .withf(|_, message| message == "Initial commit: orders generated")
            .times(1)
            .returning(|_, _| {
                Err(ApplicationError::ToolMissing { tool: "git".into() }.into())
            });

        let report = service(RecordingRunner::default())
            .with_options(GenerationOptions {
                bootstrap_vcs: true,
                ..GenerationOptions::default()
            })
            .with_version_control(Box::new(vcs))
            .generate(&go_settings())
            .unwrap();

        let git = report.steps.iter().find(|s| s.name == "git").unwrap();
        assert!(!git.success);
        assert!(report.is_success());
    }

    #[test]
    fn dev_tools_step_lists_skipped_tools() {
        let report = service(RecordingRunner::failing_on(&["tool swag"]))
            .with_options(GenerationOptions {
                install_dev_tools: true,
                ..GenerationOptions::default()
            })
            .generate(&go_settings())
            .unwrap();
        let step = report.steps.iter().find(|s| s.name == "dev-tools").unwrap();
        assert!(!step.success && !step.required);
        assert_eq!(step.detail.as_deref(), Some("skipped: fake tool swag"));
    }
}
