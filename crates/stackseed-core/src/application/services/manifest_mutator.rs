//! Manifest Mutator - every change to `go.mod` / `package.json`.
//!
//! Edits go through the package manager's own subcommands; the manifest is
//! never parsed here. Each subprocess is bounded by its invocation's
//! timeout, and any failure becomes a logged warning plus a `false` result
//! so the caller can carry on with the next operation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Filesystem, Invocation, PackageManager},
    },
    domain::{
        self, Configuration, Dependency, DomainError, Manifest, PackageManagerKind,
    },
    error::SeedResult,
};

pub struct ManifestMutator {
    manager: Box<dyn PackageManager>,
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    project_dir: PathBuf,
}

impl ManifestMutator {
    pub fn new(
        manager: Box<dyn PackageManager>,
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manager,
            runner,
            filesystem,
            project_dir: project_dir.into(),
        }
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.manager.kind()
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        crate::application::ports::manifest_path(&self.project_dir, self.kind())
    }

    /// Fail with `ToolMissing` unless the package manager can be started.
    pub fn check_tool(&self) -> SeedResult<()> {
        let probe = self.manager.probe();
        if self.runner.is_available(&probe.program) {
            Ok(())
        } else {
            Err(ApplicationError::ToolMissing {
                tool: probe.program,
            }
            .into())
        }
    }

    // -------------------------------------------------------------------------
    // Manifest file
    // -------------------------------------------------------------------------

    /// Render the manifest for this package manager's ecosystem. Pure.
    pub fn synthesize(
        &self,
        configuration: &Configuration,
        dependencies: &[Dependency],
        toolchain: Option<&str>,
    ) -> SeedResult<Manifest> {
        let ecosystem = self.kind().ecosystem();
        if configuration.ecosystem() != ecosystem {
            return Err(DomainError::EcosystemMismatch {
                ecosystem: configuration.ecosystem().to_string(),
                identifier: configuration.project_name().to_string(),
                manifest: ecosystem.manifest_file().into(),
            }
            .into());
        }
        Ok(domain::synthesize(configuration, dependencies, toolchain)?)
    }

    pub fn manifest_exists(&self) -> bool {
        self.filesystem.exists(&self.manifest_path())
    }

    /// Write `manifest` unless one is already on disk.
    ///
    /// Returns whether a file was written.
    #[instrument(skip_all, fields(path = %self.manifest_path().display()))]
    pub fn write_manifest_if_absent(&self, manifest: &Manifest) -> SeedResult<bool> {
        let path = self.manifest_path();
        if self.filesystem.exists(&path) {
            info!("Manifest already present, leaving it to the package manager");
            return Ok(false);
        }
        self.filesystem.create_dir_all(&self.project_dir)?;
        self.filesystem.write_file(&path, &manifest.content)?;
        info!(bytes = manifest.content.len(), "Manifest written");
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Package-manager operations
    // -------------------------------------------------------------------------

    /// Create an empty manifest through the package manager.
    pub fn init(&self, configuration: &Configuration) -> bool {
        if let Err(e) = self.filesystem.create_dir_all(&self.project_dir) {
            warn!(error = %e, "Cannot create project directory");
            return false;
        }
        self.execute("init", self.manager.init(configuration)).is_ok()
    }

    /// Declare one dependency. Relies on the tool's own idempotence.
    #[instrument(skip_all, fields(dependency = %dependency))]
    pub fn add(&self, dependency: &Dependency) -> bool {
        self.execute("add", self.manager.add(dependency)).is_ok()
    }

    /// Add a dependency and move it to `Applied` or `Failed`.
    pub fn apply(&self, dependency: &mut Dependency) -> bool {
        match self.execute("add", self.manager.add(dependency)) {
            Ok(_) => dependency.mark_applied(),
            Err(reason) => {
                dependency.mark_failed(reason);
                false
            }
        }
    }

    #[instrument(skip(self))]
    pub fn remove(&self, identifier: &str) -> bool {
        self.execute("remove", self.manager.remove(identifier)).is_ok()
    }

    /// Update one package, optionally to `version`; `None` updates all.
    #[instrument(skip(self))]
    pub fn update(&self, identifier: Option<&str>, version: Option<&str>) -> bool {
        self.execute("update", self.manager.update(identifier, version))
            .is_ok()
    }

    pub fn tidy(&self) -> bool {
        self.execute("tidy", self.manager.tidy()).is_ok()
    }

    pub fn install(&self) -> bool {
        self.execute("install", self.manager.install()).is_ok()
    }

    /// The package manager's own consistency check.
    pub fn verify(&self) -> bool {
        self.execute("verify", self.manager.verify()).is_ok()
    }

    pub fn prune(&self) -> bool {
        self.execute("prune", self.manager.prune()).is_ok()
    }

    /// Installed packages as the tool reports them.
    pub fn list(&self) -> Option<CommandOutput> {
        self.inspect("list", self.manager.list())
    }

    /// Packages with newer versions available.
    pub fn outdated(&self) -> Option<CommandOutput> {
        self.inspect("outdated", self.manager.outdated())
    }

    /// Known vulnerabilities.
    pub fn audit(&self) -> Option<CommandOutput> {
        self.inspect("audit", self.manager.audit())
    }

    /// Install developer tools one by one; failures are skipped.
    ///
    /// Returns each tool's command line and whether it installed.
    pub fn install_dev_tools(&self, configuration: &Configuration) -> Vec<(String, bool)> {
        self.manager
            .dev_tools(configuration)
            .into_iter()
            .map(|invocation| {
                let label = invocation.display();
                let ok = self.execute("dev-tool", vec![invocation]).is_ok();
                (label, ok)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Run invocations in order, stopping at the first failure.
    fn execute(
        &self,
        operation: &'static str,
        invocations: Vec<Invocation>,
    ) -> Result<Vec<CommandOutput>, String> {
        if invocations.is_empty() {
            let reason = format!("{} has no '{operation}' command", self.kind());
            warn!(operation, "{reason}");
            return Err(reason);
        }

        let mut outputs = Vec::with_capacity(invocations.len());
        for invocation in &invocations {
            let command = invocation.display();
            debug!(operation, %command, "Running package manager");

            match self.runner.run(invocation, &self.project_dir) {
                Ok(output) if output.success() => outputs.push(output),
                Ok(output) => {
                    let code = output
                        .status
                        .map_or_else(|| "a signal".to_string(), |c| format!("code {c}"));
                    let reason = format!("'{command}' exited with {code}: {}", output.summary());
                    warn!(operation, "{reason}");
                    return Err(reason);
                }
                Err(e) => {
                    warn!(operation, %command, error = %e, "Package manager command failed");
                    return Err(e.to_string());
                }
            }
        }
        Ok(outputs)
    }

    /// Run a read-only report command; a non-zero exit still carries output
    /// (`npm outdated` exits 1 when anything is outdated).
    fn inspect(&self, operation: &'static str, invocations: Vec<Invocation>) -> Option<CommandOutput> {
        let Some(invocation) = invocations.first() else {
            warn!(operation, "{} has no '{operation}' command", self.kind());
            return None;
        };
        match self.runner.run(invocation, &self.project_dir) {
            Ok(output) => {
                if !output.success() {
                    debug!(operation, status = ?output.status, "Report command exited non-zero");
                }
                Some(output)
            }
            Err(e) => {
                warn!(operation, error = %e, "Report command failed");
                None
            }
        }
    }
}
