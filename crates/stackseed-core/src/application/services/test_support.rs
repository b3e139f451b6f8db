//! Hand-rolled port doubles shared by the service tests.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Invocation, PackageManager, VersionSource},
    },
    domain::{Configuration, Dependency, PackageLocator, PackageManagerKind},
    error::SeedResult,
};

pub struct FixedSource {
    name: String,
    versions: Vec<String>,
}

impl FixedSource {
    pub fn new(name: &str, versions: &[&str]) -> Self {
        Self {
            name: name.into(),
            versions: versions.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl VersionSource for FixedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_versions(&self, _locator: &PackageLocator) -> SeedResult<Vec<String>> {
        Ok(self.versions.clone())
    }
}

pub struct FailingSource {
    name: String,
}

impl FailingSource {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

impl VersionSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_versions(&self, locator: &PackageLocator) -> SeedResult<Vec<String>> {
        Err(ApplicationError::RegistryUnavailable {
            source_name: self.name.clone(),
            locator: locator.to_string(),
            reason: "connection refused".into(),
        }
        .into())
    }
}

/// A package manager whose every operation is one `fake <op> [arg]` call.
pub struct FakeManager;

const T: Duration = Duration::from_secs(5);

fn one(op: &str, arg: Option<&str>) -> Vec<Invocation> {
    let mut args = vec![op.to_string()];
    args.extend(arg.map(str::to_string));
    vec![Invocation::new("fake", args, T)]
}

impl PackageManager for FakeManager {
    fn kind(&self) -> PackageManagerKind {
        PackageManagerKind::Go
    }
    fn probe(&self) -> Invocation {
        Invocation::new("fake", ["version"], T)
    }
    fn init(&self, configuration: &Configuration) -> Vec<Invocation> {
        one("init", Some(configuration.project_name()))
    }
    fn add(&self, dependency: &Dependency) -> Vec<Invocation> {
        one("add", Some(&dependency.to_string()))
    }
    fn remove(&self, identifier: &str) -> Vec<Invocation> {
        one("remove", Some(identifier))
    }
    fn update(&self, identifier: Option<&str>, _version: Option<&str>) -> Vec<Invocation> {
        one("update", identifier)
    }
    fn tidy(&self) -> Vec<Invocation> {
        one("tidy", None)
    }
    fn install(&self) -> Vec<Invocation> {
        one("install", None)
    }
    fn verify(&self) -> Vec<Invocation> {
        one("verify", None)
    }
    fn list(&self) -> Vec<Invocation> {
        one("list", None)
    }
    fn outdated(&self) -> Vec<Invocation> {
        one("outdated", None)
    }
    fn audit(&self) -> Vec<Invocation> {
        Vec::new()
    }
    fn prune(&self) -> Vec<Invocation> {
        one("prune", None)
    }
    fn dev_tools(&self, _configuration: &Configuration) -> Vec<Invocation> {
        vec![
            Invocation::new("fake", ["tool", "air"], T),
            Invocation::new("fake", ["tool", "swag"], T),
        ]
    }
}

/// Records every command line and fails the ones containing a marker.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: Mutex<Vec<String>>,
    fail_on: Vec<String>,
    missing: bool,
}

impl RecordingRunner {
    pub fn failing_on(markers: &[&str]) -> Self {
        Self {
            fail_on: markers.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn without_tools() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, _cwd: &Path) -> SeedResult<CommandOutput> {
        let line = invocation.display();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }
        let failed = self.fail_on.iter().any(|m| line.contains(m.as_str()));
        Ok(CommandOutput {
            status: Some(if failed { 1 } else { 0 }),
            stdout: format!("ran {line}"),
            stderr: if failed { "boom".into() } else { String::new() },
        })
    }

    fn is_available(&self, _program: &str) -> bool {
        !self.missing
    }
}
