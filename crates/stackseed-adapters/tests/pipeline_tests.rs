//! End-to-end runs over real command vocabularies with scripted processes.

use std::path::Path;

use serde_json::json;
use stackseed_adapters::{
    GitCli, GoModules, MemoryFilesystem, NodePackageManager, ScriptedRunner, Timeouts,
    http::{HttpClient, HttpConfig},
    registry::{RegistryEndpoints, registry_client},
};
use stackseed_core::prelude::*;

const DIR: &str = "/work/orders";

fn settings(ecosystem: Ecosystem, overrides: serde_json::Value) -> ProjectSettings {
    ProjectSettings::defaults_for(ecosystem, "orders")
        .merged_with(&overrides)
        .unwrap()
}

fn offline_resolver(ecosystem: Ecosystem) -> ResolverService {
    let http = HttpClient::new(HttpConfig::default()).unwrap();
    ResolverService::new(registry_client(
        ecosystem,
        true,
        &RegistryEndpoints::default(),
        &http,
    ))
}

fn go_service(runner: &ScriptedRunner, fs: &MemoryFilesystem) -> GenerationService {
    let mutator = ManifestMutator::new(
        Box::new(GoModules::new(Timeouts::default())),
        Box::new(runner.clone()),
        Box::new(fs.clone()),
        DIR,
    );
    GenerationService::new(offline_resolver(Ecosystem::Go), mutator)
}

#[test]
fn go_run_writes_go_mod_then_adds_each_module() {
    let runner = ScriptedRunner::new();
    let fs = MemoryFilesystem::new();

    let report = go_service(&runner, &fs)
        .generate(&settings(Ecosystem::Go, json!({ "database": { "type": "mysql" } })))
        .unwrap();

    assert!(report.is_success(), "{:?}", report.steps);
    assert_eq!(report.fallback_used().count(), report.dependencies.len());

    let go_mod = fs.read_file(&Path::new(DIR).join("go.mod")).unwrap();
    assert!(go_mod.starts_with("module github.com/username/orders\n\ngo 1.21.5\n"));
    assert!(go_mod.contains("\tgorm.io/driver/mysql v"));

    let calls = runner.calls();
    let gets = calls.iter().filter(|c| c.starts_with("go get ")).count();
    assert_eq!(gets, report.dependencies.len());
    assert!(calls.iter().any(|c| c.starts_with("go get github.com/gin-gonic/gin@v")));
    let tail: Vec<_> = calls.iter().rev().take(3).rev().map(String::as_str).collect();
    assert_eq!(tail, ["go mod tidy", "go mod download", "go mod verify"]);
}

#[test]
fn one_bad_module_does_not_stop_the_rest() {
    let runner = ScriptedRunner::new().fail(
        "go get github.com/sirupsen/logrus",
        1,
        "go: module lookup disabled by GOPROXY=off",
    );
    let fs = MemoryFilesystem::new();

    let report = go_service(&runner, &fs)
        .generate(&settings(Ecosystem::Go, json!({})))
        .unwrap();

    let failed: Vec<_> = report.failed().map(|d| d.identifier.as_str()).collect();
    assert_eq!(failed, ["github.com/sirupsen/logrus"]);
    assert_eq!(report.applied().count(), report.dependencies.len() - 1);
    assert!(!report.is_success());
    assert!(runner.calls().iter().any(|c| c == "go mod verify"));
}

#[test]
fn missing_go_aborts_before_any_io() {
    let runner = ScriptedRunner::new().without_tool("go");
    let fs = MemoryFilesystem::new();

    let err = go_service(&runner, &fs)
        .generate(&settings(Ecosystem::Go, json!({})))
        .unwrap_err();

    assert!(err.is_precondition_failure());
    assert!(runner.calls().is_empty());
    assert!(fs.list_files().is_empty());
}

#[test]
fn existing_manifest_is_never_overwritten() {
    let runner = ScriptedRunner::new();
    let original = "module example.com/legacy\n\ngo 1.20\n";
    let fs = MemoryFilesystem::new().with_file(Path::new(DIR).join("go.mod"), original);

    let report = go_service(&runner, &fs)
        .generate(&settings(Ecosystem::Go, json!({})))
        .unwrap();

    assert_eq!(fs.read_file(&Path::new(DIR).join("go.mod")).as_deref(), Some(original));
    let manifest = report.steps.iter().find(|s| s.name == "manifest").unwrap();
    assert_eq!(manifest.detail.as_deref(), Some("kept existing"));
}

#[test]
fn node_run_splits_dev_dependencies() {
    let runner = ScriptedRunner::new();
    let fs = MemoryFilesystem::new();
    let mutator = ManifestMutator::new(
        Box::new(NodePackageManager::pnpm(Timeouts::default())),
        Box::new(runner.clone()),
        Box::new(fs.clone()),
        DIR,
    );
    let service = GenerationService::new(offline_resolver(Ecosystem::Node), mutator)
        .with_options(GenerationOptions {
            bootstrap_vcs: true,
            ..GenerationOptions::default()
        })
        .with_version_control(Box::new(GitCli::new(
            Box::new(runner.clone()),
            std::time::Duration::from_secs(5),
        )));

    let report = service
        .generate(&settings(Ecosystem::Node, json!({ "css_framework": "tailwindcss" })))
        .unwrap();
    assert!(report.is_success(), "{:?}", report.steps);

    let package_json = fs.read_file(&Path::new(DIR).join("package.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&package_json).unwrap();
    assert!(parsed["devDependencies"]["tailwindcss"].is_string());
    assert!(parsed["dependencies"]["vue"].as_str().unwrap().starts_with('^'));

    let calls = runner.calls();
    assert!(calls.iter().any(|c| c.starts_with("pnpm add -D vite@")));
    assert!(calls.iter().any(|c| c.starts_with("pnpm add vue@")));
    assert!(calls.iter().any(|c| c == "git commit -m Initial commit: orders generated"));
}

#[test]
fn timed_out_download_fails_the_install_step_only() {
    let runner = ScriptedRunner::new().time_out("go mod download");
    let fs = MemoryFilesystem::new();

    let report = go_service(&runner, &fs)
        .generate(&settings(Ecosystem::Go, json!({})))
        .unwrap();

    let failed: Vec<_> = report
        .steps
        .iter()
        .filter(|s| !s.success)
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(failed, ["install"]);
    assert_eq!(report.applied().count(), report.dependencies.len());
    assert!(runner.calls().iter().any(|c| c == "go mod verify"));
}
