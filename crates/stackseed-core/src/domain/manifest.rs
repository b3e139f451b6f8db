//! Manifest synthesis: dependency list to `go.mod` / `package.json` text.
//!
//! Pure functions. Used to bootstrap a project before the package manager
//! has run, and for fast local generation without any installs. Output is
//! shaped the way `go mod tidy` and `pnpm install` write it back, so a
//! later tidy pass leaves the declarations alone.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value, json};

use crate::domain::{
    entities::{BackendConfig, Configuration, Dependency, FrontendConfig},
    error::DomainError,
    value_objects::{Ecosystem, FrontendKind},
};

/// `go` directive used when no toolchain version is known.
pub const GO_TOOLCHAIN_FALLBACK: &str = "1.21.5";

/// Synthesized manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub ecosystem: Ecosystem,
    pub content: String,
}

impl Manifest {
    pub fn file_name(&self) -> &'static str {
        self.ecosystem.manifest_file()
    }
}

/// Render the manifest for a configuration and its resolved dependencies.
///
/// Each unique identifier is declared exactly once. `toolchain` fills the
/// Go `go` directive and is ignored for Node.
pub fn synthesize(
    configuration: &Configuration,
    dependencies: &[Dependency],
    toolchain: Option<&str>,
) -> Result<Manifest, DomainError> {
    let ecosystem = configuration.ecosystem();
    if let Some(stray) = dependencies.iter().find(|d| d.ecosystem != ecosystem) {
        return Err(DomainError::EcosystemMismatch {
            ecosystem: stray.ecosystem.to_string(),
            identifier: stray.identifier.clone(),
            manifest: ecosystem.manifest_file().into(),
        });
    }

    let content = match configuration {
        Configuration::Backend(cfg) => go_mod(cfg, dependencies, toolchain),
        Configuration::Frontend(cfg) => package_json(cfg, dependencies)?,
    };
    Ok(Manifest { ecosystem, content })
}

fn unique<'a>(dependencies: &'a [Dependency]) -> impl Iterator<Item = &'a Dependency> {
    let mut seen = HashSet::new();
    dependencies
        .iter()
        .filter(move |d| seen.insert(d.identifier.as_str()))
}

// ── go.mod ───────────────────────────────────────────────────────────────────

fn go_mod(cfg: &BackendConfig, dependencies: &[Dependency], toolchain: Option<&str>) -> String {
    let go_directive = cfg
        .go_version
        .as_deref()
        .or(toolchain)
        .unwrap_or(GO_TOOLCHAIN_FALLBACK);

    let mut out = format!("module {}\n\ngo {}\n", cfg.module_path, go_directive);

    // go.mod cannot express "latest"; unpinned modules are left for `go get`.
    let requires: Vec<_> = unique(dependencies)
        .filter_map(|d| d.version.as_deref().map(|v| (d.identifier.as_str(), v)))
        .collect();

    if !requires.is_empty() {
        out.push_str("\nrequire (\n");
        for (module, version) in requires {
            out.push_str(&format!("\t{module} v{version}\n"));
        }
        out.push_str(")\n");
    }
    out
}

// ── package.json ─────────────────────────────────────────────────────────────

fn package_json(cfg: &FrontendConfig, dependencies: &[Dependency]) -> Result<String, DomainError> {
    // npm and pnpm keep dependency maps sorted by name.
    let mut prod = BTreeMap::new();
    let mut dev = BTreeMap::new();
    for dep in unique(dependencies) {
        let spec = match dep.version.as_deref() {
            Some(v) => format!("^{v}"),
            None => "latest".to_string(),
        };
        let target = if dep.category.is_dev() { &mut dev } else { &mut prod };
        target.insert(dep.identifier.clone(), spec);
    }

    let mut root = Map::new();
    root.insert("name".into(), json!(cfg.project_name));
    root.insert("version".into(), json!("0.0.0"));
    root.insert("description".into(), json!(cfg.description));
    root.insert("private".into(), json!(cfg.kind != FrontendKind::ComponentLib));
    root.insert("type".into(), json!("module"));

    if cfg.kind == FrontendKind::ComponentLib {
        root.insert("main".into(), json!("./dist/index.js"));
        root.insert("module".into(), json!("./dist/index.js"));
        root.insert("types".into(), json!("./dist/index.d.ts"));
        root.insert(
            "exports".into(),
            json!({ ".": { "import": "./dist/index.js", "types": "./dist/index.d.ts" } }),
        );
    }

    root.insert("scripts".into(), Value::Object(scripts(cfg)));
    root.insert("dependencies".into(), json!(prod));
    root.insert("devDependencies".into(), json!(dev));
    if !cfg.author.is_empty() {
        root.insert("author".into(), json!(cfg.author));
    }
    root.insert("license".into(), json!(cfg.license));

    let mut text = serde_json::to_string_pretty(&Value::Object(root))
        .map_err(|e| DomainError::InvalidConfiguration(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn scripts(cfg: &FrontendConfig) -> Map<String, Value> {
    let mut s = Map::new();
    s.insert("dev".into(), json!("vite"));

    let build = match (cfg.kind, cfg.typescript) {
        (FrontendKind::ComponentLib, true) => "vite build && vue-tsc --emitDeclarationOnly",
        (_, true) => "run-p type-check \"build-only {@}\" --",
        (_, false) => "vite build",
    };
    s.insert("build".into(), json!(build));
    s.insert("preview".into(), json!("vite preview"));

    if cfg.typescript {
        s.insert("build-only".into(), json!("vite build"));
        s.insert("type-check".into(), json!("vue-tsc --build --force"));
    }
    if cfg.eslint {
        s.insert(
            "lint".into(),
            json!("eslint . --ext .vue,.js,.jsx,.cjs,.mjs,.ts,.tsx,.cts,.mts --fix --ignore-path .gitignore"),
        );
    }
    if cfg.prettier {
        s.insert("format".into(), json!("prettier --write src/"));
    }
    if cfg.vitest {
        s.insert("test".into(), json!("vitest"));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::ProjectSettings, planning::plan_dependencies, value_objects::VersionOrigin,
        version::ResolvedVersion,
    };
    use serde_json::json;

    fn resolved(ecosystem: Ecosystem, overrides: Value) -> (Configuration, Vec<Dependency>) {
        let cfg = ProjectSettings::defaults_for(ecosystem, "demo")
            .merged_with(&overrides)
            .unwrap()
            .normalize()
            .unwrap()
            .configuration;
        let mut deps = plan_dependencies(&cfg).unwrap();
        for d in &mut deps {
            let v = d.locator().fallback().unwrap_or("0.1.0").to_string();
            d.pin(ResolvedVersion::new(v, VersionOrigin::FallbackDefault));
        }
        (cfg, deps)
    }

    #[test]
    fn go_mod_has_one_require_line_per_identifier() {
        let (cfg, mut deps) = resolved(
            Ecosystem::Go,
            json!({ "rate_limiting": { "enabled": true }, "cache": { "enabled": true } }),
        );
        // A duplicate slipping past the planner must still be declared once.
        deps.push(deps[0].clone());

        let manifest = synthesize(&cfg, &deps, Some("1.22.0")).unwrap();
        let text = &manifest.content;
        assert!(text.starts_with("module github.com/username/demo\n\ngo 1.22.0\n"));
        assert_eq!(text.matches("\tgithub.com/gin-gonic/gin v1.9.1\n").count(), 1);
        assert_eq!(text.matches("github.com/go-redis/redis/v8 ").count(), 1);

        let require_lines = text.lines().filter(|l| l.starts_with('\t')).count();
        let unique_ids: HashSet<_> = deps.iter().map(|d| &d.identifier).collect();
        assert_eq!(require_lines, unique_ids.len());
        assert_eq!(manifest.file_name(), "go.mod");
    }

    #[test]
    fn configured_go_version_beats_toolchain() {
        let (cfg, deps) = resolved(Ecosystem::Go, json!({ "go_version": "go1.21" }));
        let text = synthesize(&cfg, &deps, Some("1.22.0")).unwrap().content;
        assert!(text.contains("\ngo 1.21\n"));
    }

    #[test]
    fn go_mod_without_versions_omits_require_block() {
        let (cfg, mut deps) = resolved(Ecosystem::Go, json!({}));
        for d in &mut deps {
            d.version = None;
        }
        let text = synthesize(&cfg, &deps, None).unwrap().content;
        assert!(!text.contains("require"));
        assert!(text.contains(&format!("go {GO_TOOLCHAIN_FALLBACK}")));
    }

    #[test]
    fn package_json_splits_categories() {
        let (cfg, deps) = resolved(Ecosystem::Node, json!({ "css_framework": "tailwindcss" }));
        let text = synthesize(&cfg, &deps, None).unwrap().content;
        let parsed: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["name"], "demo");
        assert_eq!(parsed["type"], "module");
        assert_eq!(parsed["dependencies"]["vue"], "^3.4.0");
        assert_eq!(parsed["devDependencies"]["tailwindcss"], "^3.3.0");
        assert!(parsed["dependencies"].get("vite").is_none());
        assert_eq!(parsed["scripts"]["test"], "vitest");
    }

    #[test]
    fn package_json_declares_each_package_once() {
        let (cfg, mut deps) = resolved(Ecosystem::Node, json!({}));
        deps.push(deps[0].clone());
        let text = synthesize(&cfg, &deps, None).unwrap().content;
        assert_eq!(text.matches("\"vue\":").count(), 1);
    }

    #[test]
    fn component_lib_gets_exports() {
        let (cfg, deps) = resolved(Ecosystem::Node, json!({ "project_type": "component-lib" }));
        let parsed: Value =
            serde_json::from_str(&synthesize(&cfg, &deps, None).unwrap().content).unwrap();
        assert_eq!(parsed["main"], "./dist/index.js");
        assert_eq!(parsed["exports"]["."]["types"], "./dist/index.d.ts");
        assert_eq!(
            parsed["scripts"]["build"],
            "vite build && vue-tsc --emitDeclarationOnly"
        );
    }

    #[test]
    fn unpinned_node_dependency_uses_latest_tag() {
        let (cfg, mut deps) = resolved(Ecosystem::Node, json!({}));
        deps[0].version = None;
        let parsed: Value =
            serde_json::from_str(&synthesize(&cfg, &deps, None).unwrap().content).unwrap();
        assert_eq!(parsed["dependencies"][&deps[0].identifier], "latest");
    }

    #[test]
    fn mixed_ecosystems_are_rejected() {
        let (cfg, _) = resolved(Ecosystem::Go, json!({}));
        let (_, node_deps) = resolved(Ecosystem::Node, json!({}));
        assert!(matches!(
            synthesize(&cfg, &node_deps, None),
            Err(DomainError::EcosystemMismatch { .. })
        ));
    }
}
