//! Assemble `ProjectSettings` from flags and a settings file.

use std::path::Path;

use serde_json::{Map, Value};
use stackseed_core::{
    domain::{Configuration, Ecosystem, ProjectSettings},
    error::SeedError,
};
use tracing::debug;

use crate::{
    cli::ProjectArgs,
    error::{CliError, CliResult},
};

/// A normalized project plus the settings it came from.
#[derive(Debug)]
pub struct Project {
    pub settings: ProjectSettings,
    pub configuration: Configuration,
    /// Ignored settings values, already rendered for display.
    pub warnings: Vec<String>,
}

impl Project {
    pub fn ecosystem(&self) -> Ecosystem {
        self.settings.ecosystem()
    }

    pub fn name(&self) -> &str {
        self.settings.project_name()
    }
}

/// Settings file, then `--type`, then each `--set`, then the positional
/// name.
pub fn load(args: &ProjectArgs) -> CliResult<Project> {
    let settings = settings(args)?;
    let normalized = settings.normalize().map_err(SeedError::from)?;
    Ok(Project {
        settings,
        configuration: normalized.configuration,
        warnings: normalized.warnings.iter().map(ToString::to_string).collect(),
    })
}

/// The merged settings, before normalization.
pub fn settings(args: &ProjectArgs) -> CliResult<ProjectSettings> {
    let mut overrides = match &args.settings {
        Some(path) => read_settings_file(path)?,
        None => Value::Object(Map::new()),
    };

    let ecosystem = match args.ecosystem {
        Some(arg) => Ecosystem::from(arg),
        None => match overrides.get("ecosystem").and_then(Value::as_str) {
            Some(raw) => raw.parse::<Ecosystem>().map_err(SeedError::from)?,
            None => {
                return Err(CliError::InvalidInput {
                    message: "no ecosystem given; pass --ecosystem go|node".into(),
                    source: None,
                });
            }
        },
    };

    if let Some(kind) = &args.project_type {
        set_path(&mut overrides, "project_type", Value::String(kind.clone()))?;
    }
    for assignment in &args.set {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::InvalidInput {
                message: format!("'{assignment}' is not KEY=VALUE"),
                source: None,
            })?;
        set_path(&mut overrides, key.trim(), parse_scalar(raw.trim()))?;
    }
    if let Some(name) = &args.name {
        set_path(&mut overrides, "project_name", Value::String(name.clone()))?;
    }

    let name = overrides
        .get("project_name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(CliError::MissingProjectName)?;

    debug!(%ecosystem, project = %name, "Settings assembled");
    ProjectSettings::defaults_for(ecosystem, name)
        .merged_with(&overrides)
        .map_err(|e| CliError::Core(e.into()))
}

/// `.toml` files are TOML; everything else is JSON.
fn read_settings_file(path: &Path) -> CliResult<Value> {
    let failed = |message: String| CliError::SettingsFile {
        path: path.to_path_buf(),
        message,
    };

    let text = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let value: Value = if is_toml {
        toml::from_str(&text).map_err(|e| failed(e.to_string()))?
    } else {
        serde_json::from_str(&text).map_err(|e| failed(e.to_string()))?
    };

    if !value.is_object() {
        return Err(failed("top level must be a table of settings".into()));
    }
    Ok(value)
}

/// `true`/`false` become booleans; anything else stays a string.
fn parse_scalar(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    }
}

/// Set a dotted path, creating intermediate tables.
fn set_path(root: &mut Value, key: &str, value: Value) -> CliResult<()> {
    let invalid = |message: String| CliError::InvalidInput {
        message,
        source: None,
    };

    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid(format!("'{key}' is not a valid settings key")));
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| invalid(format!("'{key}' is not a valid settings key")))?;

    let mut cursor = root;
    for segment in parents {
        let Value::Object(map) = cursor else {
            return Err(invalid(format!("'{key}' descends into a non-table value")));
        };
        cursor = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    let Value::Object(map) = cursor else {
        return Err(invalid(format!("'{key}' descends into a non-table value")));
    };
    map.insert(last.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EcosystemArg;
    use serde_json::json;
    use std::io::Write;
    use stackseed_core::domain::entities::configuration::BackendConfig;

    fn args(name: Option<&str>, ecosystem: Option<EcosystemArg>) -> ProjectArgs {
        ProjectArgs {
            name: name.map(str::to_string),
            ecosystem,
            project_type: None,
            settings: None,
            set: Vec::new(),
        }
    }

    fn backend(project: &Project) -> &BackendConfig {
        match &project.configuration {
            Configuration::Backend(cfg) => cfg,
            other => panic!("expected backend, got {other:?}"),
        }
    }

    #[test]
    fn flags_alone_build_defaults() {
        let project = load(&args(Some("orders"), Some(EcosystemArg::Go))).unwrap();
        assert_eq!(project.ecosystem(), Ecosystem::Go);
        assert_eq!(project.name(), "orders");
        assert_eq!(backend(&project).module_path, "github.com/username/orders");
        assert!(project.warnings.is_empty());
    }

    #[test]
    fn set_writes_nested_keys() {
        let mut a = args(Some("orders"), Some(EcosystemArg::Go));
        a.set = vec![
            "database.type=mysql".into(),
            "cache.enabled=true".into(),
            "module_path=example.com/orders".into(),
        ];
        let ProjectSettings::Go(s) = settings(&a).unwrap() else {
            panic!("expected Go settings");
        };
        assert_eq!(s.database.kind, "mysql");
        assert!(s.cache.enabled);
        assert_eq!(s.module_path.as_deref(), Some("example.com/orders"));
    }

    #[test]
    fn settings_file_supplies_name_and_ecosystem() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            "{}",
            json!({ "ecosystem": "node", "project_name": "shop-ui", "css_framework": "tailwindcss" })
        )
        .unwrap();

        let mut a = args(None, None);
        a.settings = Some(file.path().to_path_buf());
        let project = load(&a).unwrap();
        assert_eq!(project.ecosystem(), Ecosystem::Node);
        assert_eq!(project.name(), "shop-ui");
    }

    #[test]
    fn toml_settings_file_is_read_as_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "ecosystem = \"go\"\nproject_name = \"billing\"\n\n[database]\ntype = \"sqlite\""
        )
        .unwrap();

        let mut a = args(Some("ledger"), None);
        a.settings = Some(file.path().to_path_buf());
        let ProjectSettings::Go(s) = settings(&a).unwrap() else {
            panic!("expected Go settings");
        };
        // positional name wins over the file
        assert_eq!(s.project_name, "ledger");
        assert_eq!(s.database.kind, "sqlite");
    }

    #[test]
    fn missing_name_is_reported() {
        let err = settings(&args(None, Some(EcosystemArg::Go))).unwrap_err();
        assert!(matches!(err, CliError::MissingProjectName));
    }

    #[test]
    fn missing_ecosystem_is_reported() {
        let err = settings(&args(Some("x"), None)).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn malformed_assignment_is_rejected() {
        let mut a = args(Some("x"), Some(EcosystemArg::Go));
        a.set = vec!["database".into()];
        assert!(matches!(settings(&a), Err(CliError::InvalidInput { .. })));

        a.set = vec!["database..type=mysql".into()];
        assert!(matches!(settings(&a), Err(CliError::InvalidInput { .. })));
    }

    #[test]
    fn unknown_toggle_becomes_a_warning() {
        let mut a = args(Some("orders"), Some(EcosystemArg::Go));
        a.set = vec!["cache.enabled=true".into(), "cache.type=memcached".into()];
        let project = load(&a).unwrap();
        assert_eq!(project.warnings.len(), 1);
        assert!(project.warnings[0].contains("memcached"));
    }

    #[test]
    fn unreadable_settings_file_names_the_path() {
        let mut a = args(Some("x"), Some(EcosystemArg::Go));
        a.settings = Some("/no/such/settings.json".into());
        match settings(&a) {
            Err(CliError::SettingsFile { path, .. }) => {
                assert_eq!(path, Path::new("/no/such/settings.json"));
            }
            other => panic!("expected SettingsFile, got {other:?}"),
        }
    }

    #[test]
    fn set_path_refuses_to_descend_into_scalars() {
        let mut root = json!({ "database": "postgres" });
        assert!(set_path(&mut root, "database.type", json!("mysql")).is_err());
    }
}
