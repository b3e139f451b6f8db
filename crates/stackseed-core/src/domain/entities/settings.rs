//! User-facing project settings schema.
//!
//! `ProjectSettings` is what users write in a settings file: loose strings
//! for every choice, each field with a documented default. It is never
//! mutated in place; [`ProjectSettings::merged_with`] returns a new value and
//! [`ProjectSettings::normalize`] turns it into a typed [`Configuration`].
//!
//! ```toml
//! ecosystem = "go"
//! project_name = "orders"
//! project_type = "microservice"
//!
//! [database]
//! enabled = true
//! type = "mysql"
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::configuration::{BackendConfig, Configuration, FrontendConfig},
    error::DomainError,
    validation::DomainValidator,
    value_objects::{
        AuthScheme, BackendKind, CacheBackend, ConfigFormat, CssFramework, DatabaseDriver,
        DocsFormat, Ecosystem, FrontendKind, LoggingLibrary, MessageBroker,
    },
};

// ── Sections ─────────────────────────────────────────────────────────────────

/// A feature with an on/off switch and a named variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureChoice {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FeatureChoice {
    fn on(kind: &str) -> Self {
        Self {
            enabled: true,
            kind: kind.into(),
        }
    }

    fn off(kind: &str) -> Self {
        Self {
            enabled: false,
            kind: kind.into(),
        }
    }
}

impl Default for FeatureChoice {
    fn default() -> Self {
        Self::off("")
    }
}

/// A plain on/off feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub enabled: bool,
}

impl Toggle {
    const ON: Toggle = Toggle { enabled: true };
    const OFF: Toggle = Toggle { enabled: false };
}

/// A toggle whose default depends on the project type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindDefaultToggle {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSection {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            kind: "yaml".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub library: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            library: "logrus".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingSection {
    pub enhanced: bool,
}

impl Default for TestingSection {
    fn default() -> Self {
        Self { enhanced: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcSection {
    /// `None` means "on for grpc projects, off otherwise".
    pub enabled: Option<bool>,
    pub gateway: bool,
}

impl Default for GrpcSection {
    fn default() -> Self {
        Self {
            enabled: None,
            gateway: true,
        }
    }
}

// ── Backend ──────────────────────────────────────────────────────────────────

/// Settings for a Go/Gin backend skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub project_name: String,
    /// `api`, `web`, `microservice`, or `grpc`.
    pub project_type: String,
    /// Defaults to `github.com/username/<project_name>`.
    pub module_path: Option<String>,
    /// Pin the `go` directive instead of asking the toolchain index.
    pub go_version: Option<String>,
    pub database: FeatureChoice,
    pub auth: FeatureChoice,
    pub config: ConfigSection,
    pub logging: LoggingSection,
    pub validation: Toggle,
    pub cors: Toggle,
    pub docs: FeatureChoice,
    pub testing: TestingSection,
    /// Defaults to on for microservices.
    pub metrics: KindDefaultToggle,
    pub grpc: GrpcSection,
    pub cache: FeatureChoice,
    pub message_queue: FeatureChoice,
    pub rate_limiting: Toggle,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_type: BackendKind::Api.as_str().into(),
            module_path: None,
            go_version: None,
            database: FeatureChoice::on("postgres"),
            auth: FeatureChoice::on("jwt"),
            config: ConfigSection::default(),
            logging: LoggingSection::default(),
            validation: Toggle::ON,
            cors: Toggle::ON,
            docs: FeatureChoice::on("swagger"),
            testing: TestingSection::default(),
            metrics: KindDefaultToggle::default(),
            grpc: GrpcSection::default(),
            cache: FeatureChoice::off("redis"),
            message_queue: FeatureChoice::off("rabbitmq"),
            rate_limiting: Toggle::OFF,
        }
    }
}

// ── Frontend ─────────────────────────────────────────────────────────────────

/// Settings for a Vue 3 frontend skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    pub project_name: String,
    /// `spa`, `pwa`, `component-lib`, or `admin-dashboard`.
    pub project_type: String,
    pub description: String,
    pub author: String,
    pub license: String,
    /// `none`, `tailwindcss`, `bootstrap`, or `bulma`.
    pub css_framework: String,
    pub typescript: bool,
    pub router: bool,
    pub pinia: bool,
    pub vitest: bool,
    pub eslint: bool,
    pub prettier: bool,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_type: FrontendKind::Spa.as_str().into(),
            description: "A Vue 3 project".into(),
            author: String::new(),
            license: "MIT".into(),
            css_framework: "none".into(),
            typescript: true,
            router: true,
            pinia: true,
            vitest: true,
            eslint: true,
            prettier: true,
        }
    }
}

// ── ProjectSettings ──────────────────────────────────────────────────────────

/// Settings for either ecosystem, tagged by `ecosystem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ecosystem", rename_all = "lowercase")]
pub enum ProjectSettings {
    Go(BackendSettings),
    Node(FrontendSettings),
}

/// A typed configuration plus the choices that were dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub configuration: Configuration,
    /// Unknown toggle values, each of which disabled its feature.
    pub warnings: Vec<DomainError>,
}

impl ProjectSettings {
    /// Defaults for an ecosystem with the given project name.
    pub fn defaults_for(ecosystem: Ecosystem, project_name: impl Into<String>) -> Self {
        match ecosystem {
            Ecosystem::Go => Self::Go(BackendSettings {
                project_name: project_name.into(),
                ..BackendSettings::default()
            }),
            Ecosystem::Node => Self::Node(FrontendSettings {
                project_name: project_name.into(),
                ..FrontendSettings::default()
            }),
        }
    }

    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Self::Go(_) => Ecosystem::Go,
            Self::Node(_) => Ecosystem::Node,
        }
    }

    pub fn project_name(&self) -> &str {
        match self {
            Self::Go(s) => &s.project_name,
            Self::Node(s) => &s.project_name,
        }
    }

    /// Overlay `overrides` onto these settings and return the result.
    ///
    /// Objects merge key by key at every depth; any other value replaces
    /// what was there. `self` is left untouched. The ecosystem tag cannot be
    /// changed by an overlay.
    pub fn merged_with(&self, overrides: &serde_json::Value) -> Result<Self, DomainError> {
        let mut base = serde_json::to_value(self)
            .map_err(|e| DomainError::InvalidConfiguration(e.to_string()))?;

        let mut overlay = overrides.clone();
        if let Some(map) = overlay.as_object_mut() {
            map.remove("ecosystem");
        }
        merge_json(&mut base, overlay);

        serde_json::from_value(base).map_err(|e| DomainError::InvalidConfiguration(e.to_string()))
    }

    /// Validate and convert into a typed configuration.
    ///
    /// Missing identity fields and unknown project types fail. Unknown
    /// feature variants do not: they disable the feature and are returned
    /// as warnings.
    pub fn normalize(&self) -> Result<Normalized, DomainError> {
        let mut warnings = Vec::new();
        let configuration = match self {
            Self::Go(s) => Configuration::Backend(normalize_backend(s, &mut warnings)?),
            Self::Node(s) => Configuration::Frontend(normalize_frontend(s, &mut warnings)?),
        };
        Ok(Normalized {
            configuration,
            warnings,
        })
    }
}

fn merge_json(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Parse an enabled choice; unknown values disable the feature.
fn choose<T>(enabled: bool, raw: &str, warnings: &mut Vec<DomainError>) -> Option<T>
where
    T: FromStr<Err = DomainError>,
{
    let raw = raw.trim();
    if !enabled || raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    match raw.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warnings.push(e);
            None
        }
    }
}

fn normalize_backend(
    s: &BackendSettings,
    warnings: &mut Vec<DomainError>,
) -> Result<BackendConfig, DomainError> {
    let project_name = DomainValidator::validate_project_name(&s.project_name)?;
    let kind: BackendKind = s
        .project_type
        .parse()
        .map_err(|e: DomainError| DomainError::InvalidConfiguration(e.to_string()))?;

    let module_path = match s.module_path.as_deref() {
        Some(path) => DomainValidator::validate_module_path(path)?,
        None => format!("github.com/username/{project_name}"),
    };

    let go_version = match s.go_version.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(v) => Some(crate::domain::version::normalize(v.trim_start_matches("go")).to_string()),
    };

    let grpc = s.grpc.enabled.unwrap_or(kind == BackendKind::Grpc) || kind == BackendKind::Grpc;

    Ok(BackendConfig {
        project_name,
        kind,
        module_path,
        go_version,
        database: choose::<DatabaseDriver>(s.database.enabled, &s.database.kind, warnings),
        auth: choose::<AuthScheme>(s.auth.enabled, &s.auth.kind, warnings),
        config_format: choose::<ConfigFormat>(true, &s.config.kind, warnings),
        logging: choose::<LoggingLibrary>(true, &s.logging.library, warnings),
        validation: s.validation.enabled,
        cors: s.cors.enabled,
        docs: choose::<DocsFormat>(s.docs.enabled, &s.docs.kind, warnings),
        enhanced_testing: s.testing.enhanced,
        metrics: s
            .metrics
            .enabled
            .unwrap_or(kind == BackendKind::Microservice),
        rate_limiting: s.rate_limiting.enabled,
        cache: choose::<CacheBackend>(s.cache.enabled, &s.cache.kind, warnings),
        message_queue: choose::<MessageBroker>(
            s.message_queue.enabled,
            &s.message_queue.kind,
            warnings,
        ),
        grpc,
        grpc_gateway: grpc && s.grpc.gateway,
    })
}

fn normalize_frontend(
    s: &FrontendSettings,
    warnings: &mut Vec<DomainError>,
) -> Result<FrontendConfig, DomainError> {
    let project_name = DomainValidator::validate_project_name(&s.project_name)?;
    let kind: FrontendKind = s
        .project_type
        .parse()
        .map_err(|e: DomainError| DomainError::InvalidConfiguration(e.to_string()))?;

    Ok(FrontendConfig {
        project_name,
        kind,
        description: s.description.clone(),
        author: s.author.clone(),
        license: s.license.clone(),
        css: choose::<CssFramework>(true, &s.css_framework, warnings),
        typescript: s.typescript,
        router: s.router,
        pinia: s.pinia,
        vitest: s.vitest,
        eslint: s.eslint,
        prettier: s.prettier,
    })
}
