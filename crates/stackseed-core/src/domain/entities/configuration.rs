//! Typed, validated project configuration.
//!
//! Built only through [`ProjectSettings::normalize`](super::settings::ProjectSettings::normalize),
//! so every value here has already passed validation. Immutable for the
//! whole resolution pass.

use serde::Serialize;

use crate::domain::{
    catalog::Capability,
    value_objects::{
        AuthScheme, BackendKind, CacheBackend, ConfigFormat, CssFramework, DatabaseDriver,
        DocsFormat, Ecosystem, FrontendKind, LoggingLibrary, MessageBroker,
    },
};

/// Go/Gin backend choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendConfig {
    pub project_name: String,
    pub kind: BackendKind,
    pub module_path: String,
    pub go_version: Option<String>,
    pub database: Option<DatabaseDriver>,
    pub auth: Option<AuthScheme>,
    pub config_format: Option<ConfigFormat>,
    pub logging: Option<LoggingLibrary>,
    pub validation: bool,
    pub cors: bool,
    pub docs: Option<DocsFormat>,
    pub enhanced_testing: bool,
    pub metrics: bool,
    pub rate_limiting: bool,
    pub cache: Option<CacheBackend>,
    pub message_queue: Option<MessageBroker>,
    pub grpc: bool,
    pub grpc_gateway: bool,
}

/// Vue 3 frontend choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontendConfig {
    pub project_name: String,
    pub kind: FrontendKind,
    pub description: String,
    pub author: String,
    pub license: String,
    pub css: Option<CssFramework>,
    pub typescript: bool,
    pub router: bool,
    pub pinia: bool,
    pub vitest: bool,
    pub eslint: bool,
    pub prettier: bool,
}

/// A configuration for exactly one ecosystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ecosystem", rename_all = "lowercase")]
pub enum Configuration {
    #[serde(rename = "go")]
    Backend(BackendConfig),
    #[serde(rename = "node")]
    Frontend(FrontendConfig),
}

impl Configuration {
    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Self::Backend(_) => Ecosystem::Go,
            Self::Frontend(_) => Ecosystem::Node,
        }
    }

    pub fn project_name(&self) -> &str {
        match self {
            Self::Backend(c) => &c.project_name,
            Self::Frontend(c) => &c.project_name,
        }
    }

    /// Project type as a display string.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Backend(c) => c.kind.as_str(),
            Self::Frontend(c) => c.kind.as_str(),
        }
    }

    /// Every capability this configuration switches on.
    ///
    /// Each toggle contributes zero or one capability. Order is irrelevant;
    /// the resolver walks [`Capability::ALL`] and only asks membership.
    pub fn capabilities(&self) -> Vec<Capability> {
        match self {
            Self::Backend(c) => backend_capabilities(c),
            Self::Frontend(c) => frontend_capabilities(c),
        }
    }
}

fn backend_capabilities(c: &BackendConfig) -> Vec<Capability> {
    let mut caps = vec![Capability::WebFramework];
    caps.extend(c.database.map(Capability::Database));
    caps.extend(c.auth.map(Capability::Auth));
    if c.config_format == Some(ConfigFormat::Yaml) {
        caps.push(Capability::YamlConfig);
    }
    caps.extend(c.logging.map(Capability::Logging));
    if c.validation {
        caps.push(Capability::Validation);
    }
    if c.cors {
        caps.push(Capability::Cors);
    }
    caps.extend(c.docs.map(Capability::Docs));
    if c.enhanced_testing {
        caps.push(Capability::EnhancedTesting);
    }
    if c.metrics {
        caps.push(Capability::Metrics);
    }
    if c.rate_limiting {
        caps.push(Capability::RateLimiting);
    }
    caps.extend(c.cache.map(Capability::Cache));
    caps.extend(c.message_queue.map(Capability::MessageQueue));
    if c.grpc {
        caps.push(Capability::Grpc);
    }
    if c.grpc_gateway {
        caps.push(Capability::GrpcGateway);
    }
    caps
}

fn frontend_capabilities(c: &FrontendConfig) -> Vec<Capability> {
    let mut caps = vec![Capability::Vue, Capability::Bundler];
    let toggles = [
        (c.typescript, Capability::TypeScript),
        (c.router, Capability::Router),
        (c.pinia, Capability::StateStore),
        (c.vitest, Capability::UnitTesting),
        (c.eslint, Capability::Lint),
        (c.prettier, Capability::Format),
        (c.eslint && c.prettier, Capability::LintFormatBridge),
        (c.kind == FrontendKind::Pwa, Capability::Pwa),
    ];
    caps.extend(toggles.into_iter().filter(|(on, _)| *on).map(|(_, cap)| cap));
    caps.extend(c.css.map(Capability::Css));
    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::settings::ProjectSettings;

    fn configuration(ecosystem: Ecosystem) -> Configuration {
        ProjectSettings::defaults_for(ecosystem, "demo")
            .normalize()
            .unwrap()
            .configuration
    }

    #[test]
    fn every_capability_matches_ecosystem() {
        for eco in Ecosystem::ALL {
            let cfg = configuration(eco);
            assert!(cfg.capabilities().iter().all(|c| c.ecosystem() == eco));
        }
    }

    #[test]
    fn backend_always_has_web_framework() {
        let caps = configuration(Ecosystem::Go).capabilities();
        assert!(caps.contains(&Capability::WebFramework));
        assert!(!caps.contains(&Capability::Grpc));
    }

    #[test]
    fn env_config_contributes_nothing() {
        let Configuration::Backend(mut c) = configuration(Ecosystem::Go) else {
            unreachable!()
        };
        c.config_format = Some(ConfigFormat::Env);
        let caps = Configuration::Backend(c).capabilities();
        assert!(!caps.contains(&Capability::YamlConfig));
    }

    #[test]
    fn prettier_bridge_needs_both_tools() {
        let Configuration::Frontend(mut c) = configuration(Ecosystem::Node) else {
            unreachable!()
        };
        c.eslint = false;
        let caps = Configuration::Frontend(c).capabilities();
        assert!(caps.contains(&Capability::Format));
        assert!(!caps.contains(&Capability::LintFormatBridge));
    }

    #[test]
    fn pwa_kind_adds_pwa_capability() {
        let Configuration::Frontend(mut c) = configuration(Ecosystem::Node) else {
            unreachable!()
        };
        c.kind = FrontendKind::Pwa;
        assert!(Configuration::Frontend(c).capabilities().contains(&Capability::Pwa));
    }
}
