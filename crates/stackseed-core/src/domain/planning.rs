//! Configuration to dependency list, before any version is known.
//!
//! The structural half of resolution: which packages, in which order. Pure
//! and deterministic; two calls with equal configurations return equal
//! lists.

use std::collections::HashSet;

use crate::domain::{
    catalog::{Capability, entries_for},
    entities::{Configuration, Dependency},
    error::DomainError,
    value_objects::Category,
};

/// Derive the ordered, de-duplicated dependency list for a configuration.
///
/// Ordering: production before development; within each, catalog
/// declaration order. When two capabilities pull in the same identifier
/// the first declaration wins.
pub fn plan_dependencies(configuration: &Configuration) -> Result<Vec<Dependency>, DomainError> {
    let ecosystem = configuration.ecosystem();
    let enabled = configuration.capabilities();

    let mut seen = HashSet::new();
    let mut planned = Vec::new();

    for cap in Capability::ALL.iter().filter(|c| enabled.contains(*c)) {
        for entry in entries_for(*cap, ecosystem)? {
            if seen.insert(entry.identifier) {
                planned.push(Dependency::declared(entry));
            }
        }
    }

    let (mut ordered, dev): (Vec<_>, Vec<_>) = planned
        .into_iter()
        .partition(|d| d.category == Category::Production);
    ordered.extend(dev);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProjectSettings;
    use crate::domain::value_objects::Ecosystem;
    use serde_json::json;

    fn plan(ecosystem: Ecosystem, overrides: serde_json::Value) -> Vec<Dependency> {
        let settings = ProjectSettings::defaults_for(ecosystem, "demo")
            .merged_with(&overrides)
            .unwrap();
        let cfg = settings.normalize().unwrap().configuration;
        plan_dependencies(&cfg).unwrap()
    }

    fn ids(deps: &[Dependency]) -> Vec<&str> {
        deps.iter().map(|d| d.identifier.as_str()).collect()
    }

    #[test]
    fn postgres_gets_one_orm_and_one_driver() {
        let deps = plan(Ecosystem::Go, json!({ "database": { "enabled": true, "type": "postgres" } }));
        let ids = ids(&deps);
        assert_eq!(ids.iter().filter(|i| **i == "gorm.io/gorm").count(), 1);
        assert!(ids.contains(&"gorm.io/driver/postgres"));
        assert!(!ids.contains(&"gorm.io/driver/mysql"));
        assert!(!ids.contains(&"gorm.io/driver/sqlite"));
    }

    #[test]
    fn auth_disabled_means_no_jwt() {
        let deps = plan(
            Ecosystem::Go,
            json!({ "auth": { "enabled": false }, "testing": { "enhanced": true } }),
        );
        assert!(!ids(&deps).iter().any(|i| i.contains("jwt")));
        assert!(ids(&deps).contains(&"github.com/stretchr/testify"));
    }

    #[test]
    fn shared_identifier_is_deduplicated() {
        let deps = plan(
            Ecosystem::Go,
            json!({ "rate_limiting": { "enabled": true }, "cache": { "enabled": true } }),
        );
        let redis = ids(&deps)
            .into_iter()
            .filter(|i| *i == "github.com/go-redis/redis/v8")
            .count();
        assert_eq!(redis, 1);
    }

    #[test]
    fn production_precedes_development() {
        let deps = plan(Ecosystem::Node, json!({ "css_framework": "tailwindcss" }));
        let first_dev = deps
            .iter()
            .position(|d| d.category == Category::Development)
            .unwrap();
        assert!(deps[first_dev..]
            .iter()
            .all(|d| d.category == Category::Development));
        assert_eq!(deps[0].identifier, "vue");
    }

    #[test]
    fn catalog_order_within_category() {
        let deps = plan(Ecosystem::Go, json!({}));
        let ids = ids(&deps);
        let gin = ids.iter().position(|i| *i == "github.com/gin-gonic/gin").unwrap();
        let gorm = ids.iter().position(|i| *i == "gorm.io/gorm").unwrap();
        let cors = ids.iter().position(|i| *i == "github.com/gin-contrib/cors").unwrap();
        assert!(gin < gorm && gorm < cors);
    }

    #[test]
    fn planning_is_deterministic() {
        let a = plan(Ecosystem::Node, json!({ "css_framework": "bootstrap" }));
        let b = plan(Ecosystem::Node, json!({ "css_framework": "bootstrap" }));
        assert_eq!(a, b);
    }

    #[test]
    fn every_disabled_toggle_drops_its_packages() {
        let deps = plan(
            Ecosystem::Node,
            json!({
                "typescript": false, "router": false, "pinia": false,
                "vitest": false, "eslint": false, "prettier": false
            }),
        );
        assert_eq!(ids(&deps), vec!["vue", "vite", "@vitejs/plugin-vue"]);
    }

    #[test]
    fn unknown_logging_library_contributes_nothing() {
        let deps = plan(Ecosystem::Go, json!({ "logging": { "library": "log15" } }));
        assert!(!ids(&deps).contains(&"github.com/sirupsen/logrus"));
        assert!(!ids(&deps).contains(&"go.uber.org/zap"));
    }
}
