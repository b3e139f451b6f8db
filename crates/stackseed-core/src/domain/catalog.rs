//! Dependency catalog: capabilities to concrete packages.
//!
//! # Design Rationale
//!
//! Every package the resolver can emit is described exactly once by a
//! [`CatalogEntry`] in [`CATALOG`]. A configuration never names packages
//! directly; it enables [`Capability`] values, and this table turns them into
//! identifiers. Lookups are O(n) scans over a static slice.
//!
//! # Adding a New Package
//!
//! 1. If it belongs to a new feature, add a [`Capability`] variant and list
//!    it in [`Capability::ALL`]
//! 2. Add one [`CatalogEntry`] per package to [`CATALOG`], keeping the
//!    table in the same order as [`Capability::ALL`]
//! 3. Run the tests: [`assert_catalog_integrity`] rejects unmapped
//!    capabilities and malformed fallback pins

use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{
    AuthScheme, CacheBackend, Category, CssFramework, DatabaseDriver, DocsFormat, Ecosystem,
    LoggingLibrary, MessageBroker, Purpose,
};
use crate::domain::version;

// ── Capabilities ─────────────────────────────────────────────────────────────

/// An abstract feature a project can ask for.
///
/// Variants with a payload form a family: `Database(Postgres)` and
/// `Database(Mysql)` share the ORM entry but differ in driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    // Go / Gin
    WebFramework,
    Database(DatabaseDriver),
    Auth(AuthScheme),
    YamlConfig,
    Logging(LoggingLibrary),
    Validation,
    Cors,
    Docs(DocsFormat),
    EnhancedTesting,
    Metrics,
    RateLimiting,
    Cache(CacheBackend),
    MessageQueue(MessageBroker),
    Grpc,
    GrpcGateway,
    // Node / Vue
    Vue,
    Bundler,
    TypeScript,
    Router,
    StateStore,
    UnitTesting,
    Lint,
    Format,
    LintFormatBridge,
    Css(CssFramework),
    Pwa,
}

impl Capability {
    /// Every capability, in catalog declaration order.
    pub const ALL: &'static [Capability] = &[
        Self::WebFramework,
        Self::Database(DatabaseDriver::Postgres),
        Self::Database(DatabaseDriver::Mysql),
        Self::Database(DatabaseDriver::Sqlite),
        Self::Auth(AuthScheme::Jwt),
        Self::YamlConfig,
        Self::Logging(LoggingLibrary::Logrus),
        Self::Logging(LoggingLibrary::Zap),
        Self::Validation,
        Self::Cors,
        Self::Docs(DocsFormat::Swagger),
        Self::EnhancedTesting,
        Self::Metrics,
        Self::RateLimiting,
        Self::Cache(CacheBackend::Redis),
        Self::MessageQueue(MessageBroker::RabbitMq),
        Self::MessageQueue(MessageBroker::Nats),
        Self::Grpc,
        Self::GrpcGateway,
        Self::Vue,
        Self::Bundler,
        Self::TypeScript,
        Self::Router,
        Self::StateStore,
        Self::UnitTesting,
        Self::Lint,
        Self::Format,
        Self::LintFormatBridge,
        Self::Css(CssFramework::Tailwind),
        Self::Css(CssFramework::Bootstrap),
        Self::Css(CssFramework::Bulma),
        Self::Pwa,
    ];

    /// The ecosystem whose catalog section holds this capability.
    pub const fn ecosystem(&self) -> Ecosystem {
        match self {
            Self::WebFramework
            | Self::Database(_)
            | Self::Auth(_)
            | Self::YamlConfig
            | Self::Logging(_)
            | Self::Validation
            | Self::Cors
            | Self::Docs(_)
            | Self::EnhancedTesting
            | Self::Metrics
            | Self::RateLimiting
            | Self::Cache(_)
            | Self::MessageQueue(_)
            | Self::Grpc
            | Self::GrpcGateway => Ecosystem::Go,
            Self::Vue
            | Self::Bundler
            | Self::TypeScript
            | Self::Router
            | Self::StateStore
            | Self::UnitTesting
            | Self::Lint
            | Self::Format
            | Self::LintFormatBridge
            | Self::Css(_)
            | Self::Pwa => Ecosystem::Node,
        }
    }

    /// Stable string key, e.g. `database:postgres`.
    pub fn key(&self) -> String {
        match self {
            Self::WebFramework => "web-framework".into(),
            Self::Database(d) => format!("database:{}", d.as_str()),
            Self::Auth(AuthScheme::Jwt) => "auth:jwt".into(),
            Self::YamlConfig => "config:yaml".into(),
            Self::Logging(LoggingLibrary::Logrus) => "logging:logrus".into(),
            Self::Logging(LoggingLibrary::Zap) => "logging:zap".into(),
            Self::Validation => "validation".into(),
            Self::Cors => "cors".into(),
            Self::Docs(DocsFormat::Swagger) => "docs:swagger".into(),
            Self::EnhancedTesting => "testing:enhanced".into(),
            Self::Metrics => "metrics".into(),
            Self::RateLimiting => "rate-limiting".into(),
            Self::Cache(CacheBackend::Redis) => "cache:redis".into(),
            Self::MessageQueue(MessageBroker::RabbitMq) => "message-queue:rabbitmq".into(),
            Self::MessageQueue(MessageBroker::Nats) => "message-queue:nats".into(),
            Self::Grpc => "grpc".into(),
            Self::GrpcGateway => "grpc:gateway".into(),
            Self::Vue => "vue".into(),
            Self::Bundler => "bundler".into(),
            Self::TypeScript => "typescript".into(),
            Self::Router => "router".into(),
            Self::StateStore => "state".into(),
            Self::UnitTesting => "testing:unit".into(),
            Self::Lint => "lint".into(),
            Self::Format => "format".into(),
            Self::LintFormatBridge => "lint:prettier".into(),
            Self::Css(CssFramework::Tailwind) => "css:tailwind".into(),
            Self::Css(CssFramework::Bootstrap) => "css:bootstrap".into(),
            Self::Css(CssFramework::Bulma) => "css:bulma".into(),
            Self::Pwa => "pwa".into(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

// ── Catalog entries ──────────────────────────────────────────────────────────

/// One concrete package pulled in by a capability.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// The capability that selects this package.
    pub capability: Capability,

    /// Abstract name, unique within a resolution pass.
    pub name: &'static str,

    /// Module path (Go) or registry package name (Node).
    pub identifier: &'static str,

    pub category: Category,
    pub purpose: Purpose,

    /// GitHub `owner/repo` whose releases track this module.
    ///
    /// `None` skips the release-tag source and goes straight to the
    /// registry listing. Always `None` for Node entries.
    pub repository: Option<&'static str>,

    /// Known-good version used when every registry source fails.
    pub fallback_version: &'static str,
}

const fn go(
    capability: Capability,
    name: &'static str,
    identifier: &'static str,
    category: Category,
    purpose: Purpose,
    repository: Option<&'static str>,
    fallback_version: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        capability,
        name,
        identifier,
        category,
        purpose,
        repository,
        fallback_version,
    }
}

const fn npm(
    capability: Capability,
    identifier: &'static str,
    category: Category,
    purpose: Purpose,
    fallback_version: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        capability,
        name: identifier,
        identifier,
        category,
        purpose,
        repository: None,
        fallback_version,
    }
}

use Category::{Development as Dev, Production as Prod};

/// Single source of truth for every package the resolver can emit.
///
/// Declaration order is semantic: within each category the resolver emits
/// dependencies in this order.
pub static CATALOG: &[CatalogEntry] = &[
    // ── Go: framework ────────────────────────────────────────────────────────
    go(
        Capability::WebFramework,
        "gin",
        "github.com/gin-gonic/gin",
        Prod,
        Purpose::Framework,
        Some("gin-gonic/gin"),
        "1.9.1",
    ),
    // ── Go: database family (ORM + one driver) ──────────────────────────────
    go(
        Capability::Database(DatabaseDriver::Postgres),
        "orm",
        "gorm.io/gorm",
        Prod,
        Purpose::Database,
        Some("go-gorm/gorm"),
        "1.25.5",
    ),
    go(
        Capability::Database(DatabaseDriver::Postgres),
        "postgres-driver",
        "gorm.io/driver/postgres",
        Prod,
        Purpose::Database,
        Some("go-gorm/postgres"),
        "1.5.4",
    ),
    go(
        Capability::Database(DatabaseDriver::Mysql),
        "orm",
        "gorm.io/gorm",
        Prod,
        Purpose::Database,
        Some("go-gorm/gorm"),
        "1.25.5",
    ),
    go(
        Capability::Database(DatabaseDriver::Mysql),
        "mysql-driver",
        "gorm.io/driver/mysql",
        Prod,
        Purpose::Database,
        Some("go-gorm/mysql"),
        "1.5.2",
    ),
    go(
        Capability::Database(DatabaseDriver::Sqlite),
        "orm",
        "gorm.io/gorm",
        Prod,
        Purpose::Database,
        Some("go-gorm/gorm"),
        "1.25.5",
    ),
    go(
        Capability::Database(DatabaseDriver::Sqlite),
        "sqlite-driver",
        "gorm.io/driver/sqlite",
        Prod,
        Purpose::Database,
        Some("go-gorm/sqlite"),
        "1.5.4",
    ),
    // ── Go: cross-cutting ───────────────────────────────────────────────────
    go(
        Capability::Auth(AuthScheme::Jwt),
        "jwt",
        "github.com/golang-jwt/jwt/v5",
        Prod,
        Purpose::Auth,
        Some("golang-jwt/jwt"),
        "5.2.0",
    ),
    go(
        Capability::YamlConfig,
        "viper",
        "github.com/spf13/viper",
        Prod,
        Purpose::Config,
        Some("spf13/viper"),
        "1.18.2",
    ),
    go(
        Capability::Logging(LoggingLibrary::Logrus),
        "logrus",
        "github.com/sirupsen/logrus",
        Prod,
        Purpose::Logging,
        Some("sirupsen/logrus"),
        "1.9.3",
    ),
    go(
        Capability::Logging(LoggingLibrary::Zap),
        "zap",
        "go.uber.org/zap",
        Prod,
        Purpose::Logging,
        Some("uber-go/zap"),
        "1.26.0",
    ),
    go(
        Capability::Validation,
        "validator",
        "github.com/go-playground/validator/v10",
        Prod,
        Purpose::Validation,
        Some("go-playground/validator"),
        "10.16.0",
    ),
    go(
        Capability::Cors,
        "cors",
        "github.com/gin-contrib/cors",
        Prod,
        Purpose::Http,
        Some("gin-contrib/cors"),
        "1.5.0",
    ),
    go(
        Capability::Docs(DocsFormat::Swagger),
        "swag",
        "github.com/swaggo/swag",
        Prod,
        Purpose::Docs,
        Some("swaggo/swag"),
        "1.16.2",
    ),
    go(
        Capability::Docs(DocsFormat::Swagger),
        "gin-swagger",
        "github.com/swaggo/gin-swagger",
        Prod,
        Purpose::Docs,
        Some("swaggo/gin-swagger"),
        "1.6.0",
    ),
    go(
        Capability::Docs(DocsFormat::Swagger),
        "swagger-files",
        "github.com/swaggo/files",
        Prod,
        Purpose::Docs,
        Some("swaggo/files"),
        "1.0.1",
    ),
    go(
        Capability::EnhancedTesting,
        "testify",
        "github.com/stretchr/testify",
        Dev,
        Purpose::Testing,
        Some("stretchr/testify"),
        "1.8.4",
    ),
    go(
        Capability::Metrics,
        "prometheus",
        "github.com/prometheus/client_golang",
        Prod,
        Purpose::Metrics,
        Some("prometheus/client_golang"),
        "1.18.0",
    ),
    go(
        Capability::Metrics,
        "gin-prometheus",
        "github.com/zsais/go-gin-prometheus",
        Prod,
        Purpose::Metrics,
        None,
        "0.1.0",
    ),
    // go-redis is shared by rate limiting and caching; the resolver dedupes.
    go(
        Capability::RateLimiting,
        "redis",
        "github.com/go-redis/redis/v8",
        Prod,
        Purpose::RateLimit,
        None,
        "8.11.5",
    ),
    go(
        Capability::RateLimiting,
        "x-time",
        "golang.org/x/time",
        Prod,
        Purpose::RateLimit,
        None,
        "0.5.0",
    ),
    go(
        Capability::Cache(CacheBackend::Redis),
        "redis",
        "github.com/go-redis/redis/v8",
        Prod,
        Purpose::Cache,
        None,
        "8.11.5",
    ),
    go(
        Capability::MessageQueue(MessageBroker::RabbitMq),
        "amqp",
        "github.com/streadway/amqp",
        Prod,
        Purpose::Messaging,
        Some("streadway/amqp"),
        "1.1.0",
    ),
    go(
        Capability::MessageQueue(MessageBroker::Nats),
        "nats",
        "github.com/nats-io/nats.go",
        Prod,
        Purpose::Messaging,
        Some("nats-io/nats.go"),
        "1.31.0",
    ),
    go(
        Capability::Grpc,
        "grpc",
        "google.golang.org/grpc",
        Prod,
        Purpose::Rpc,
        Some("grpc/grpc-go"),
        "1.60.1",
    ),
    go(
        Capability::Grpc,
        "protobuf",
        "google.golang.org/protobuf",
        Prod,
        Purpose::Rpc,
        Some("protocolbuffers/protobuf-go"),
        "1.32.0",
    ),
    go(
        Capability::GrpcGateway,
        "grpc-gateway",
        "github.com/grpc-ecosystem/grpc-gateway/v2",
        Prod,
        Purpose::Rpc,
        Some("grpc-ecosystem/grpc-gateway"),
        "2.18.1",
    ),
    // ── Node: core ──────────────────────────────────────────────────────────
    npm(Capability::Vue, "vue", Prod, Purpose::Framework, "3.4.0"),
    npm(Capability::Bundler, "vite", Dev, Purpose::Build, "5.0.0"),
    npm(
        Capability::Bundler,
        "@vitejs/plugin-vue",
        Dev,
        Purpose::Build,
        "4.5.0",
    ),
    npm(
        Capability::TypeScript,
        "typescript",
        Dev,
        Purpose::TypeScript,
        "5.3.0",
    ),
    npm(
        Capability::TypeScript,
        "vue-tsc",
        Dev,
        Purpose::TypeScript,
        "1.8.25",
    ),
    npm(
        Capability::TypeScript,
        "@vue/tsconfig",
        Dev,
        Purpose::TypeScript,
        "0.4.0",
    ),
    npm(
        Capability::TypeScript,
        "npm-run-all2",
        Dev,
        Purpose::Build,
        "6.1.1",
    ),
    npm(Capability::Router, "vue-router", Prod, Purpose::Routing, "4.2.0"),
    npm(Capability::StateStore, "pinia", Prod, Purpose::State, "2.1.0"),
    npm(Capability::UnitTesting, "vitest", Dev, Purpose::Testing, "1.0.0"),
    npm(
        Capability::UnitTesting,
        "@vue/test-utils",
        Dev,
        Purpose::Testing,
        "2.4.0",
    ),
    npm(Capability::UnitTesting, "jsdom", Dev, Purpose::Testing, "23.0.0"),
    npm(Capability::Lint, "eslint", Dev, Purpose::Lint, "8.50.0"),
    npm(
        Capability::Lint,
        "eslint-plugin-vue",
        Dev,
        Purpose::Lint,
        "9.17.0",
    ),
    npm(
        Capability::Lint,
        "@rushstack/eslint-patch",
        Dev,
        Purpose::Lint,
        "1.3.0",
    ),
    npm(
        Capability::Lint,
        "@vue/eslint-config-typescript",
        Dev,
        Purpose::Lint,
        "12.0.0",
    ),
    npm(Capability::Format, "prettier", Dev, Purpose::Format, "3.0.0"),
    npm(
        Capability::LintFormatBridge,
        "@vue/eslint-config-prettier",
        Dev,
        Purpose::Lint,
        "8.0.0",
    ),
    // ── Node: CSS family ────────────────────────────────────────────────────
    npm(
        Capability::Css(CssFramework::Tailwind),
        "tailwindcss",
        Dev,
        Purpose::Css,
        "3.3.0",
    ),
    npm(
        Capability::Css(CssFramework::Tailwind),
        "postcss",
        Dev,
        Purpose::Css,
        "8.4.31",
    ),
    npm(
        Capability::Css(CssFramework::Tailwind),
        "autoprefixer",
        Dev,
        Purpose::Css,
        "10.4.16",
    ),
    npm(
        Capability::Css(CssFramework::Bootstrap),
        "bootstrap",
        Prod,
        Purpose::Css,
        "5.3.2",
    ),
    npm(
        Capability::Css(CssFramework::Bootstrap),
        "@popperjs/core",
        Prod,
        Purpose::Css,
        "2.11.8",
    ),
    npm(
        Capability::Css(CssFramework::Bulma),
        "bulma",
        Prod,
        Purpose::Css,
        "0.9.4",
    ),
    // ── Node: project-type extras ───────────────────────────────────────────
    npm(Capability::Pwa, "vite-plugin-pwa", Dev, Purpose::Pwa, "0.17.0"),
    npm(Capability::Pwa, "workbox-window", Prod, Purpose::Pwa, "7.0.0"),
];

// ── Lookup ───────────────────────────────────────────────────────────────────

/// All catalog entries for a capability, in declaration order.
///
/// A capability with no entries, or one asked for under the wrong
/// ecosystem, is a programming error and is reported as
/// [`DomainError::UnmappedCapability`].
pub fn entries_for(
    capability: Capability,
    ecosystem: Ecosystem,
) -> Result<Vec<&'static CatalogEntry>, DomainError> {
    if capability.ecosystem() != ecosystem {
        return Err(DomainError::UnmappedCapability(format!(
            "{capability} (asked for under {ecosystem})"
        )));
    }

    let entries: Vec<_> = CATALOG
        .iter()
        .filter(|e| e.capability == capability)
        .collect();

    if entries.is_empty() {
        return Err(DomainError::UnmappedCapability(capability.key()));
    }
    Ok(entries)
}

/// Look up an entry by identifier, e.g. to recover a fallback pin for a
/// package named on the command line.
pub fn find_by_identifier(ecosystem: Ecosystem, identifier: &str) -> Option<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|e| e.capability.ecosystem() == ecosystem && e.identifier == identifier)
}

// ── Catalog integrity (checked in tests) ─────────────────────────────────────

/// Assert that the catalog is internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_catalog_integrity() {
    // Totality: every capability maps to at least one entry.
    for &cap in Capability::ALL {
        assert!(
            entries_for(cap, cap.ecosystem()).is_ok(),
            "Capability {cap} has no catalog entry"
        );
    }

    // Every entry's capability is listed in ALL, in the same order.
    let mut last_index = 0;
    for entry in CATALOG {
        let index = Capability::ALL
            .iter()
            .position(|c| *c == entry.capability)
            .unwrap_or_else(|| panic!("{} is not listed in Capability::ALL", entry.capability));
        assert!(
            index >= last_index,
            "Entry {} for {} is declared out of order",
            entry.identifier,
            entry.capability
        );
        last_index = index;
    }

    for entry in CATALOG {
        assert!(
            !entry.identifier.trim().is_empty(),
            "Entry {:?} has an empty identifier",
            entry.name
        );

        // Fallback pins must be usable stable versions.
        assert!(
            version::parse_lenient(entry.fallback_version).is_some()
                && !version::is_prerelease(entry.fallback_version),
            "Entry {} has an unusable fallback version {:?}",
            entry.identifier,
            entry.fallback_version
        );

        if entry.capability.ecosystem() == Ecosystem::Node {
            assert!(
                entry.repository.is_none(),
                "Node entry {} must not carry a GitHub repository",
                entry.identifier
            );
        }
    }

    if let Some(conflict) = shared_identifier_conflict(CATALOG) {
        panic!("{conflict}");
    }

    // Database family: exactly one ORM plus one driver per variant.
    for &cap in Capability::ALL {
        if let Capability::Database(driver) = cap {
            let entries = entries_for(cap, Ecosystem::Go).unwrap_or_default();
            let orms = entries.iter().filter(|e| e.name == "orm").count();
            let drivers = entries
                .iter()
                .filter(|e| e.name.starts_with(driver.as_str()))
                .count();
            assert_eq!(entries.len(), 2, "Database({driver:?}) must have 2 entries");
            assert_eq!(orms, 1, "Database({driver:?}) must have exactly one ORM");
            assert_eq!(drivers, 1, "Database({driver:?}) must have exactly one driver");
        }
    }
}

/// An identifier reached from several capabilities must carry the same
/// category and fallback pin each time; planning keeps whichever it meets
/// first.
fn shared_identifier_conflict(entries: &[CatalogEntry]) -> Option<String> {
    entries.iter().enumerate().find_map(|(i, entry)| {
        entries[i + 1..]
            .iter()
            .filter(|o| {
                o.identifier == entry.identifier
                    && o.capability.ecosystem() == entry.capability.ecosystem()
            })
            .find_map(|other| {
                if other.category != entry.category {
                    Some(format!(
                        "Identifier {} is {} under {} but {} under {}",
                        entry.identifier,
                        entry.category,
                        entry.capability,
                        other.category,
                        other.capability
                    ))
                } else if other.fallback_version != entry.fallback_version {
                    Some(format!(
                        "Identifier {} has conflicting fallback versions",
                        entry.identifier
                    ))
                } else {
                    None
                }
            })
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        assert_catalog_integrity();
    }

    #[test]
    fn postgres_yields_orm_and_driver() {
        let entries = entries_for(Capability::Database(DatabaseDriver::Postgres), Ecosystem::Go)
            .unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.identifier).collect();
        assert_eq!(ids, vec!["gorm.io/gorm", "gorm.io/driver/postgres"]);
    }

    #[test]
    fn wrong_ecosystem_is_unmapped() {
        let err = entries_for(Capability::Vue, Ecosystem::Go).unwrap_err();
        assert!(matches!(err, DomainError::UnmappedCapability(_)));
    }

    #[test]
    fn tailwind_is_dev_only() {
        let entries =
            entries_for(Capability::Css(CssFramework::Tailwind), Ecosystem::Node).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.category == Category::Development));
    }

    #[test]
    fn bootstrap_ships_to_production() {
        let entries =
            entries_for(Capability::Css(CssFramework::Bootstrap), Ecosystem::Node).unwrap();
        assert!(entries.iter().all(|e| e.category == Category::Production));
    }

    #[test]
    fn shared_identifier_must_keep_its_category() {
        let rate = go(
            Capability::RateLimiting,
            "redis",
            "github.com/go-redis/redis/v8",
            Category::Production,
            Purpose::RateLimit,
            None,
            "8.11.5",
        );
        let mut cache = rate;
        cache.capability = Capability::Cache(CacheBackend::Redis);
        assert_eq!(shared_identifier_conflict(&[rate, cache]), None);

        cache.category = Category::Development;
        let conflict = shared_identifier_conflict(&[rate, cache]).unwrap();
        assert!(conflict.contains("github.com/go-redis/redis/v8"));

        cache.category = Category::Production;
        cache.fallback_version = "9.0.0";
        assert!(shared_identifier_conflict(&[rate, cache]).is_some());
    }

    #[test]
    fn redis_is_shared_between_families() {
        let rate = entries_for(Capability::RateLimiting, Ecosystem::Go).unwrap();
        let cache = entries_for(Capability::Cache(CacheBackend::Redis), Ecosystem::Go).unwrap();
        assert!(rate.iter().any(|e| e.identifier == "github.com/go-redis/redis/v8"));
        assert!(cache.iter().any(|e| e.identifier == "github.com/go-redis/redis/v8"));
    }

    #[test]
    fn find_by_identifier_respects_ecosystem() {
        assert!(find_by_identifier(Ecosystem::Node, "vue").is_some());
        assert!(find_by_identifier(Ecosystem::Go, "vue").is_none());
        assert_eq!(
            find_by_identifier(Ecosystem::Go, "github.com/gin-gonic/gin")
                .map(|e| e.fallback_version),
            Some("1.9.1")
        );
    }

    #[test]
    fn capability_keys_are_unique() {
        let mut keys: Vec<_> = Capability::ALL.iter().map(|c| c.key()).collect();
        keys.sort();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
    }
}
