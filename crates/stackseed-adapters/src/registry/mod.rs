//! Registry sources: one `VersionSource` per upstream index.
//!
//! | Ecosystem | Primary          | Secondary        |
//! |-----------|------------------|------------------|
//! | Go        | GitHub releases  | Go module proxy  |
//! | Node      | npm `/latest`    | npm packument    |
//!
//! The Go toolchain index feeds the `go` directive of synthesized manifests.

mod github;
mod go_proxy;
mod go_toolchain;
mod npm;
mod offline;

pub use github::{GithubReleases, check_major, module_major};
pub use go_proxy::{GoProxy, escape_module_path, parse_version_list};
pub use go_toolchain::{GoRelease, GoToolchain, stable_versions};
pub use npm::{NpmLatest, NpmVersions, Packument, encode_package_name};
pub use offline::Offline;

use stackseed_core::{
    application::{RegistryClient, ports::VersionSource},
    domain::Ecosystem,
};

use crate::http::HttpClient;

/// Base URLs of every upstream index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoints {
    pub github_api: String,
    pub go_proxy: String,
    pub npm_registry: String,
    pub go_toolchain_index: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            github_api: "https://api.github.com".into(),
            go_proxy: "https://proxy.golang.org".into(),
            npm_registry: "https://registry.npmjs.org".into(),
            go_toolchain_index: "https://go.dev/dl/?mode=json".into(),
        }
    }
}

/// Build the two-tier registry client for one ecosystem.
///
/// With `offline`, both tiers always fail and every catalog entry resolves
/// to its built-in default.
pub fn registry_client(
    ecosystem: Ecosystem,
    offline: bool,
    endpoints: &RegistryEndpoints,
    http: &HttpClient,
) -> RegistryClient {
    if offline {
        return RegistryClient::new(Box::new(Offline), Box::new(Offline));
    }

    match ecosystem {
        Ecosystem::Go => RegistryClient::new(
            Box::new(GithubReleases::new(http.clone(), &endpoints.github_api)),
            Box::new(GoProxy::new(http.clone(), &endpoints.go_proxy)),
        ),
        Ecosystem::Node => RegistryClient::new(
            Box::new(NpmLatest::new(http.clone(), &endpoints.npm_registry)),
            Box::new(NpmVersions::new(http.clone(), &endpoints.npm_registry)),
        ),
    }
}

/// Source for the Go toolchain version.
pub fn toolchain_source(
    offline: bool,
    endpoints: &RegistryEndpoints,
    http: &HttpClient,
) -> Box<dyn VersionSource> {
    if offline {
        Box::new(Offline)
    } else {
        Box::new(GoToolchain::new(http.clone(), &endpoints.go_toolchain_index))
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
