//! Subcommand handlers.
//!
//! Each handler translates arguments into core calls and prints the
//! result. Adapter construction lives in [`engine`], settings assembly in
//! [`project`].

pub mod completions;
pub mod config;
pub mod deps;
pub mod generate;
pub mod manifest;
pub mod resolve;

mod engine;
mod project;

use stackseed_core::domain::Dependency;

/// One row of a dependency table.
fn dependency_row(dep: &Dependency) -> String {
    format!(
        "  {:<44} {:<14} {:<12} {}",
        dep.identifier,
        dep.version_or_latest(),
        dep.category,
        dep.origin.map_or_else(|| "-".to_string(), |o| o.to_string()),
    )
}
