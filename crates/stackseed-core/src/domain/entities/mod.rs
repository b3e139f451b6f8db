pub mod configuration;
pub mod dependency;
pub mod settings;

pub use configuration::{BackendConfig, Configuration, FrontendConfig};
pub use dependency::{Dependency, DependencyState, PackageLocator};
pub use settings::{BackendSettings, FrontendSettings, Normalized, ProjectSettings};
