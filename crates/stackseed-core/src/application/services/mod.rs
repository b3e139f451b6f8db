//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports: look versions up,
//! resolve a configuration, mutate the manifest, and run a whole generation.

pub mod generation_service;
pub mod manifest_mutator;
pub mod registry_client;
pub mod resolver_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use generation_service::{GenerationOptions, GenerationReport, GenerationService, StepOutcome};
pub use manifest_mutator::ManifestMutator;
pub use registry_client::RegistryClient;
pub use resolver_service::ResolverService;
