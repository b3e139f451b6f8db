//! Child-process adapters.

mod scripted;
mod system;

pub use scripted::ScriptedRunner;
pub use system::SystemRunner;
