//! Configuration loading, CLI overlay, and validated run parameters.
mod apply;
mod loader;
mod run;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use run::{BodySpec, RunConfig, ScriptSource};

pub(crate) use loader::load_config_file;
