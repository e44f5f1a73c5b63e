//! Pre-request script bridge.
//!
//! The script runs once before dispatch. Whatever it stored through
//! `env.set` becomes a read-only [`VariableSnapshot`] shared by all workers.

mod engine;
mod hash;
mod vars;


use std::borrow::Cow;

use serde_json::Value;

use crate::config::ScriptSource;
use crate::error::ScriptError;

pub use engine::QuickJs;
pub use vars::{VariableSnapshot, VariableStore, value_to_text};

/// An engine able to evaluate script source against a variable store.
pub trait ScriptEngine {
    /// Runs `source`, recording variables into `env`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScriptError`] when the source throws (syntax errors
    /// included) or exceeds the engine's limits.
    /// Variables set before the failure remain in `env`.
    fn execute(&mut self, source: &str, env: &mut VariableStore) -> Result<(), ScriptError>;
}

/// Owns a script engine and the variables it produces.
#[derive(Debug)]
pub struct ScriptBridge<E = QuickJs> {
    engine: E,
    vars: VariableStore,
}

impl ScriptBridge<QuickJs> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(QuickJs::new())
    }
}

impl Default for ScriptBridge<QuickJs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ScriptEngine> ScriptBridge<E> {
    pub const fn with_engine(engine: E) -> Self {
        Self {
            engine,
            vars: VariableStore::new(),
        }
    }

    /// Executes `source`. An empty or whitespace-only source is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the engine's [`ScriptError`].
    pub fn execute(&mut self, source: &str) -> Result<(), ScriptError> {
        if source.trim().is_empty() {
            return Ok(());
        }
        self.engine.execute(source, &mut self.vars)
    }

    #[must_use]
    pub const fn get_vars(&self) -> &VariableStore {
        &self.vars
    }

    #[must_use]
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Runs the configured script (if any) and freezes the resulting
    /// variables. Failures are logged and never abort the run; variables set
    /// before a failure are kept.
    pub fn run_once(mut self, source: Option<&ScriptSource>) -> VariableSnapshot {
        if let Some(source) = source {
            match load_source(source) {
                Ok(code) => {
                    if let Err(err) = self.execute(&code) {
                        tracing::error!("Pre-request script failed: {}", err);
                    }
                }
                Err(err) => tracing::error!("Failed to load pre-request script: {}", err),
            }
        }
        tracing::info!("Pre-request script produced {} variable(s)", self.vars.len());
        self.vars.into_snapshot()
    }
}

fn load_source(source: &ScriptSource) -> Result<Cow<'_, str>, ScriptError> {
    match source {
        ScriptSource::Inline(code) => Ok(Cow::Borrowed(code)),
        ScriptSource::File(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| ScriptError::ReadScript {
                path: path.clone(),
                source,
            }),
    }
}
