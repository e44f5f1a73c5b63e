//! QuickJS-backed engine for pre-request scripts.
//!
//! Every execution gets a fresh runtime. `env.set`, `env.get`, `sha256` and
//! `sha512` are bound from Rust; `Date`, `JSON` and the rest of the language
//! are the engine's own.

use std::cell::RefCell;
use std::rc::Rc;

use rquickjs::convert::Coerced;
use rquickjs::{CatchResultExt, CaughtError, Context, Ctx, Function, Object, Runtime, Value};
use serde_json::Value as JsonValue;

use super::ScriptEngine;
use super::hash::{sha256_hex, sha512_hex};
use super::vars::VariableStore;
use crate::error::ScriptError;

const DEFAULT_STACK_LIMIT: usize = 512 * 1024;
const DEFAULT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

type SharedStore = Rc<RefCell<VariableStore>>;

#[derive(Debug, Clone, Copy)]
pub struct QuickJs {
    stack_limit: usize,
    memory_limit: usize,
}

impl QuickJs {
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limits(DEFAULT_STACK_LIMIT, DEFAULT_MEMORY_LIMIT)
    }

    /// Engine with explicit stack and heap ceilings, in bytes. Exceeding
    /// either raises a script exception instead of aborting the process.
    #[must_use]
    pub const fn with_limits(stack_limit: usize, memory_limit: usize) -> Self {
        Self {
            stack_limit,
            memory_limit,
        }
    }
}

impl Default for QuickJs {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngine for QuickJs {
    fn execute(&mut self, source: &str, env: &mut VariableStore) -> Result<(), ScriptError> {
        let runtime = Runtime::new().map_err(|err| engine_error(&err))?;
        runtime.set_max_stack_size(self.stack_limit);
        runtime.set_memory_limit(self.memory_limit);
        let context = Context::full(&runtime).map_err(|err| engine_error(&err))?;

        let store: SharedStore = Rc::new(RefCell::new(std::mem::take(env)));
        let result = context.with(|ctx| {
            install_globals(&ctx, &store).map_err(|err| engine_error(&err))?;
            ctx.eval::<Value, _>(source)
                .catch(&ctx)
                .map(drop)
                .map_err(|err| ScriptError::Exception {
                    message: describe(&err),
                })
        });
        drop(context);
        runtime.run_gc();

        // Variables stored before a failure are kept.
        *env = store.take();
        result
    }
}

fn install_globals<'js>(ctx: &Ctx<'js>, store: &SharedStore) -> rquickjs::Result<()> {
    let env = Object::new(ctx.clone())?;

    let setter = Rc::clone(store);
    env.set(
        "set",
        Function::new(
            ctx.clone(),
            move |ctx: Ctx<'js>, name: Coerced<String>, value: Value<'js>| -> rquickjs::Result<()> {
                let value = to_json(&ctx, value)?;
                setter.borrow_mut().set(name.0, value);
                Ok(())
            },
        )?,
    )?;

    let getter = Rc::clone(store);
    env.set(
        "get",
        Function::new(
            ctx.clone(),
            move |ctx: Ctx<'js>, name: Coerced<String>| -> rquickjs::Result<Value<'js>> {
                let stored = getter.borrow().get(&name.0).cloned();
                match stored {
                    Some(value) => from_json(&ctx, &value),
                    None => Ok(Value::new_undefined(ctx)),
                }
            },
        )?,
    )?;

    let globals = ctx.globals();
    globals.set("env", env)?;
    globals.set(
        "sha256",
        Function::new(ctx.clone(), |data: Coerced<String>| {
            sha256_hex(data.0.as_bytes())
        })?,
    )?;
    globals.set(
        "sha512",
        Function::new(ctx.clone(), |data: Coerced<String>| {
            sha512_hex(data.0.as_bytes())
        })?,
    )?;
    Ok(())
}

/// Converts a script value through the engine's `JSON.stringify`.
/// `undefined` and functions become `null`.
fn to_json<'js>(ctx: &Ctx<'js>, value: Value<'js>) -> rquickjs::Result<JsonValue> {
    let json: Object = ctx.globals().get("JSON")?;
    let stringify: Function = json.get("stringify")?;
    let text: Option<String> = stringify.call((value,))?;
    Ok(text.map_or(JsonValue::Null, |text| {
        serde_json::from_str(&text).unwrap_or_else(|_invalid| JsonValue::String(text))
    }))
}

fn from_json<'js>(ctx: &Ctx<'js>, value: &JsonValue) -> rquickjs::Result<Value<'js>> {
    let json: Object = ctx.globals().get("JSON")?;
    let parse: Function = json.get("parse")?;
    parse.call((value.to_string(),))
}

fn describe(error: &CaughtError<'_>) -> String {
    match error {
        CaughtError::Exception(exception) => {
            let name = exception
                .as_object()
                .get::<_, Option<String>>("name")
                .ok()
                .flatten()
                .unwrap_or_else(|| "Error".to_owned());
            let message = exception.message().unwrap_or_default();
            format!("{}: {}", name, message)
        }
        CaughtError::Value(value) => match value.as_string().and_then(|text| text.to_string().ok())
        {
            Some(text) => format!("Uncaught {}", text),
            None => format!("Uncaught {:?}", value),
        },
        CaughtError::Error(err) => err.to_string(),
    }
}

fn engine_error(err: &rquickjs::Error) -> ScriptError {
    ScriptError::Engine {
        message: err.to_string(),
    }
}
