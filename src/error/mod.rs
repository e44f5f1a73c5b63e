mod app;
mod body;
mod config;
mod http;
mod script;
mod sink;
mod validation;

pub use app::{AppError, AppResult};
pub use body::BodyError;
pub use config::ConfigError;
pub use http::HttpError;
pub use script::ScriptError;
pub use sink::SinkError;
pub use validation::ValidationError;
