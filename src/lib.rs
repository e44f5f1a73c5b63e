//! Core library for the `reqprobe` CLI.
//!
//! A run sends a fixed number of HTTP requests through a pool of concurrent
//! workers. Requests are built from templates filled by an optional
//! pre-request script; every outcome is streamed to the console and an
//! optional NDJSON log, then summarised on the console and in an optional
//! Markdown report.
pub mod app;
pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod script;

mod entry;
mod logger;

pub use entry::run;
pub use logger::init_logging;
