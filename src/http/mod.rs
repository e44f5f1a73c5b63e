//! Request building and execution: templating, body encoding, the shared
//! client, and the per-request executor.
mod body;
mod client;
mod executor;
mod template;


pub use body::{EncodedBody, encode_body};
pub use client::build_client;
pub use executor::RequestExecutor;
pub use template::{render_map, render_template};
