//! Console output and the Markdown run report.
mod console;
mod markdown;


pub use console::{format_outcome_line, format_summary, print_outcome_line, print_summary};
pub use markdown::{render_report, write_report};
