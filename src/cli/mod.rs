//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each drives a [`Console`] and
//! returns the text to print.
//!
//! [`Console`]: crate::console::Console

mod list;
mod post;
mod render;

pub use list::{ListQuery, OutputFormat, parse_exact_filter, parse_text_filter, run_list};
pub use post::{PostFields, run_create, run_delete, run_show, run_update};
pub use render::{render_json, render_post, render_table};
