//! CLI command handlers, one file per command.

mod cache;
mod checksum;
mod completions;
mod fetch;

pub use cache::run_cache;
pub use checksum::run_checksum;
pub use completions::{run_completions, run_man};
pub use fetch::{run_fetch, FetchArgs};
