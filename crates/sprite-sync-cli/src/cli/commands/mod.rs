//! CLI command handlers, one per file.

mod config_path;
mod discover;
mod status;
mod sync;

pub use config_path::run_config_path;
pub use discover::run_discover;
pub use status::run_status;
pub use sync::run_sync;
