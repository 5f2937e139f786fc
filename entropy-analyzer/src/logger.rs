// entropy-analyzer/src/logger.rs
//! Logger setup for the CLI.
//!
//! `RUST_LOG` is honored unless the command line forces a level. Log records
//! always go to stderr so stdout only carries scores and reports.
//! License: MIT OR APACHE 2.0

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger once. Later calls are ignored.
///
/// * `level_override` - `Some(level)` replaces whatever `RUST_LOG` asks for.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}
