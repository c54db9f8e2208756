//! Logger initialisation for the `tabmask` binary and its tests.
//!
//! `RUST_LOG` is honoured; an explicit level from the command line overrides it.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Initialises `env_logger`. Safe to call more than once; later calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(true);
    let _ = builder.try_init();
}
