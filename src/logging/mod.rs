// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logging setup shared by the library and the `hipache-render` binary.
//!
//! Everything goes through the `log` facade; [`init`] installs
//! `env_logger` as the backend, honouring `RUST_LOG`.

pub mod wrapper;

use log::{LevelFilter, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Trace => "trace",
        LevelFilter::Debug => "debug",
        LevelFilter::Info => "info",
        LevelFilter::Warn => "warn",
        LevelFilter::Error => "error",
        LevelFilter::Off => "off",
    }
}

/// Initialize logging with the specified level.
///
/// Only the first call has any effect. `RUST_LOG` wins over `level`.
pub fn init(level: Option<LevelFilter>) {
    INIT.call_once(|| {
        let env = env_logger::Env::default()
            .filter_or("RUST_LOG", level.map_or("info", level_name));

        // try_init: a test harness may already have installed a logger
        let installed = env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .format_target(true)
            .try_init()
            .is_ok();

        if installed {
            info!("Logging initialized at level: {}", log::max_level());
        }
    });
}

/// Log an error with context and return the error.
///
/// This is useful for logging errors in a chain of Results.
pub fn log_error<E: std::fmt::Display>(context: &str, err: E) -> E {
    error!("[{}] {}", context, err);
    err
}

/// Log an info message with context.
pub fn log_info<M: std::fmt::Display>(context: &str, msg: M) {
    info!("[{}] {}", context, msg);
}
