//! Diagnostic logging
//!
//! Logs go to stderr so stdout carries nothing but records.

use crate::common::utils::{ParseFromEnv, parse_from_env};
use std::borrow::Cow;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `tfr=trace` or `info`
pub const LOG_ENV: &str = "TFR_LOG";

/// Raises the default level to `debug` when `TFR_LOG` is unset
pub const DEBUG_ENV: &str = "DEBUG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter directive from the environment
///
/// An explicit `TFR_LOG` wins over `DEBUG`.
pub fn directive() -> Cow<'static, str> {
    match <&'static str>::parse_from_env(LOG_ENV) {
        Some(directive) => directive,
        None if parse_from_env(DEBUG_ENV, false) => Cow::Borrowed("debug"),
        None => Cow::Borrowed(DEFAULT_DIRECTIVE),
    }
}

/// Install the global subscriber
///
/// Must be called once at program startup; later calls are no-ops.
pub fn init() {
    let directive = directive();
    let filter = EnvFilter::try_new(&*directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(%directive, "logging initialized");
    }
}
