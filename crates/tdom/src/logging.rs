#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! Every tdom crate logs through `tracing`. Applications that do not install
//! their own subscriber can call [`init`]; the filter is read from
//! `TDOM_LOG` using `EnvFilter` syntax and defaults to `warn`:
//!
//! ```sh
//! TDOM_LOG=tdom_harness=debug cargo run
//! ```
//!
//! With the `tracing-json` feature the output is one JSON object per line.

use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TDOM_LOG";

/// Filter used when `TDOM_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter from `TDOM_LOG`, falling back to `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber with the default filter.
pub fn init() -> Result<()> {
    init_with_default(DEFAULT_FILTER)
}

/// Install the global subscriber, using `default` when `TDOM_LOG` is unset.
///
/// Fails if a global subscriber is already installed.
pub fn init_with_default(default: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(default));

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    result.map_err(|err| Error::Logging(err.to_string()))?;
    tracing::debug!(env = LOG_ENV, "log subscriber installed");
    Ok(())
}

/// Subscriber for tests: writes through the test harness capture and
/// ignores the error when another test installed one first.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(env_filter("debug"))
        .try_init();
}
