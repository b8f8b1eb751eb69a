//! Shared test setup: log capture, logged assertions and fixtures.
//!
//! The library logs through the `log` facade; `tracing-subscriber` installs
//! its `log` bridge on `try_init`, so quantization and parse diagnostics show
//! up in captured test output.
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=chat_text::color=trace` - Trace quantization cache misses

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Route `log` and `tracing` output to the test writer. Safe to call more
/// than once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("chat_text=debug"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_test_writer().with_target(true).compact())
            .try_init()
            .ok();
    });
}
