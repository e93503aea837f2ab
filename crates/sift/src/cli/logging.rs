//! Logging setup for the `sift` binary.

use std::io;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initializes tracing on stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level follows the `-v` count.
pub fn init(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}
