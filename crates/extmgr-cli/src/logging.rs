//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when neither `--verbose` nor `RUST_LOG` says otherwise.
const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` is honoured and falls back
/// to `warn`. Stdout stays reserved for command output so `--json` can be
/// piped.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
