//! Concertina - accordion tiling with a leader key.
//!
//! The binary is the CLI. Logs go to stderr, filtered by `RUST_LOG`
//! (default `concertina=info`); command output goes to stdout.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "concertina=info";

fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry().with(filter).with(stderr_layer).init();
}

fn main() {
    setup_tracing();

    if let Err(err) = concertina_lib::cli::run() {
        eprintln!("concertina: {err}");
        std::process::exit(1);
    }
}
