use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn make_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` (or `debug` with `--verbose`).
/// * Writes to stderr so command output on stdout stays clean.
/// * Strips timestamps and target names to keep CLI output readable.
pub fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(make_filter(verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
