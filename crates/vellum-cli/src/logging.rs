use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Logs go to stderr so stdout carries only command output. `RUST_LOG`
/// overrides the level chosen by `verbose`.
pub fn init(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
