use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. `RUST_LOG` wins over the CLI level so the
/// structured result on stdout stays clean either way.
pub fn init_logger(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
