use tracing_subscriber::EnvFilter;

/// Console logging for the binaries. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(false)
        .with_file(false)
        .with_writer(std::io::stdout)
        .init();
}
