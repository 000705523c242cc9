use tracing_subscriber::EnvFilter;

/// Sets up the global tracing subscriber shared by all binaries.
///
/// `RUST_LOG` wins when set; otherwise the caller-provided fallback filter
/// applies. Formatting is compact without targets, matching the CLI output
/// conventions.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
