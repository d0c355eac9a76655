use tracing_subscriber::EnvFilter;

/// Structured JSON logging for CloudWatch.
///
/// Honours `RUST_LOG`; defaults to `info` when it is unset or invalid.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .without_time()
        .with_current_span(false)
        .init();
}
