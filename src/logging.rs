//! Structured logging setup, gated by `GITNANO_LOG` (defaults to
//! `warn` so a normal CLI run stays quiet).

const LOG_VAR: &str = "GITNANO_LOG";

/// Installs the global tracing subscriber. Safe to call more than once per
/// process (later calls are no-ops); call once from `main`.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
