use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: warnings only, the console
/// report covers normal progress.
const DEFAULT_FILTER: &str = "discrip=warn";

/// Install the global subscriber, writing to stderr.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
