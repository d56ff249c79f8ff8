use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "TAXKIT_LOG";

/// Install the stderr subscriber. Filtered by `TAXKIT_LOG` and off by
/// default so stdout carries only JSON; `verbose` forces `debug`.
pub fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
    };

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
