//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    // JSON logs + timestamps, configurable via RUST_LOG. Logs go to stderr so
    // reports printed on stdout stay machine-readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize compact text logs on stderr.
pub fn init_pretty() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_init_is_a_no_op() {
        super::init();
        super::init();
        super::init_pretty();
    }
}
