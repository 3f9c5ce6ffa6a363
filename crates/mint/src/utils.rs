use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initializes a tracing subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` only warnings and errors are shown.
pub fn subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Enables colors when the terminal supports them.
pub fn enable_paint() {
    let enable = yansi::Condition::os_support() && yansi::Condition::tty_and_color_live();
    yansi::whenever(yansi::Condition::cached(enable));
}
