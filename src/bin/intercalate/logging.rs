use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log to stderr, at `warn` for no `-v` flag and one level more per flag.
///
/// A `RUST_LOG` filter takes precedence over the flags.
pub fn init(verbosity: u8) {
    let level = [Level::WARN, Level::INFO, Level::DEBUG]
        .get(usize::from(verbosity))
        .copied()
        .unwrap_or(Level::TRACE);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("intercalate={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .init();
}
