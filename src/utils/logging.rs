use std::str::FromStr;

use tracing::Level;

/// Initialize tracing/logging for the application.
///
/// `default_level` names the maximum level to emit; anything unrecognized
/// falls back to `info`.
pub fn init(default_level: &str) {
    let level = Level::from_str(default_level).unwrap_or(Level::INFO);

    // try_init so tests and libraries can call this multiple times without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
