//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when nothing is configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Build the filter for a configured level.
///
/// A bare level (`debug`) applies to this crate and the HTTP trace layer.
/// Anything containing `=` or `,` is used as a full `EnvFilter` directive.
pub fn filter_for(level: &str) -> EnvFilter {
    let level = level.trim();
    let directive = if level.contains('=') || level.contains(',') {
        level.to_string()
    } else if level.is_empty() {
        format!("maze_server={DEFAULT_LEVEL},tower_http={DEFAULT_LEVEL}")
    } else {
        format!("maze_server={level},tower_http={level}")
    };

    EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        EnvFilter::new(format!("maze_server={DEFAULT_LEVEL},tower_http={DEFAULT_LEVEL}"))
    })
}

/// Initialize the logging system.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}
