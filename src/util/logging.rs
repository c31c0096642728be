// ChatTally - util/logging.rs
//
// Structured logging with a runtime-selectable level.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - Config file: [logging] level = "debug"
//
// Output: stderr. Chat message bodies are never logged above debug level.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `config_level` is the level from chattally.toml (if present and valid).
///
/// Priority: RUST_LOG env var > config level > default "info".
pub fn init(config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    // try_init: a second call (e.g. from an integration test harness) keeps
    // the first subscriber instead of panicking.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .try_init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
