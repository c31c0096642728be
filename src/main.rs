// ChatTally - main.rs
//
// Application entry point. Takes no command-line arguments:
// 1. Configuration loading (chattally.toml, optional)
// 2. Logging initialisation
// 3. One pipeline run over every source directory

use chattally::app::pipeline::{self, PipelineConfig};
use chattally::app::postprocess::NoopPostProcessor;
use chattally::platform::config;
use chattally::util::{self, constants};

fn main() {
    // Config is read before logging so its level can take effect; warnings
    // are replayed once the subscriber exists.
    let config_path = config::resolve_config_path();
    let (app_config, config_warnings) = config::load_config(config_path.as_deref());

    util::logging::init(app_config.log_level.as_deref());

    let config_source = config_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<defaults>".to_string());
    tracing::info!(
        version = constants::APP_VERSION,
        config = %config_source,
        "ChatTally starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    let pipeline_config = PipelineConfig::from(&app_config);
    tracing::debug!(
        root = %pipeline_config.sources_root.display(),
        top_user_count = pipeline_config.top_user_count,
        emotes = pipeline_config.emotes.len(),
        trace_users = pipeline_config.trace_usernames.len(),
        "Pipeline configured"
    );

    pipeline::run(&pipeline_config, &NoopPostProcessor);
}
