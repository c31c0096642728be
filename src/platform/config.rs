// ChatTally - platform/config.rs
//
// chattally.toml resolution, loading and startup validation.
//
// Lookup order: ./chattally.toml, then the platform config directory
// (XDG on Linux, AppData on Windows, Library on macOS via `directories`).
// A missing file is not an error; every setting has a default.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

// =============================================================================
// Path resolution
// =============================================================================

/// Platform configuration directory, if one can be determined.
pub fn platform_config_dir() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", constants::APP_ID)?;
    Some(dirs.config_dir().to_path_buf())
}

/// Locate the config file: working directory first, then the platform
/// config directory. `None` when neither exists.
pub fn resolve_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(constants::CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let platform = platform_config_dir()?.join(constants::CONFIG_FILE_NAME);
    if platform.is_file() {
        return Some(platform);
    }

    tracing::debug!(
        platform = %platform.display(),
        "No config file found; using defaults"
    );
    None
}

// =============================================================================
// Raw file shape
// =============================================================================

/// Raw deserialisable shape of chattally.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[sources]` section.
    pub sources: SourcesSection,
    /// `[report]` section.
    pub report: ReportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[sources]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourcesSection {
    /// Directory whose immediate subdirectories are the sources.
    pub root: Option<String>,
    /// Filename glob for chat-log files.
    pub file_pattern: Option<String>,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Number of users drawn in the chart.
    pub top_user_count: Option<i64>,
    /// Users whose final counts are echoed to the log.
    pub trace_usernames: Option<Vec<String>>,
    /// Emote tokens to count.
    pub emotes: Option<Vec<String>>,
    /// Whether summary.json is written.
    pub write_summary_json: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated config
// =============================================================================

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Sources --
    pub sources_root: PathBuf,
    pub file_pattern: String,

    // -- Report --
    pub top_user_count: usize,
    pub trace_usernames: Vec<String>,
    pub emotes: Vec<String>,
    pub write_summary_json: bool,

    // -- Logging --
    /// Logging level string (consumed before tracing is initialised).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources_root: PathBuf::from(constants::DEFAULT_SOURCES_ROOT),
            file_pattern: constants::DEFAULT_CHAT_FILE_PATTERN.to_string(),
            top_user_count: constants::DEFAULT_TOP_USER_COUNT,
            trace_usernames: Vec::new(),
            emotes: constants::DEFAULT_EMOTES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            write_summary_json: true,
            log_level: None,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load and validate the config file at `path`.
///
/// `None` (no file found) returns defaults with no warnings. An unreadable
/// or unparseable file returns defaults with one warning. Individual invalid
/// values fall back to their defaults, each with its own warning.
///
/// Runs before logging is initialised, so warnings are returned for the
/// caller to emit rather than logged here.
pub fn load_config(path: Option<&Path>) -> (AppConfig, Vec<String>) {
    let Some(path) = path else {
        return (AppConfig::default(), Vec::new());
    };

    match read_raw_config(path) {
        Ok(raw) => validate(raw),
        Err(e) => (
            AppConfig::default(),
            vec![format!("{e}. Using defaults.")],
        ),
    }
}

/// Read and parse a config file without validating values.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let size = std::fs::metadata(path)
        .map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate each field, accumulating a warning per rejected value.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Sources: root --
    if let Some(root) = raw.sources.root {
        if root.trim().is_empty() {
            warnings.push(out_of_range(
                "sources.root",
                &root,
                format!(
                    "a non-empty path. Using default ({})",
                    constants::DEFAULT_SOURCES_ROOT
                ),
            ));
        } else {
            config.sources_root = PathBuf::from(root);
        }
    }

    // -- Sources: file_pattern --
    if let Some(pattern) = raw.sources.file_pattern {
        match glob::Pattern::new(&pattern) {
            Ok(_) if !pattern.is_empty() => config.file_pattern = pattern,
            _ => warnings.push(out_of_range(
                "sources.file_pattern",
                &pattern,
                format!(
                    "a valid filename glob. Using default ({})",
                    constants::DEFAULT_CHAT_FILE_PATTERN
                ),
            )),
        }
    }

    // -- Report: top_user_count --
    if let Some(count) = raw.report.top_user_count {
        let bounds = constants::MIN_TOP_USER_COUNT..=constants::MAX_TOP_USER_COUNT;
        let accepted = usize::try_from(count).ok().filter(|c| bounds.contains(c));
        match accepted {
            Some(c) => config.top_user_count = c,
            None => warnings.push(out_of_range(
                "report.top_user_count",
                &count.to_string(),
                format!(
                    "{}-{}. Using default ({})",
                    constants::MIN_TOP_USER_COUNT,
                    constants::MAX_TOP_USER_COUNT,
                    constants::DEFAULT_TOP_USER_COUNT
                ),
            )),
        }
    }

    // -- Report: trace_usernames --
    if let Some(names) = raw.report.trace_usernames {
        let before = names.len();
        config.trace_usernames = names
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .collect();
        if config.trace_usernames.len() != before {
            warnings.push("[report] trace_usernames: ignored empty entries.".to_string());
        }
    }

    // -- Report: emotes --
    if let Some(emotes) = raw.report.emotes {
        if emotes.len() > constants::MAX_EMOTES {
            warnings.push(out_of_range(
                "report.emotes",
                &format!("{} tokens", emotes.len()),
                format!("at most {}. Using defaults", constants::MAX_EMOTES),
            ));
        } else {
            let mut kept: Vec<String> = Vec::with_capacity(emotes.len());
            for token in emotes {
                if token.is_empty() {
                    warnings.push("[report] emotes: ignored empty token.".to_string());
                } else if kept.contains(&token) {
                    warnings.push(format!("[report] emotes: ignored duplicate token '{token}'."));
                } else {
                    kept.push(token);
                }
            }
            config.emotes = kept;
        }
    }

    // -- Report: write_summary_json --
    if let Some(write_json) = raw.report.write_summary_json {
        config.write_summary_json = write_json;
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(out_of_range(
                "logging.level",
                &level,
                format!(
                    "one of {}. Using default ({})",
                    constants::VALID_LOG_LEVELS.join(", "),
                    constants::DEFAULT_LOG_LEVEL
                ),
            ));
        }
    }

    (config, warnings)
}

fn out_of_range(field: &str, value: &str, expected: String) -> String {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
    .to_string()
}

// =============================================================================
// Tests
// =============================================================================
