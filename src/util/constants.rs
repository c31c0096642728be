// ChatTally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ChatTally";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ChatTally";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Source discovery
// =============================================================================

/// Default root directory whose immediate subdirectories are the sources.
pub const DEFAULT_SOURCES_ROOT: &str = "chattrans";

/// Default filename glob for chat-log files inside a source directory.
pub const DEFAULT_CHAT_FILE_PATTERN: &str = "*.txt";

/// Subdirectory created in every source for HTML transcript post-processing.
pub const HTML_DIR_NAME: &str = "html";

// =============================================================================
// Parsing
// =============================================================================

/// chrono format for the bracketed time-of-day prefix (24-hour clock).
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Message substrings that mark gift-sub notifications rather than chat.
/// Matched literally and case-sensitively.
pub const GIFT_SUB_MARKERS: &[&str] = &["gifted a Tier 1 sub to", "is gifting"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Reporting
// =============================================================================

/// Default number of users drawn in the top-users chart.
pub const DEFAULT_TOP_USER_COUNT: usize = 50;

/// Smallest accepted `top_user_count`.
pub const MIN_TOP_USER_COUNT: usize = 1;

/// Hard upper bound on `top_user_count`; wider charts stop being readable.
pub const MAX_TOP_USER_COUNT: usize = 1_000;

/// Headroom factor applied to the tallest bar when sizing the y-axis.
pub const CHART_Y_HEADROOM: f64 = 1.1;

/// Emote tokens counted when the config file does not list its own.
pub const DEFAULT_EMOTES: &[&str] = &[
    "oblivi118WINK",
    "oblivi118Lighter",
    "oblivi118Hands",
    "oblivi118Gun",
    "oblivi118Cozy",
    "oblivi118Cookie",
    "oblivi118Lurking",
    "oblivi118Giggle",
    "oblivi118Sip",
    "oblivi118Pat",
    "oblivi118Sing",
    "oblivi118Heart",
    "oblivi118Blush",
    "oblivi118Huh",
    "oblivi118Lol",
    "oblivi118Hehe",
    "oblivi118What",
    "oblivi118Evil",
    "oblivi118Zzz",
    "oblivi118Tea",
];

/// Maximum number of emote tokens accepted from config.
pub const MAX_EMOTES: usize = 500;

// =============================================================================
// Output file names (written into each source directory)
// =============================================================================

/// Top-users bar chart.
pub const CHART_FILE_NAME: &str = "top_users.html";

/// Grouped per-user message counts plus totals.
pub const USER_COUNTS_FILE_NAME: &str = "user_message_counts.txt";

/// Per-emote occurrence counts.
pub const EMOTE_USAGE_FILE_NAME: &str = "emote_usage.txt";

/// Machine-readable aggregate summary.
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// Every file the tool writes into a source directory. None of them is ever
/// read back in as chat input, whatever the file pattern.
pub const OUTPUT_FILES: &[&str] = &[
    CHART_FILE_NAME,
    USER_COUNTS_FILE_NAME,
    EMOTE_USAGE_FILE_NAME,
    SUMMARY_FILE_NAME,
];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name, looked up in the working directory first.
pub const CONFIG_FILE_NAME: &str = "chattally.toml";

/// Maximum size of the config file in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 256 * 1024; // 256 KB
