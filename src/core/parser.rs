// ChatTally - core/parser.rs
//
// Line-oriented chat-log parsing.
// Core layer: accepts file content as a string, never touches the filesystem.
//
// Line shape: `[<timestamp>] <username>: <message>`
//   - timestamp: shortest span up to the first `] `
//   - username:  shortest span up to the first `: `
//   - message:   the rest of the line
//
// Lines that do not have this shape are skipped without being reported.

use crate::core::model::{ChatLog, ChatRecord, ParseStats};
use crate::util::constants;
use chrono::NaiveTime;
use regex::Regex;
use std::sync::OnceLock;

/// What a single line turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A chat message.
    Record(ChatRecord),

    /// The line matched the chat shape but is a gift-sub notification.
    Excluded,

    /// The line does not have the chat shape.
    Malformed,
}

/// Records parsed from one file plus the statistics behind them.
#[derive(Debug, Default)]
pub struct ParseResult {
    pub records: ChatLog,
    pub stats: ParseStats,
}

fn line_pattern() -> &'static Regex {
    static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();
    LINE_PATTERN.get_or_init(|| {
        // Constant pattern; covered by the unit tests below.
        Regex::new(r"^\[(?P<timestamp>.+?)\] (?P<username>.+?): (?P<message>.+)")
            .expect("chat line pattern is valid")
    })
}

/// Parse one line of a chat log.
pub fn parse_line(line: &str) -> LineOutcome {
    let Some(caps) = line_pattern().captures(line) else {
        return LineOutcome::Malformed;
    };

    // All three groups are mandatory in the pattern.
    let (Some(raw_ts), Some(username), Some(message)) = (
        caps.name("timestamp"),
        caps.name("username"),
        caps.name("message"),
    ) else {
        return LineOutcome::Malformed;
    };

    let message = message.as_str();
    if is_gift_sub_notice(message) {
        return LineOutcome::Excluded;
    }

    LineOutcome::Record(ChatRecord {
        timestamp: parse_time_of_day(raw_ts.as_str()),
        username: username.as_str().to_string(),
        message: message.to_string(),
    })
}

/// True when `message` is a gift-sub notification rather than chat.
pub fn is_gift_sub_notice(message: &str) -> bool {
    constants::GIFT_SUB_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Parse a `HH:MM:SS` time of day. Anything else yields `None`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, constants::TIMESTAMP_FORMAT).ok()
}

/// Parse the full content of one chat-log file.
///
/// Records keep line order. Malformed and excluded lines are only counted.
pub fn parse_content(content: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for line in content.lines() {
        result.stats.lines += 1;
        match parse_line(line) {
            LineOutcome::Record(record) => {
                if record.timestamp.is_none() {
                    result.stats.unknown_timestamps += 1;
                }
                result.records.push(record);
            }
            LineOutcome::Excluded => result.stats.excluded += 1,
            LineOutcome::Malformed => {
                result.stats.malformed += 1;
                tracing::trace!(
                    line = %preview(line),
                    "Line does not have the chat shape"
                );
            }
        }
    }

    result
}

/// Truncate `line` for trace output on a char boundary.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

// =============================================================================
// Tests
// =============================================================================
