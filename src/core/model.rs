// ChatTally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies. These types are the shared vocabulary across all layers.

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Chat records
// =============================================================================

/// One parsed chat line.
///
/// Immutable once built by the parser; everything downstream reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    /// Time of day from the bracketed prefix. `None` when the prefix is not
    /// a valid `HH:MM:SS` time; the record is still kept and counted.
    pub timestamp: Option<NaiveTime>,

    /// Username exactly as written in the line (case preserved).
    pub username: String,

    /// Message text, verbatim, without the line terminator.
    pub message: String,
}

/// Ordered chat records: file order, then line order within a file.
/// Duplicate lines are kept.
pub type ChatLog = Vec<ChatRecord>;

// =============================================================================
// User counts
// =============================================================================

/// Message tally for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTally {
    /// Lowercased username; the identity used for counting.
    pub key: String,

    /// Casing of the user's first message, used for display.
    pub display_name: String,

    /// Number of messages counted for this user.
    pub count: usize,
}

/// Per-user message counts keyed case-insensitively.
///
/// Tallies are held in first-seen order so every consumer that needs a
/// deterministic tie order (ranking, grouping) gets the same one.
#[derive(Debug, Clone, Default)]
pub struct UserCounts {
    tallies: Vec<UserTally>,
    index: HashMap<String, usize>,
}

impl UserCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one message from `username`.
    pub fn record(&mut self, username: &str) {
        let key = username.to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => self.tallies[slot].count += 1,
            None => {
                self.index.insert(key.clone(), self.tallies.len());
                self.tallies.push(UserTally {
                    key,
                    display_name: username.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Message count for `username` (any casing). Unknown users count 0.
    pub fn get(&self, username: &str) -> usize {
        self.index
            .get(&username.to_lowercase())
            .map(|&slot| self.tallies[slot].count)
            .unwrap_or(0)
    }

    /// Tallies in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &UserTally> {
        self.tallies.iter()
    }

    /// Number of distinct participants.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Sum of all counts; equals the number of records tallied.
    pub fn total_messages(&self) -> usize {
        self.tallies.iter().map(|t| t.count).sum()
    }
}

// =============================================================================
// Emote counts
// =============================================================================

/// Occurrence count for one emote token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmoteTally {
    pub token: String,
    pub count: usize,
}

/// One tally per configured emote, including zero counts.
pub type EmoteCounts = Vec<EmoteTally>;

// =============================================================================
// Count groups
// =============================================================================

/// Users that share one message count. Display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountGroup {
    pub count: usize,

    /// Display names in first-seen order.
    pub users: Vec<String>,
}

// =============================================================================
// Summaries
// =============================================================================

/// Per-file parse statistics, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines read from the file.
    pub lines: usize,

    /// Lines that did not have the chat shape.
    pub malformed: usize,

    /// Gift-sub notifications dropped.
    pub excluded: usize,

    /// Records kept with an unknown timestamp.
    pub unknown_timestamps: usize,
}

impl ParseStats {
    /// Fold another file's statistics into this one.
    pub fn absorb(&mut self, other: ParseStats) {
        self.lines += other.lines;
        self.malformed += other.malformed;
        self.excluded += other.excluded;
        self.unknown_timestamps += other.unknown_timestamps;
    }
}

/// Machine-readable aggregate summary for one source directory.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    /// Source directory name (e.g. the streamer's folder).
    pub source: String,

    /// Number of chat files that were read successfully.
    pub files_loaded: usize,

    /// Number of chat files that could not be read.
    pub files_failed: usize,

    pub total_messages: usize,
    pub total_participants: usize,

    /// Records whose timestamp could not be parsed.
    pub unknown_timestamps: usize,

    /// Users drawn in the chart, highest first.
    pub top_users: Vec<UserTally>,

    /// Emote counts, highest first.
    pub emotes: EmoteCounts,
}
