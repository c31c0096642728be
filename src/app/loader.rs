// ChatTally - app/loader.rs
//
// Reads chat-log files and turns them into one ordered ChatLog.
//
// A file that cannot be read (missing, permission denied, not UTF-8) is
// logged and contributes zero records; the remaining files still load.

use crate::core::model::{ChatLog, ParseStats};
use crate::core::parser;
use crate::platform::fs;
use std::path::PathBuf;

/// Records from a set of files plus load/parse bookkeeping.
#[derive(Debug, Default)]
pub struct LoadedLog {
    /// Records in file order, then line order.
    pub records: ChatLog,

    /// Parse statistics summed over all readable files.
    pub stats: ParseStats,

    pub files_loaded: usize,
    pub files_failed: usize,
}

/// Load and parse `paths` in the order given.
pub fn load_chat_log(paths: &[PathBuf]) -> LoadedLog {
    let mut loaded = LoadedLog::default();

    for path in paths {
        let content = match fs::read_file_utf8(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read chat file; skipping");
                loaded.files_failed += 1;
                continue;
            }
        };

        let result = parser::parse_content(&content);
        tracing::debug!(
            file = %path.display(),
            records = result.records.len(),
            lines = result.stats.lines,
            malformed = result.stats.malformed,
            excluded = result.stats.excluded,
            unknown_timestamps = result.stats.unknown_timestamps,
            "Chat file parsed"
        );

        loaded.records.extend(result.records);
        loaded.stats.absorb(result.stats);
        loaded.files_loaded += 1;
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_files_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("b.txt");
        let second = dir.path().join("a.txt");
        std::fs::write(&first, "[10:00:00] one: first file\n").unwrap();
        std::fs::write(&second, "[09:00:00] two: second file\n[09:00:01] two: again\n")
            .unwrap();

        let loaded = load_chat_log(&[first, second]);
        let users: Vec<_> = loaded.records.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(users, ["one", "two", "two"]);
        assert_eq!(loaded.files_loaded, 2);
        assert_eq!(loaded.files_failed, 0);
        assert_eq!(loaded.stats.lines, 3);
    }

    #[test]
    fn test_unreadable_file_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        let missing = dir.path().join("missing.txt");
        std::fs::write(&good, "[10:00:00] alice: hi\n").unwrap();
        std::fs::write(&bad, b"[10:00:00] \xff\xfe: broken\n").unwrap();

        let loaded = load_chat_log(&[bad, missing, good]);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].username, "alice");
        assert_eq!(loaded.files_loaded, 1);
        assert_eq!(loaded.files_failed, 2);
    }

    #[test]
    fn test_duplicate_lines_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.txt");
        std::fs::write(&path, "[10:00:00] a: same\n[10:00:00] a: same\n").unwrap();

        let loaded = load_chat_log(&[path.clone(), path]);
        assert_eq!(loaded.records.len(), 4);
    }
}
