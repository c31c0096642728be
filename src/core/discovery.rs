// ChatTally - core/discovery.rs
//
// Locating source directories and the chat-log files inside them.
//
// Layout:
//   <root>/<source>/*.txt
//
// Only immediate children are considered at both levels. Results are sorted
// by path so repeated runs see files in the same order.
//
// This module reads directory entries only, never file contents; the app
// layer (app::loader) owns reading.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Which files inside a source directory count as chat logs.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Filename glob a chat file must match (e.g. `*.txt`).
    pub file_pattern: String,

    /// Exact filenames that are never chat input, even when they match
    /// `file_pattern` (the tool's own outputs).
    pub excluded_names: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            file_pattern: constants::DEFAULT_CHAT_FILE_PATTERN.to_string(),
            excluded_names: constants::OUTPUT_FILES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// List the source directories directly under `root`, sorted by path.
///
/// # Errors
/// `RootNotFound` / `NotADirectory` when `root` is unusable, `Traversal`
/// when the root itself cannot be listed. Unreadable children are skipped
/// with a warning.
pub fn discover_sources(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    check_directory(root)?;

    let mut sources = Vec::new();
    for entry in immediate_children(root)? {
        if entry.file_type().is_dir() {
            sources.push(entry.into_path());
        }
    }
    sources.sort();

    tracing::debug!(
        root = %root.display(),
        sources = sources.len(),
        "Source discovery complete"
    );
    Ok(sources)
}

/// List the chat-log files directly inside `source_dir`, sorted by path.
pub fn discover_chat_files(
    source_dir: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    check_directory(source_dir)?;

    let pattern =
        glob::Pattern::new(&config.file_pattern).map_err(|e| DiscoveryError::InvalidPattern {
            pattern: config.file_pattern.clone(),
            source: e,
        })?;

    let mut files = Vec::new();
    for entry in immediate_children(source_dir)? {
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(
                path = %entry.path().display(),
                "Skipping file with non-UTF-8 name"
            );
            continue;
        };

        if config.excluded_names.iter().any(|excluded| excluded == name) {
            tracing::trace!(file = name, "Skipping generated output file");
            continue;
        }

        if pattern.matches(name) {
            files.push(entry.into_path());
        } else {
            tracing::trace!(file = name, "Not matched by file pattern");
        }
    }
    files.sort();

    tracing::debug!(
        source = %source_dir.display(),
        files = files.len(),
        "Chat file discovery complete"
    );
    Ok(files)
}

// =============================================================================
// Helpers
// =============================================================================

/// Fail fast with a specific error when `path` is missing or not a directory.
fn check_directory(path: &Path) -> Result<(), DiscoveryError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiscoveryError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(_) => Err(DiscoveryError::RootNotFound {
            path: path.to_path_buf(),
        }),
    }
}

/// Entries one level below `dir`.
///
/// An error on `dir` itself is returned; errors on individual children are
/// logged and the child is skipped.
fn immediate_children(dir: &Path) -> Result<Vec<walkdir::DirEntry>, DiscoveryError> {
    let walker = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut children = Vec::new();
    for entry_result in walker {
        match entry_result {
            Ok(entry) => children.push(entry),
            Err(e) if e.depth() == 0 => {
                return Err(DiscoveryError::Traversal {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                tracing::warn!(path = %path_str, error = %e, "Cannot access directory entry");
            }
        }
    }
    Ok(children)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_temp_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        let a = root.join("streamer_a");
        fs::create_dir(&a).expect("mkdir streamer_a");
        fs::write(a.join("day2.txt"), "[12:00:00] x: y\n").expect("write day2");
        fs::write(a.join("day1.txt"), "[12:00:00] x: y\n").expect("write day1");
        fs::write(a.join("notes.md"), "not a log\n").expect("write notes");
        fs::write(a.join(constants::USER_COUNTS_FILE_NAME), "<li>x: 1 messages</li>\n")
            .expect("write output");
        fs::create_dir(a.join("html")).expect("mkdir html");
        fs::write(a.join("html").join("nested.txt"), "ignored\n").expect("write nested");

        fs::create_dir(root.join("streamer_b")).expect("mkdir streamer_b");
        fs::write(root.join("stray.txt"), "top-level file\n").expect("write stray");

        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_discover_sources_lists_directories_only() {
        let dir = make_temp_tree();
        let sources = discover_sources(dir.path()).unwrap();
        assert_eq!(names(&sources), ["streamer_a", "streamer_b"]);
    }

    #[test]
    fn test_discover_chat_files_sorted_and_filtered() {
        let dir = make_temp_tree();
        let files =
            discover_chat_files(&dir.path().join("streamer_a"), &DiscoveryConfig::default())
                .unwrap();
        assert_eq!(names(&files), ["day1.txt", "day2.txt"]);
    }

    #[test]
    fn test_discover_chat_files_empty_source() {
        let dir = make_temp_tree();
        let files =
            discover_chat_files(&dir.path().join("streamer_b"), &DiscoveryConfig::default())
                .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_custom_pattern() {
        let dir = make_temp_tree();
        let config = DiscoveryConfig {
            file_pattern: "*.md".to_string(),
            ..Default::default()
        };
        let files = discover_chat_files(&dir.path().join("streamer_a"), &config).unwrap();
        assert_eq!(names(&files), ["notes.md"]);
    }

    #[test]
    fn test_wildcard_pattern_skips_every_output_file() {
        let dir = make_temp_tree();
        let source = dir.path().join("streamer_a");
        fs::write(source.join(constants::CHART_FILE_NAME), "<html></html>\n").expect("chart");
        fs::write(source.join(constants::EMOTE_USAGE_FILE_NAME), "x: 0\n").expect("emotes");
        fs::write(source.join(constants::SUMMARY_FILE_NAME), "{}\n").expect("summary");

        let config = DiscoveryConfig {
            file_pattern: "*".to_string(),
            ..Default::default()
        };
        let files = discover_chat_files(&source, &config).unwrap();
        assert_eq!(names(&files), ["day1.txt", "day2.txt", "notes.md"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = make_temp_tree();
        let config = DiscoveryConfig {
            file_pattern: "[".to_string(),
            ..Default::default()
        };
        let result = discover_chat_files(&dir.path().join("streamer_a"), &config);
        assert!(
            matches!(result, Err(DiscoveryError::InvalidPattern { .. })),
            "expected InvalidPattern, got {result:?}"
        );
    }

    #[test]
    fn test_root_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = discover_sources(&dir.path().join("missing"));
        assert!(
            matches!(result, Err(DiscoveryError::RootNotFound { .. })),
            "expected RootNotFound, got {result:?}"
        );
    }

    #[test]
    fn test_root_not_a_directory() {
        let dir = make_temp_tree();
        let result = discover_sources(&dir.path().join("stray.txt"));
        assert!(
            matches!(result, Err(DiscoveryError::NotADirectory { .. })),
            "expected NotADirectory, got {result:?}"
        );
    }
}
