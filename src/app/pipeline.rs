// ChatTally - app/pipeline.rs
//
// Per-source orchestration: discover → load → aggregate → write outputs →
// hand the html/ directory to the post-processor.
//
// Sources are processed one after another with no shared state. Nothing here
// is fatal: a missing root, an empty source, an unreadable file or a failed
// output is logged and the run carries on with whatever is left.

use crate::app::loader::{self, LoadedLog};
use crate::app::postprocess::HtmlPostProcessor;
use crate::core::aggregate;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::model::{ChatRecord, CountGroup, EmoteCounts, SourceSummary, UserCounts, UserTally};
use crate::core::rank;
use crate::core::report;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::ReportError;
use std::io::Write;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Everything the pipeline needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory whose immediate subdirectories are the sources.
    pub sources_root: PathBuf,

    /// Which files inside a source are chat logs.
    pub discovery: DiscoveryConfig,

    /// Number of users drawn in the chart.
    pub top_user_count: usize,

    /// Users whose final counts are echoed at info level.
    pub trace_usernames: Vec<String>,

    /// Emote tokens to count.
    pub emotes: Vec<String>,

    /// Write summary.json next to the text reports.
    pub write_summary_json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            sources_root: config.sources_root.clone(),
            discovery: DiscoveryConfig {
                file_pattern: config.file_pattern.clone(),
                ..DiscoveryConfig::default()
            },
            top_user_count: config.top_user_count,
            trace_usernames: config.trace_usernames.clone(),
            emotes: config.emotes.clone(),
            write_summary_json: config.write_summary_json,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Aggregates computed from one ChatLog.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub user_counts: UserCounts,
    pub top_users: Vec<UserTally>,
    pub groups: Vec<CountGroup>,
    pub emotes: EmoteCounts,
}

/// What happened to one source directory.
#[derive(Debug)]
pub enum SourceOutcome {
    /// No chat files: nothing was written.
    NoChatFiles,

    /// The source directory could not be listed.
    Unreadable,

    /// Outputs were attempted.
    Processed(SourceReport),
}

/// Result of processing a source with chat files.
#[derive(Debug)]
pub struct SourceReport {
    pub summary: SourceSummary,

    /// Outputs written successfully.
    pub written: Vec<PathBuf>,

    /// Outputs that failed (each already logged).
    pub failed: Vec<PathBuf>,
}

/// Totals for a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub sources_found: usize,
    pub sources_processed: usize,
    pub sources_skipped: usize,
}

// =============================================================================
// Run
// =============================================================================

/// Process every source directory under `config.sources_root`.
pub fn run(config: &PipelineConfig, post_processor: &dyn HtmlPostProcessor) -> RunSummary {
    let root = &config.sources_root;
    let sources = match discovery::discover_sources(root) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "No source directories found; nothing to do");
            return RunSummary::default();
        }
    };

    if sources.is_empty() {
        tracing::warn!(root = %root.display(), "No source directories found; nothing to do");
        return RunSummary::default();
    }

    let mut summary = RunSummary {
        sources_found: sources.len(),
        ..RunSummary::default()
    };

    for source in &sources {
        match process_source(source, config, post_processor) {
            SourceOutcome::Processed(_) => summary.sources_processed += 1,
            SourceOutcome::NoChatFiles | SourceOutcome::Unreadable => {
                summary.sources_skipped += 1
            }
        }
    }

    tracing::info!(
        found = summary.sources_found,
        processed = summary.sources_processed,
        skipped = summary.sources_skipped,
        "Run complete"
    );
    summary
}

/// Process one source directory.
pub fn process_source(
    source_dir: &Path,
    config: &PipelineConfig,
    post_processor: &dyn HtmlPostProcessor,
) -> SourceOutcome {
    tracing::info!(source = %source_dir.display(), "Processing source");

    let files = match discovery::discover_chat_files(source_dir, &config.discovery) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "Cannot list source directory; skipping");
            return SourceOutcome::Unreadable;
        }
    };

    if files.is_empty() {
        tracing::warn!(
            source = %source_dir.display(),
            pattern = %config.discovery.file_pattern,
            "No chat files found"
        );
        return SourceOutcome::NoChatFiles;
    }

    let loaded = loader::load_chat_log(&files);
    let analysis = analyse(&loaded.records, config);
    let summary = summarise(source_dir, &loaded, &analysis);

    tracing::info!(
        source = %summary.source,
        files = summary.files_loaded,
        failed_files = summary.files_failed,
        messages = summary.total_messages,
        participants = summary.total_participants,
        excluded = loaded.stats.excluded,
        malformed = loaded.stats.malformed,
        "Source aggregated"
    );

    let mut outputs = SourceReport {
        summary,
        written: Vec::new(),
        failed: Vec::new(),
    };
    write_outputs(source_dir, config, &analysis, &mut outputs);

    for name in &config.trace_usernames {
        tracing::info!(
            user = %name,
            count = analysis.user_counts.get(name),
            "Final count"
        );
    }

    hand_off_html(source_dir, post_processor);

    SourceOutcome::Processed(outputs)
}

/// Compute every aggregate the reports need.
pub fn analyse(log: &[ChatRecord], config: &PipelineConfig) -> Analysis {
    let user_counts = aggregate::count_messages_per_user(log);
    let top_users = rank::top_n(&user_counts, config.top_user_count);
    let groups = rank::group_by_count(&user_counts);
    let emotes = aggregate::count_emote_usage(log, &config.emotes);
    Analysis {
        user_counts,
        top_users,
        groups,
        emotes,
    }
}

fn summarise(source_dir: &Path, loaded: &LoadedLog, analysis: &Analysis) -> SourceSummary {
    SourceSummary {
        source: source_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_dir.display().to_string()),
        files_loaded: loaded.files_loaded,
        files_failed: loaded.files_failed,
        total_messages: analysis.user_counts.total_messages(),
        total_participants: analysis.user_counts.len(),
        unknown_timestamps: loaded.stats.unknown_timestamps,
        top_users: analysis.top_users.clone(),
        emotes: analysis.emotes.clone(),
    }
}

// =============================================================================
// Outputs
// =============================================================================

fn write_outputs(
    source_dir: &Path,
    config: &PipelineConfig,
    analysis: &Analysis,
    outputs: &mut SourceReport,
) {
    // Chart
    if analysis.top_users.is_empty() {
        tracing::warn!(
            source = %source_dir.display(),
            "No chat messages found; chart not written"
        );
    } else {
        let path = source_dir.join(constants::CHART_FILE_NAME);
        let result = write_text_output(&path, |w| {
            report::write_chart_html(w, &analysis.top_users).map(|_| ())
        });
        record(outputs, path, result);
    }

    // User listing
    let path = source_dir.join(constants::USER_COUNTS_FILE_NAME);
    let result = write_text_output(&path, |w| {
        report::write_user_listing(
            w,
            &analysis.groups,
            analysis.user_counts.total_messages(),
            analysis.user_counts.len(),
        )
    });
    record(outputs, path, result);

    // Emote listing
    let path = source_dir.join(constants::EMOTE_USAGE_FILE_NAME);
    let result = write_text_output(&path, |w| report::write_emote_listing(w, &analysis.emotes));
    record(outputs, path, result);

    // JSON summary
    if config.write_summary_json {
        let path = source_dir.join(constants::SUMMARY_FILE_NAME);
        let result = write_json_output(&path, &outputs.summary);
        record(outputs, path, result);
    }
}

fn record(outputs: &mut SourceReport, path: PathBuf, result: Result<(), ReportError>) {
    match result {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Output written");
            outputs.written.push(path);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to write output; skipping");
            outputs.failed.push(path);
        }
    }
}

/// Create `path` and hand a buffered writer to `render`. The handle is
/// dropped before returning on every path.
fn write_text_output<F>(path: &Path, render: F) -> Result<(), ReportError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = fs::create_output(path).map_err(io_err)?;
    render(&mut writer).map_err(io_err)
}

fn write_json_output(path: &Path, summary: &SourceSummary) -> Result<(), ReportError> {
    let writer = fs::create_output(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    report::write_summary_json(writer, summary).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn hand_off_html(source_dir: &Path, post_processor: &dyn HtmlPostProcessor) {
    let html_dir = source_dir.join(constants::HTML_DIR_NAME);
    if let Err(e) = fs::ensure_dir(&html_dir) {
        tracing::error!(
            dir = %html_dir.display(),
            error = %e,
            "Cannot create html directory; skipping post-processing"
        );
        return;
    }

    if let Err(e) = post_processor.process(&html_dir) {
        tracing::error!(dir = %html_dir.display(), error = %e, "HTML post-processing failed");
    }
}

// =============================================================================
// Tests
// =============================================================================
