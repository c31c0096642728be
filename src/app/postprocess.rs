// ChatTally - app/postprocess.rs
//
// Hand-off point for HTML transcript post-processing.
//
// Each source gets an `html/` subdirectory. After a source's own outputs are
// written, the pipeline hands that directory to an `HtmlPostProcessor` exactly
// once. What the processor does with the files there is its own business.

use std::io;
use std::path::Path;

/// External step run once per source over its `html/` directory.
pub trait HtmlPostProcessor {
    /// Process the HTML transcripts in `html_dir`.
    ///
    /// Errors are logged by the pipeline and never abort the run.
    fn process(&self, html_dir: &Path) -> io::Result<()>;
}

/// Post-processor that leaves the directory untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPostProcessor;

impl HtmlPostProcessor for NoopPostProcessor {
    fn process(&self, html_dir: &Path) -> io::Result<()> {
        tracing::debug!(dir = %html_dir.display(), "No HTML post-processor configured");
        Ok(())
    }
}
