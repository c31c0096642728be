// ChatTally - app/mod.rs
//
// Application layer: file loading, per-source orchestration, and the
// HTML post-processing hand-off.
// Dependencies: core, platform, util.

pub mod loader;
pub mod pipeline;
pub mod postprocess;
