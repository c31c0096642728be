// ChatTally - core/mod.rs
//
// Core business logic layer: parsing, counting, ranking, rendering.
// Must NOT depend on: platform or app. Reads no files; writes only to
// caller-supplied Write objects.

pub mod aggregate;
pub mod discovery;
pub mod model;
pub mod parser;
pub mod rank;
pub mod report;
