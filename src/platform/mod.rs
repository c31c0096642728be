// ChatTally - platform/mod.rs
//
// Platform abstraction layer: config file resolution and file I/O helpers.
// Dependencies: standard library, directories crate.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
