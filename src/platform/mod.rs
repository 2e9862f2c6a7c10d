// JcrScope - platform/mod.rs
//
// Platform abstraction layer: directories and config.toml.
// Dependencies: standard library, directories, toml.
// Must NOT depend on: app.

pub mod config;
