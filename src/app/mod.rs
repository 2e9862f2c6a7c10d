// JcrScope - app/mod.rs
//
// Application layer: dataset ownership and per-user session state.
// Dependencies: core layer.
// Must NOT depend on: platform specifics.

pub mod dataset;
pub mod session;
