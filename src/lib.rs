// JcrScope - lib.rs
//
// Library entry point, exposing the filter engine, dataset/session layer,
// and platform configuration for integration testing and embedding in
// other front ends.
//
// The command-line table renderer lives in `main.rs` and is not part of
// the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
