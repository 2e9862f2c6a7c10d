// JcrScope - core/mod.rs
//
// Core business logic layer: record model, filter engine, facets,
// and the CSV loader/exporter at its edges.
// Must NOT depend on: app or platform.

pub mod export;
pub mod facets;
pub mod filter;
pub mod loader;
pub mod model;
