//! Insulin Access Atlas.
//!
//! Library crate behind the atlas HTTP service and CLI. The scoring core is
//! pure and stateless; datasets supply the reference data it scores, and the
//! report module assembles both into the per-district payloads the surfaces
//! render.

pub mod config;
pub mod datasets;
pub mod domain;
pub mod error;
pub mod report;
pub mod scoring;
pub mod telemetry;
