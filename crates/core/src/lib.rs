//! Core library: sidecar metadata, tag reconciliation, and the sync driver.

pub mod config;
pub mod dates;
pub mod driver;
pub mod normalize;
pub mod reconcile;
pub mod sidecar;
