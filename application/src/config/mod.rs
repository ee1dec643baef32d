//! Application-level configuration.
//!
//! - [`RunParams`]: retry bound, tool loop cap and per-stage timeouts

pub mod run_params;

pub use run_params::{RunParams, StageTimeouts};
