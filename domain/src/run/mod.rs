//! Run lifecycle: the per-query state threaded through the triage graph.

pub mod outcome;
pub mod state;

pub use outcome::RunOutcome;
pub use state::{RunStage, RunState};
