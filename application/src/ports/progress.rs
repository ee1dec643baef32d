//! Progress notification port
//!
//! Defines the interface for reporting progress during a triage run.

use triage_domain::{Domain, RunOutcome, RunStage, Verdict};

/// Callback for progress updates while a query is being handled.
///
/// Implementations live in the presentation layer (spinner, logs). All
/// methods default to no-ops so adapters only override what they show.
pub trait RunProgressNotifier: Send + Sync {
    /// Called when the run enters a new stage
    fn on_stage(&self, _stage: RunStage, _attempt: u32) {}

    /// Called after classification settles on a responder
    fn on_classified(&self, _domain: Domain, _fallback: bool) {}

    /// Called when a responder produces a draft
    fn on_draft(&self, _domain: Domain, _attempt: u32, _chars: usize) {}

    /// Called after the evaluator judges a draft
    fn on_verdict(&self, _verdict: Verdict, _attempt: u32) {}

    /// Called when a tool is invoked inside a responder
    fn on_tool_call(&self, _tool: &str) {}

    /// Called when the evaluator itself fails (the draft is then rejected)
    fn on_evaluation_failed(&self, _error: &str) {}

    /// Called once with the final outcome
    fn on_finished(&self, _outcome: &RunOutcome) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoRunProgress;

impl RunProgressNotifier for NoRunProgress {}
