//! Run parameters for orchestration loop control.
//!
//! [`RunParams`] groups the static parameters that bound a triage run:
//! how many responder attempts the evaluator may trigger, how many tool
//! calls a responder may make, and how long each outbound call may take.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-stage timeouts for outbound calls.
///
/// | Field | Applied by | On expiry |
/// |-------|-----------|-----------|
/// | `classify` | orchestrator | `ClassificationError::Timeout` |
/// | `respond` | orchestrator | `ResponderError` (timeout) |
/// | `evaluate` | orchestrator | treated as Reject |
/// | `retrieve` | tool invoker | `ToolError` (TIMEOUT) |
/// | `web_search` | tool invoker | `ToolError` (TIMEOUT) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimeouts {
    pub classify: Duration,
    pub respond: Duration,
    pub evaluate: Duration,
    pub retrieve: Duration,
    pub web_search: Duration,
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            classify: Duration::from_secs(30),
            respond: Duration::from_secs(120),
            evaluate: Duration::from_secs(30),
            retrieve: Duration::from_secs(10),
            web_search: Duration::from_secs(15),
        }
    }
}

/// Orchestration loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// Bound on responder attempts driven by evaluator rejections.
    ///
    /// A reject retries while `attempts < max_retries`; the first attempt
    /// always runs, so `0` and `1` both mean a single attempt.
    pub max_retries: u32,
    /// Maximum tool calls inside one responder invocation.
    pub max_tool_turns: usize,
    pub timeouts: StageTimeouts,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            max_retries: 3,
            max_tool_turns: 6,
            timeouts: StageTimeouts::default(),
        }
    }
}

impl RunParams {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_timeouts(mut self, timeouts: StageTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Upper bound on responder invocations per run.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }
}
