//! Terminal result of a successful run

use crate::routing::Domain;
use serde::{Deserialize, Serialize};

/// Answer returned to the caller when a run terminates without error.
///
/// `accepted == false` means the evaluator rejected every attempt and the
/// last draft is returned unverified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub text: String,
    pub domain: Domain,
    pub accepted: bool,
    /// Number of responder invocations in the run.
    #[serde(default)]
    pub attempts: u32,
}
