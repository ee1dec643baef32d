//! Run state and the stage machine it moves through.
//!
//! ```text
//! Classifying ──▶ Dispatching ──▶ Responding ──▶ Evaluating ──┬─▶ Terminating
//!      │                              ▲    │                  │
//!      │                              └── Retrying ◀──────────┘
//!      └──────────────▶ Terminating ◀──────┘ (errors)
//! ```
//!
//! [`RunState`] is moved through each transition by value. The transition
//! methods return the updated state; nothing is mutated through a shared
//! reference, so a retry is simply another `Responding` step on the
//! unchanged prior fields.

use super::outcome::RunOutcome;
use crate::core::query::Query;
use crate::routing::{Domain, Verdict};
use serde::{Deserialize, Serialize};

/// Stage of a triage run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Classifying,
    Dispatching,
    Responding,
    Evaluating,
    Retrying,
    Terminating,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Classifying => "classifying",
            RunStage::Dispatching => "dispatching",
            RunStage::Responding => "responding",
            RunStage::Evaluating => "evaluating",
            RunStage::Retrying => "retrying",
            RunStage::Terminating => "terminating",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStage::Terminating)
    }
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single triage run (Entity)
///
/// Created fresh for every query and owned by the orchestrator for the
/// lifetime of that query only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    query: Query,
    active_responder: Option<Domain>,
    draft_answer: String,
    verdict: Verdict,
    attempt_count: u32,
    terminal: bool,
}

impl RunState {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            active_responder: None,
            draft_answer: String::new(),
            verdict: Verdict::Pending,
            attempt_count: 0,
            terminal: false,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn active_responder(&self) -> Option<Domain> {
        self.active_responder
    }

    /// Last draft, only meaningful once a verdict has been recorded.
    pub fn draft_answer(&self) -> Option<&str> {
        match self.verdict {
            Verdict::Pending => None,
            _ => Some(&self.draft_answer),
        }
    }

    /// Latest draft regardless of verdict (what the evaluator judges).
    pub fn draft_text(&self) -> &str {
        &self.draft_answer
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Record the classifier's decision.
    ///
    /// The responder is assigned once per run; a second assignment keeps
    /// the first domain.
    pub fn with_responder(mut self, domain: Domain) -> Self {
        if self.active_responder.is_none() {
            self.active_responder = Some(domain);
        }
        self
    }

    /// Record a fresh draft from the active responder.
    ///
    /// Counts the attempt and resets the verdict to `Pending` until the
    /// evaluator has seen the new draft.
    pub fn with_draft(mut self, text: impl Into<String>) -> Self {
        self.attempt_count += 1;
        self.draft_answer = text.into();
        self.verdict = Verdict::Pending;
        self
    }

    /// Record the evaluator's verdict and decide where the run goes next.
    ///
    /// Reject loops back (`Retrying`) while `attempt_count < max_retries`;
    /// Accept, or a reject once attempts are exhausted, terminates.
    pub fn with_verdict(mut self, verdict: Verdict, max_retries: u32) -> (Self, RunStage) {
        self.verdict = verdict;
        let next = match verdict {
            Verdict::Reject if self.attempt_count < max_retries => RunStage::Retrying,
            _ => RunStage::Terminating,
        };
        if next.is_terminal() {
            self.terminal = true;
        }
        (self, next)
    }

    /// Mark the run finished (error paths).
    pub fn terminated(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Build the success payload, if a judged draft exists.
    pub fn outcome(&self) -> Option<RunOutcome> {
        let text = self.draft_answer()?;
        Some(RunOutcome {
            text: text.to_string(),
            domain: self.active_responder.unwrap_or(Domain::FALLBACK),
            accepted: self.verdict.is_accept(),
            attempts: self.attempt_count,
        })
    }
}
