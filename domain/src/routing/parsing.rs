//! Parsing of constrained LLM outputs.
//!
//! Both parsers are total: every input string maps to a decision, and the
//! ones that do not match the expected vocabulary map to the conservative
//! default (General domain, Reject verdict). No I/O happens here.

use super::domain::Domain;
use serde::{Deserialize, Serialize};

/// Why a classification fell back to [`Domain::FALLBACK`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "output", rename_all = "snake_case")]
pub enum ClassificationFallback {
    /// The model returned nothing but whitespace.
    EmptyOutput,
    /// The model returned something other than a bare label.
    UnrecognizedLabel(String),
}

impl std::fmt::Display for ClassificationFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationFallback::EmptyOutput => f.write_str("empty classifier output"),
            ClassificationFallback::UnrecognizedLabel(raw) => {
                write!(f, "unrecognized classifier output '{}'", raw)
            }
        }
    }
}

/// Result of classifying a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub domain: Domain,
    /// Set when `domain` is the fallback rather than the model's answer.
    pub fallback: Option<ClassificationFallback>,
}

impl Classification {
    pub fn matched(domain: Domain) -> Self {
        Self {
            domain,
            fallback: None,
        }
    }

    pub fn fallback(reason: ClassificationFallback) -> Self {
        Self {
            domain: Domain::FALLBACK,
            fallback: Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Evaluator judgment of a draft answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No judgment yet for the current draft.
    Pending,
    Accept,
    Reject,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pending => "pending",
            Verdict::Accept => "accept",
            Verdict::Reject => "reject",
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse classifier output into a [`Classification`].
///
/// The trimmed output must equal one of the labels exactly (case-sensitive).
/// Anything else, including explanations around a valid label, falls back
/// to General with the reason recorded.
///
/// ```
/// use triage_domain::routing::{Domain, parse_classification};
///
/// assert_eq!(parse_classification(" IT\n").domain, Domain::It);
/// assert!(parse_classification("Unknown category").is_fallback());
/// ```
pub fn parse_classification(raw: &str) -> Classification {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Classification::fallback(ClassificationFallback::EmptyOutput);
    }
    match Domain::from_label(trimmed) {
        Some(domain) => Classification::matched(domain),
        None => Classification::fallback(ClassificationFallback::UnrecognizedLabel(
            trimmed.to_string(),
        )),
    }
}

/// Parse evaluator output into a [`Verdict`].
///
/// Only a trimmed, case-insensitive `YES` accepts. `NO`, malformed and
/// empty output all reject.
pub fn parse_verdict(raw: &str) -> Verdict {
    if raw.trim().eq_ignore_ascii_case("YES") {
        Verdict::Accept
    } else {
        Verdict::Reject
    }
}
