//! Query routing: the closed set of support domains and the parsers that
//! turn raw classifier / evaluator output into typed decisions.
//!
//! | Item | Role |
//! |------|------|
//! | [`Domain`] | IT / Finance / General, each backed by one responder |
//! | [`parse_classification`] | Classifier output → [`Classification`] (General fallback) |
//! | [`parse_verdict`] | Evaluator output → [`Verdict`] (Reject fallback) |

pub mod domain;
pub mod parsing;

pub use domain::Domain;
pub use parsing::{Classification, ClassificationFallback, Verdict, parse_classification, parse_verdict};
