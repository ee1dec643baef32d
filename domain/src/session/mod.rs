//! LLM conversation domain.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`entities::CompletionRequest`]: an ordered message list plus sampling knobs

pub mod entities;
