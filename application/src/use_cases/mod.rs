//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify;
pub mod evaluate;
pub mod respond;
pub mod run_query;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod testing;
