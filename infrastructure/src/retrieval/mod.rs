//! Document retrieval
//!
//! One [`PassageIndex`] per tool-augmented domain, loaded at startup from a
//! JSON file and served through [`IndexRetriever`].

mod index;
mod retriever;

pub use index::{IndexFile, PassageIndex, tokenize};
pub use retriever::IndexRetriever;
