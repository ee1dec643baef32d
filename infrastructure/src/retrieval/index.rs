//! Lexical passage index with BM25 scoring.
//!
//! Index files are JSON:
//!
//! ```json
//! { "passages": [ { "source": "vpn.md", "content": "To reset your VPN password..." } ] }
//! ```
//!
//! Postings are rebuilt in memory when the file is loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use triage_application::RetrievalError;
use triage_domain::Passage;

const K1: f32 = 1.2;
const B: f32 = 0.75;

/// Tokenize text into lowercase alphanumeric terms of two or more chars.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.chars().count() >= 2)
        .map(String::from)
        .collect()
}

/// On-disk index file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexFile {
    pub passages: Vec<Passage>,
}

/// In-memory inverted index over passages.
#[derive(Debug, Clone, Default)]
pub struct PassageIndex {
    passages: Vec<Passage>,
    /// term -> (passage position, term frequency)
    postings: HashMap<String, Vec<(usize, u32)>>,
    lengths: Vec<u32>,
    avg_length: f32,
}

impl PassageIndex {
    pub fn new(passages: Vec<Passage>) -> Self {
        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();
        let mut lengths = Vec::with_capacity(passages.len());

        for (pos, passage) in passages.iter().enumerate() {
            let tokens = tokenize(&passage.content);
            lengths.push(tokens.len() as u32);

            let mut counts: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (token, tf) in counts {
                postings.entry(token).or_default().push((pos, tf));
            }
        }

        let total: u32 = lengths.iter().sum();
        let avg_length = if lengths.is_empty() {
            0.0
        } else {
            total as f32 / lengths.len() as f32
        };

        Self {
            passages,
            postings,
            lengths,
            avg_length,
        }
    }

    /// Load and index a JSON index file.
    pub fn load(path: &Path) -> Result<Self, RetrievalError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RetrievalError::Unavailable(format!("{}: {}", path.display(), e))
        })?;
        let file: IndexFile = serde_json::from_str(&raw).map_err(|e| {
            RetrievalError::Unavailable(format!("{}: invalid index: {}", path.display(), e))
        })?;
        Ok(Self::new(file.passages))
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Top `limit` passages for `query`, best first.
    ///
    /// Only passages sharing at least one term with the query are returned.
    /// Ties are broken by position in the index file.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Passage> {
        let mut terms = tokenize(query);
        terms.sort();
        terms.dedup();

        let n = self.passages.len() as f32;
        let mut scores: HashMap<usize, f32> = HashMap::new();

        for term in &terms {
            let Some(posting) = self.postings.get(term) else {
                continue;
            };
            let df = posting.len() as f32;
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

            for &(pos, tf) in posting {
                let len = self.lengths[pos] as f32;
                let norm = 1.0 - B + B * (len / self.avg_length.max(1.0));
                let tf = tf as f32;
                *scores.entry(pos).or_insert(0.0) += idf * (tf * (K1 + 1.0)) / (tf + K1 * norm);
            }
        }

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(pos, _)| &self.passages[pos])
            .collect()
    }
}
