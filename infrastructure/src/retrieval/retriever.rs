use super::index::PassageIndex;
use async_trait::async_trait;
use std::path::Path;
use tracing::info;
use triage_application::{RetrievalError, Retriever};
use triage_domain::Passage;

/// [`Retriever`] over an in-memory [`PassageIndex`].
pub struct IndexRetriever {
    index: PassageIndex,
    top_k: usize,
}

impl IndexRetriever {
    pub fn new(index: PassageIndex, top_k: usize) -> Self {
        Self { index, top_k }
    }

    /// Load a domain's index file. Fails if the file is missing or malformed.
    pub fn load(path: &Path, top_k: usize) -> Result<Self, RetrievalError> {
        let index = PassageIndex::load(path)?;
        info!(path = %path.display(), passages = index.len(), "Loaded passage index");
        Ok(Self::new(index, top_k))
    }
}

#[async_trait]
impl Retriever for IndexRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<Passage>, RetrievalError> {
        Ok(self
            .index
            .search(query, self.top_k)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retrieve_top_k() {
        let index = PassageIndex::new(vec![
            Passage::new("Payroll runs on the 25th of each month.", "payroll.md"),
            Passage::new("Payroll questions go to the payroll desk.", "contacts.md"),
            Passage::new("Expense reports need a receipt.", "expenses.md"),
        ]);
        let retriever = IndexRetriever::new(index, 1);

        let passages = retriever.retrieve("When does payroll run?").await.unwrap();
        assert_eq!(passages.len(), 1);

        let none = retriever.retrieve("vpn").await.unwrap();
        assert!(none.is_empty());
    }
}
