//! Per-domain tool invoker.
//!
//! Serves the two tools of one tool-augmented domain:
//!
//! | Tool | Backed by | Output |
//! |------|-----------|--------|
//! | `read_<domain>_docs` | [`Retriever`] | passages with their source, or a "no documentation" notice |
//! | `search_<domain>_web` | [`WebSearchPort`] | JSON list of hits |

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use triage_application::{Retriever, ToolInvokerPort, WebSearchPort};
use triage_domain::{Domain, Passage, PromptTemplate, ToolDefinition, ToolError, ToolSpec};

/// [`ToolInvokerPort`] for one domain.
pub struct DomainToolInvoker {
    domain: Domain,
    spec: ToolSpec,
    docs_tool: String,
    web_tool: Option<String>,
    retriever: Arc<dyn Retriever>,
    web_search: Option<Arc<dyn WebSearchPort>>,
    retrieve_timeout: Duration,
    web_search_timeout: Duration,
}

impl DomainToolInvoker {
    /// Invoker with document retrieval only.
    pub fn new(domain: Domain, retriever: Arc<dyn Retriever>) -> Self {
        let docs = ToolDefinition::document_retrieval(domain);
        Self {
            domain,
            docs_tool: docs.name.clone(),
            spec: ToolSpec::new().register(docs),
            web_tool: None,
            retriever,
            web_search: None,
            retrieve_timeout: Duration::from_secs(10),
            web_search_timeout: Duration::from_secs(15),
        }
    }

    /// Add the secondary web search tool.
    pub fn with_web_search(mut self, web_search: Arc<dyn WebSearchPort>) -> Self {
        let web = ToolDefinition::web_search(self.domain);
        self.web_tool = Some(web.name.clone());
        self.spec = self.spec.register(web);
        self.web_search = Some(web_search);
        self
    }

    pub fn with_timeouts(mut self, retrieve: Duration, web_search: Duration) -> Self {
        self.retrieve_timeout = retrieve;
        self.web_search_timeout = web_search;
        self
    }

    async fn read_docs(&self, name: &str, input: &str) -> Result<String, ToolError> {
        let passages = bounded(name, self.retrieve_timeout, self.retriever.retrieve(input))
            .await?
            .map_err(|e| ToolError::unavailable(name, e.to_string()))?;

        debug!("{} returned {} passages", name, passages.len());
        if passages.is_empty() {
            return Ok(PromptTemplate::no_documents(self.domain));
        }
        Ok(format_passages(&passages))
    }

    async fn search_web(
        &self,
        name: &str,
        search: &Arc<dyn WebSearchPort>,
        input: &str,
    ) -> Result<String, ToolError> {
        let hits = bounded(name, self.web_search_timeout, search.search(input))
            .await?
            .map_err(|e| ToolError::unavailable(name, e.to_string()))?;

        debug!("{} returned {} hits", name, hits.len());
        serde_json::to_string_pretty(&hits)
            .map_err(|e| ToolError::new(name, "SERIALIZATION", e.to_string()))
    }
}

/// Run a tool backend call under its timeout.
async fn bounded<F, T>(name: &str, limit: Duration, call: F) -> Result<T, ToolError>
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let result = tokio::time::timeout(limit, call)
        .await
        .map_err(|_| ToolError::timeout(name));
    debug!("{} took {}ms", name, start.elapsed().as_millis());
    result
}

fn format_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| format!("[{}]\n{}", p.source, p.content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[async_trait]
impl ToolInvokerPort for DomainToolInvoker {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn invoke(&self, name: &str, input: &str) -> Result<String, ToolError> {
        if name == self.docs_tool {
            return self.read_docs(name, input).await;
        }
        if let (Some(web_tool), Some(search)) = (&self.web_tool, &self.web_search)
            && name == web_tool.as_str()
        {
            return self.search_web(name, search, input).await;
        }
        Err(ToolError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_application::{RetrievalError, WebSearchError};
    use triage_domain::SearchHit;

    struct FixedRetriever(Result<Vec<Passage>, String>);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str) -> Result<Vec<Passage>, RetrievalError> {
            self.0.clone().map_err(RetrievalError::Failed)
        }
    }

    struct SlowSearch;

    #[async_trait]
    impl WebSearchPort for SlowSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, WebSearchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    struct FixedSearch;

    #[async_trait]
    impl WebSearchPort for FixedSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, WebSearchError> {
            Ok(vec![SearchHit::new(
                "VPN",
                "About VPNs",
                "https://example.com/vpn",
            )])
        }
    }

    fn invoker(passages: Result<Vec<Passage>, String>) -> DomainToolInvoker {
        DomainToolInvoker::new(Domain::It, Arc::new(FixedRetriever(passages)))
    }

    #[tokio::test]
    async fn test_docs_tool_formats_passages() {
        let output = invoker(Ok(vec![
            Passage::new("Reset via portal.", "vpn.md"),
            Passage::new("Call the helpdesk.", "help.md"),
        ]))
        .invoke("read_it_docs", "vpn")
        .await
        .unwrap();

        assert!(output.starts_with("[vpn.md]\nReset via portal."));
        assert!(output.contains("[help.md]"));
    }

    #[tokio::test]
    async fn test_docs_tool_empty_result_is_sentinel() {
        let output = invoker(Ok(vec![]))
            .invoke("read_it_docs", "anything")
            .await
            .unwrap();
        assert_eq!(output, PromptTemplate::no_documents(Domain::It));
        assert!(!output.is_empty());
    }

    #[tokio::test]
    async fn test_docs_tool_failure_is_unavailable() {
        let err = invoker(Err("index corrupt".to_string()))
            .invoke("read_it_docs", "vpn")
            .await
            .unwrap_err();
        assert_eq!(err.code, "UNAVAILABLE");
        assert_eq!(err.tool, "read_it_docs");
    }

    #[tokio::test]
    async fn test_web_tool_absent_without_provider() {
        let invoker = invoker(Ok(vec![]));
        assert!(!invoker.has_tool("search_it_web"));
        let err = invoker.invoke("search_it_web", "vpn").await.unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_web_tool_returns_json_hits() {
        let invoker = invoker(Ok(vec![])).with_web_search(Arc::new(FixedSearch));
        assert_eq!(invoker.available_tools(), vec!["read_it_docs", "search_it_web"]);

        let output = invoker.invoke("search_it_web", "vpn").await.unwrap();
        let hits: Vec<SearchHit> = serde_json::from_str(&output).unwrap();
        assert_eq!(hits[0].url, "https://example.com/vpn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_web_tool_timeout() {
        let invoker = invoker(Ok(vec![]))
            .with_web_search(Arc::new(SlowSearch))
            .with_timeouts(Duration::from_secs(10), Duration::from_secs(1));

        let err = invoker.invoke("search_it_web", "vpn").await.unwrap_err();
        assert!(err.is_timeout());
    }
}
