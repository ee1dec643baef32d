//! Tool implementations for tool-augmented responders
//!
//! - [`DomainToolInvoker`]: per-domain document retrieval (always) and web
//!   search (when enabled)
//! - [`DuckDuckGoSearch`]: web search provider (`web-tools` feature)

mod invoker;

#[cfg(feature = "web-tools")]
mod web_search;

pub use invoker::DomainToolInvoker;
#[cfg(feature = "web-tools")]
pub use web_search::DuckDuckGoSearch;

use crate::config::FileConfig;
use crate::retrieval::IndexRetriever;
use std::sync::Arc;
use tracing::{info, warn};
use triage_application::{RetrievalError, StageTimeouts, WebSearchPort};
use triage_domain::Domain;

/// Build the shared web search provider, if enabled.
pub fn build_web_search(config: &FileConfig) -> Option<Arc<dyn WebSearchPort>> {
    if !config.web_search.enabled {
        info!("Web search disabled by configuration");
        return None;
    }
    web_search_provider(config.web_search.max_results)
}

#[cfg(feature = "web-tools")]
fn web_search_provider(max_results: usize) -> Option<Arc<dyn WebSearchPort>> {
    match DuckDuckGoSearch::new(max_results) {
        Ok(search) => Some(Arc::new(search)),
        Err(e) => {
            warn!("Web search not available: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "web-tools"))]
fn web_search_provider(_max_results: usize) -> Option<Arc<dyn WebSearchPort>> {
    warn!("Web search enabled in config but built without the `web-tools` feature");
    None
}

/// Build the tool invoker for a tool-augmented domain.
///
/// Loads the domain's passage index; a missing or malformed index is an
/// error so the process fails at startup rather than on the first query.
/// Tool calls are bounded by `timeouts.retrieve` and `timeouts.web_search`.
pub fn build_domain_invoker(
    domain: Domain,
    config: &FileConfig,
    timeouts: &StageTimeouts,
    web_search: Option<Arc<dyn WebSearchPort>>,
) -> Result<DomainToolInvoker, RetrievalError> {
    let route = config.routing.route(domain).ok_or_else(|| {
        RetrievalError::Unavailable(format!("{} has no document route", domain.label()))
    })?;
    let retriever = IndexRetriever::load(&route.index, config.retrieval.top_k)?;

    let mut invoker = DomainToolInvoker::new(domain, Arc::new(retriever))
        .with_timeouts(timeouts.retrieve, timeouts.web_search);
    if let Some(search) = web_search.filter(|_| route.web_search) {
        invoker = invoker.with_web_search(search);
    }
    Ok(invoker)
}
