//! Knowledge sources from TOML (`[retrieval]`, `[routing.*]`, `[web_search]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use triage_domain::Domain;

/// Raw `[retrieval]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Passages returned per lookup
    pub top_k: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// One tool-augmented domain's sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDomainRoute {
    /// Path to the domain's passage index (JSON)
    pub index: PathBuf,
    /// Whether the responder may fall back to web search
    #[serde(default = "default_true")]
    pub web_search: bool,
}

fn default_true() -> bool {
    true
}

impl FileDomainRoute {
    fn for_domain(domain: Domain) -> Self {
        Self {
            index: PathBuf::from(format!("indexes/{}.json", domain.key())),
            web_search: true,
        }
    }
}

/// Raw `[routing]` configuration (domain routing table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    pub it: FileDomainRoute,
    pub finance: FileDomainRoute,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        Self {
            it: FileDomainRoute::for_domain(Domain::It),
            finance: FileDomainRoute::for_domain(Domain::Finance),
        }
    }
}

impl FileRoutingConfig {
    /// Route for a tool-augmented domain (`None` for General).
    pub fn route(&self, domain: Domain) -> Option<&FileDomainRoute> {
        match domain {
            Domain::It => Some(&self.it),
            Domain::Finance => Some(&self.finance),
            Domain::General => None,
        }
    }
}

/// Raw `[web_search]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebSearchConfig {
    /// Global switch; per-domain `web_search` must also be on
    pub enabled: bool,
    pub max_results: usize,
}

impl Default for FileWebSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routing = FileRoutingConfig::default();
        assert_eq!(routing.it.index, PathBuf::from("indexes/it.json"));
        assert_eq!(
            routing.route(Domain::Finance).unwrap().index,
            PathBuf::from("indexes/finance.json")
        );
        assert!(routing.route(Domain::General).is_none());
    }

    #[test]
    fn test_route_override() {
        let toml_str = r#"
[routing.finance]
index = "/srv/kb/finance.json"
web_search = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.routing.finance.index,
            PathBuf::from("/srv/kb/finance.json")
        );
        assert!(!config.routing.finance.web_search);
        assert!(config.routing.it.web_search);
    }
}
