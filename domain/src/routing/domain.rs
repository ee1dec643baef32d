//! Support domain value object

use serde::{Deserialize, Serialize};

/// A support domain a query can be routed to (Value Object)
///
/// Each variant maps to exactly one responder. The classifier speaks in
/// labels (`IT`, `Finance`, `General`); results and logs speak in
/// responder names (`itAgent`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "itAgent")]
    It,
    #[serde(rename = "financeAgent")]
    Finance,
    #[serde(rename = "generalAgent")]
    General,
}

impl Domain {
    /// Every domain, in classifier prompt order.
    pub const ALL: [Domain; 3] = [Domain::It, Domain::Finance, Domain::General];

    /// Domain used whenever classification output cannot be trusted.
    pub const FALLBACK: Domain = Domain::General;

    /// Label the classifier must emit for this domain.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::It => "IT",
            Domain::Finance => "Finance",
            Domain::General => "General",
        }
    }

    /// Name of the responder that serves this domain.
    pub fn responder_name(&self) -> &'static str {
        match self {
            Domain::It => "itAgent",
            Domain::Finance => "financeAgent",
            Domain::General => "generalAgent",
        }
    }

    /// Lowercase key used in configuration tables and tool names.
    pub fn key(&self) -> &'static str {
        match self {
            Domain::It => "it",
            Domain::Finance => "finance",
            Domain::General => "general",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn from_label(label: &str) -> Option<Domain> {
        Domain::ALL.into_iter().find(|d| d.label() == label)
    }

    /// Whether responders for this domain use document retrieval tools.
    pub fn uses_tools(&self) -> bool {
        !matches!(self, Domain::General)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.responder_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_is_case_sensitive() {
        assert_eq!(Domain::from_label("IT"), Some(Domain::It));
        assert_eq!(Domain::from_label("Finance"), Some(Domain::Finance));
        assert_eq!(Domain::from_label("General"), Some(Domain::General));
        assert_eq!(Domain::from_label("it"), None);
        assert_eq!(Domain::from_label("FINANCE"), None);
    }

    #[test]
    fn test_serializes_as_responder_name() {
        assert_eq!(serde_json::to_string(&Domain::It).unwrap(), r#""itAgent""#);
        let d: Domain = serde_json::from_str(r#""financeAgent""#).unwrap();
        assert_eq!(d, Domain::Finance);
    }

    #[test]
    fn test_only_general_is_tool_free() {
        assert!(Domain::It.uses_tools());
        assert!(Domain::Finance.uses_tools());
        assert!(!Domain::General.uses_tools());
    }
}
