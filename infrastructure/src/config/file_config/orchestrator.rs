//! Run control from TOML (`[orchestrator]` and `[timeouts]` sections)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use triage_application::StageTimeouts;

/// Raw `[orchestrator]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Responder attempts allowed by evaluator rejections
    pub max_retries: u32,
    /// Tool calls allowed inside one responder invocation
    pub max_tool_turns: usize,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            max_tool_turns: 6,
        }
    }
}

/// Raw `[timeouts]` configuration, in whole seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    pub classify_secs: u64,
    pub respond_secs: u64,
    pub evaluate_secs: u64,
    pub retrieve_secs: u64,
    pub web_search_secs: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            classify_secs: 30,
            respond_secs: 120,
            evaluate_secs: 30,
            retrieve_secs: 10,
            web_search_secs: 15,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn to_stage_timeouts(&self) -> StageTimeouts {
        StageTimeouts {
            classify: Duration::from_secs(self.classify_secs),
            respond: Duration::from_secs(self.respond_secs),
            evaluate: Duration::from_secs(self.evaluate_secs),
            retrieve: Duration::from_secs(self.retrieve_secs),
            web_search: Duration::from_secs(self.web_search_secs),
        }
    }

    /// `(field, seconds)` pairs, for validation.
    pub(super) fn entries(&self) -> [(&'static str, u64); 5] {
        [
            ("timeouts.classify_secs", self.classify_secs),
            ("timeouts.respond_secs", self.respond_secs),
            ("timeouts.evaluate_secs", self.evaluate_secs),
            ("timeouts.retrieve_secs", self.retrieve_secs),
            ("timeouts.web_search_secs", self.web_search_secs),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_run_params() {
        assert_eq!(
            FileTimeoutsConfig::default().to_stage_timeouts(),
            StageTimeouts::default()
        );
    }

    #[test]
    fn test_partial_timeouts() {
        let toml_str = r#"
[timeouts]
respond_secs = 45
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let timeouts = config.timeouts.to_stage_timeouts();
        assert_eq!(timeouts.respond, Duration::from_secs(45));
        assert_eq!(timeouts.classify, Duration::from_secs(30));
    }
}
