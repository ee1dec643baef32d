//! Configuration file loading for support-triage
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TRIAGE_<SECTION>__<KEY>` (e.g. `TRIAGE_LLM__MODEL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./triage.toml` or `./.triage.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/support-triage/config.toml`
//! 5. Fallback: `~/.config/support-triage/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileDomainRoute, FileLlmConfig, FileLoggingConfig,
    FileOrchestratorConfig, FileOutputConfig, FileOutputFormat, FileRetrievalConfig,
    FileRoutingConfig, FileServerConfig, FileTimeoutsConfig, FileWebSearchConfig, ProviderKind,
    Severity,
};
pub use loader::{ConfigError, ConfigLoader};
