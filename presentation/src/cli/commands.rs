//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for single-query mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer with domain and verification status
    Text,
    /// The run outcome as JSON
    Json,
}

/// CLI arguments for support-triage
#[derive(Parser, Debug)]
#[command(name = "support-triage")]
#[command(author, version, about = "Route support questions to IT, Finance or General assistants")]
#[command(long_about = r#"
Support Triage classifies a question, hands it to the matching assistant and
checks the answer before returning it.

The process has three stages:
1. Classification: the question is labelled IT, Finance or General
2. Response: the matching assistant drafts an answer (IT and Finance consult
   internal documentation first, then the web)
3. Evaluation: the draft is checked; rejected drafts are retried up to
   --max-retries attempts

Configuration files are loaded from (in priority order):
1. TRIAGE_* environment variables (e.g. TRIAGE_LLM__MODEL)
2. --config <path>     Explicit config file
3. ./triage.toml       Project-level config
4. ~/.config/support-triage/config.toml   Global config

Example:
  support-triage "How do I reset my VPN password?"
  support-triage -o json "When is payroll processed?"
  support-triage --serve
"#)]
pub struct Cli {
    /// The question to answer (not required with --serve)
    pub query: Option<String>,

    /// Serve POST /query over HTTP instead of answering one question
    #[arg(long)]
    pub serve: bool,

    /// Override the listen port for --serve
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Maximum responder attempts driven by evaluator rejections
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Output format (defaults to the [output] config section)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_query() {
        let cli = Cli::parse_from(["support-triage", "-vv", "--max-retries", "2", "vpn help"]);
        assert_eq!(cli.query.as_deref(), Some("vpn help"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.max_retries, Some(2));
        assert!(!cli.serve);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["support-triage", "--serve", "--port", "8080", "-o", "json"]);
        assert!(cli.serve);
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.query.is_none());
    }
}
