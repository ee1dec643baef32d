//! Console output formatter for run outcomes

use colored::Colorize;
use triage_domain::RunOutcome;

/// Formats run outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the answer with its routing and verification status
    pub fn format(outcome: &RunOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("=== {} answer ===", outcome.domain.label())
                .cyan()
                .bold()
        ));
        output.push_str(outcome.text.trim());
        output.push_str("\n\n");

        let status = if outcome.accepted {
            "verified".green().bold()
        } else {
            "not verified".yellow().bold()
        };
        output.push_str(&format!(
            "{} {} · {} {} · {} {}\n",
            "Responder:".dimmed(),
            outcome.domain,
            "Status:".dimmed(),
            status,
            "Attempts:".dimmed(),
            outcome.attempts
        ));

        if !outcome.accepted {
            output.push_str(&format!(
                "{}\n",
                "The evaluator did not accept any draft; this is the last attempt.".yellow()
            ));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &RunOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a user-facing error line
    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }
}
