//! Progress reporting for triage runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use triage_application::RunProgressNotifier;
use triage_domain::{Domain, RunOutcome, RunStage, Verdict};

/// Reports progress with a single spinner that follows the run's stages
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: RunStage) -> &'static str {
        match stage {
            RunStage::Classifying => "Classifying",
            RunStage::Dispatching => "Routing",
            RunStage::Responding => "Drafting",
            RunStage::Evaluating => "Checking",
            RunStage::Retrying => "Retrying",
            RunStage::Terminating => "Finishing",
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let mut guard = match self.spinner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let spinner = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(spinner);
    }

    /// Stop and clear the spinner (also used on errors and cancellation).
    pub fn finish(&self) {
        let mut guard = match self.spinner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunProgressNotifier for ProgressReporter {
    fn on_stage(&self, stage: RunStage, attempt: u32) {
        self.with_spinner(|pb| {
            pb.set_prefix(Self::stage_display_name(stage));
            match stage {
                RunStage::Responding | RunStage::Retrying => {
                    pb.set_message(format!("attempt {}", attempt + 1))
                }
                _ => pb.set_message(""),
            }
        });
    }

    fn on_classified(&self, domain: Domain, fallback: bool) {
        let note = if fallback { " (fallback)" } else { "" };
        self.with_spinner(|pb| pb.println(format!("  {} {}{}", "->".cyan(), domain, note)));
    }

    fn on_tool_call(&self, tool: &str) {
        self.with_spinner(|pb| pb.set_message(format!("using {}", tool)));
    }

    fn on_verdict(&self, verdict: Verdict, attempt: u32) {
        let mark = if verdict.is_accept() {
            "v".green()
        } else {
            "x".red()
        };
        self.with_spinner(|pb| pb.println(format!("  {} draft {} {}", mark, attempt, verdict)));
    }

    fn on_evaluation_failed(&self, _error: &str) {
        self.with_spinner(|pb| {
            pb.println(format!("  {} evaluator unavailable", "!".yellow()))
        });
    }

    fn on_finished(&self, _outcome: &RunOutcome) {
        self.finish();
    }
}
