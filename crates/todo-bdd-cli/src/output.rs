//! Output formatting and progress reporting

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use todo_bdd::{ScenarioReport, StepOutcome, StepReport};

/// Output format for run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text on stderr
    #[default]
    Text,
    /// JSON report on stdout
    Json,
}

/// Progress reporter for scenario execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Print every step, not just failing ones
    pub show_steps: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
            show_steps: false,
        }
    }

    /// Print every step of every scenario
    #[must_use]
    pub const fn with_steps(mut self, show_steps: bool) -> Self {
        self.show_steps = show_steps;
        self
    }

    /// Start a progress bar over scenarios
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Finish progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    fn line(&self, message: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.suspend(|| {
                let _ = self.term.write_line(message);
            }),
            None => {
                let _ = self.term.write_line(message);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };

        self.line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        self.line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        self.line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        self.line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.line("");
        self.line(&styled);
    }

    /// Print one step line, indented under its scenario
    pub fn step(&self, report: &StepReport) {
        let marker = match (&report.outcome, self.use_color) {
            (StepOutcome::Passed, true) => style("✓").green().to_string(),
            (StepOutcome::Failed { .. }, true) => style("✗").red().to_string(),
            (StepOutcome::Undefined { .. }, true) => style("?").yellow().to_string(),
            (StepOutcome::Skipped, true) => style("-").dim().to_string(),
            (outcome, false) => outcome.label().to_uppercase(),
        };
        self.line(&format!("    {marker} {}", report.step));
        if let Some(reason) = report.outcome.reason() {
            self.line(&format!("        {reason}"));
        }
    }

    /// Print a scenario result; steps follow when verbose or on failure
    pub fn scenario(&self, report: &ScenarioReport) {
        if report.count("skipped") == report.steps.len() {
            self.warning(&format!("{} (skipped)", report.name));
        } else if report.passed() {
            self.success(&format!("{} ({:.2?})", report.name, report.duration));
            if self.show_steps && !self.quiet {
                report.steps.iter().for_each(|s| self.step(s));
            }
        } else {
            self.failure(&report.name);
            for step in &report.steps {
                if self.show_steps || step.outcome.reason().is_some() {
                    self.step(step);
                }
            }
        }
    }

    /// Print run summary
    pub fn summary(&self, passed: usize, failed: usize, skipped: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }

        self.line("");

        let total = passed + failed + skipped;
        let duration_secs = duration.as_secs_f64();

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();
            let skipped_style = Style::new().yellow();

            let status = if failed > 0 {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };

            self.line(&format!(
                "{} {} scenarios in {:.2}s ({} passed, {} failed, {} skipped)",
                status,
                total,
                duration_secs,
                passed_style.apply_to(passed),
                if failed > 0 {
                    failed_style.apply_to(failed).to_string()
                } else {
                    failed.to_string()
                },
                skipped_style.apply_to(skipped)
            ));
        } else {
            let status = if failed > 0 { "FAILED" } else { "PASSED" };
            self.line(&format!(
                "{status} {total} scenarios in {duration_secs:.2}s ({passed} passed, {failed} failed, {skipped} skipped)"
            ));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use todo_bdd::Step;

    fn report(outcome: StepOutcome) -> ScenarioReport {
        ScenarioReport {
            name: "adds an item".to_string(),
            steps: vec![StepReport {
                step: Step::when("she adds 'buy milk'"),
                outcome,
                duration: Duration::from_millis(3),
            }],
            duration: Duration::from_millis(3),
        }
    }

    mod output_format_tests {
        use super::*;

        #[test]
        fn test_default_format() {
            assert_eq!(OutputFormat::default(), OutputFormat::Text);
        }

        #[test]
        fn test_serialize() {
            let json = serde_json::to_string(&OutputFormat::Json).unwrap();
            assert_eq!(json, "\"Json\"");
        }
    }

    mod progress_reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = ProgressReporter::new(true, false);
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
            assert!(!reporter.show_steps);
        }

        #[test]
        fn test_with_steps() {
            let reporter = ProgressReporter::new(false, false).with_steps(true);
            assert!(reporter.show_steps);
        }

        #[test]
        fn test_scenario_lines() {
            let reporter = ProgressReporter::new(false, false).with_steps(true);
            reporter.scenario(&report(StepOutcome::Passed));
            reporter.scenario(&report(StepOutcome::Failed {
                reason: "Assertion failed".to_string(),
            }));
            reporter.scenario(&report(StepOutcome::Undefined {
                reason: "Undefined step".to_string(),
            }));
            // No panic = success
        }

        #[test]
        fn test_summary() {
            let reporter = ProgressReporter::new(false, false);
            reporter.summary(3, 0, 0, Duration::from_millis(40));
            reporter.summary(2, 1, 1, Duration::from_millis(40));
            // No panic = success
        }

        #[test]
        fn test_progress_bar() {
            let mut reporter = ProgressReporter::new(false, false);
            reporter.start_progress(2, "Running scenarios");
            reporter.increment(1);
            reporter.info("between updates");
            reporter.increment(1);
            reporter.finish();
            assert!(reporter.progress_bar.is_none());
        }

        #[test]
        fn test_quiet_mode_suppresses_output() {
            let mut reporter = ProgressReporter::new(false, true);
            reporter.start_progress(10, "Running scenarios");
            assert!(reporter.progress_bar.is_none());
            reporter.success("hidden");
            reporter.warning("hidden");
            reporter.header("hidden");
            // Failure is still printed
            reporter.failure("shown");
        }
    }
}
