//! Scenario runner and per-step reports.
//!
//! Each scenario gets a fresh world from the [`WorldFactory`], runs the
//! feature background and then its own steps strictly in order. The first
//! failing or undefined step aborts the scenario; the steps after it are
//! reported as skipped.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::result::BddError;
use crate::scenario::{Feature, Scenario, Step};
use crate::step::Dispatcher;
use crate::world::WorldFactory;

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Handler completed
    Passed,
    /// Handler or parameter extraction failed
    Failed {
        /// Error message
        reason: String,
    },
    /// No pattern matched the step
    Undefined {
        /// Error message
        reason: String,
    },
    /// Not run because an earlier step did not pass
    Skipped,
}

impl StepOutcome {
    fn from_error(err: &BddError) -> Self {
        if err.is_undefined() {
            Self::Undefined {
                reason: err.to_string(),
            }
        } else {
            Self::Failed {
                reason: err.to_string(),
            }
        }
    }

    /// Whether the step passed
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Short label for output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Undefined { .. } => "undefined",
            Self::Skipped => "skipped",
        }
    }

    /// Failure or undefined reason
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } | Self::Undefined { reason } => Some(reason),
            Self::Passed | Self::Skipped => None,
        }
    }
}

/// Report for one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step as written
    pub step: Step,
    /// Outcome
    pub outcome: StepOutcome,
    /// Time spent in the step
    pub duration: Duration,
}

/// Report for one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Background and scenario steps, in execution order
    pub steps: Vec<StepReport>,
    /// Total duration
    pub duration: Duration,
}

impl ScenarioReport {
    /// Whether every step passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.is_passed())
    }

    /// First step that did not pass and was not skipped
    #[must_use]
    pub fn failure(&self) -> Option<&StepReport> {
        self.steps
            .iter()
            .find(|s| s.outcome.reason().is_some())
    }

    /// Number of steps with the given outcome label
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.steps.iter().filter(|s| s.outcome.label() == label).count()
    }
}

/// Report for a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Feature name
    pub name: String,
    /// Scenario reports, in file order
    pub scenarios: Vec<ScenarioReport>,
    /// Total duration
    pub duration: Duration,
}

impl FeatureReport {
    /// Whether every scenario passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioReport::passed)
    }

    /// Number of passed scenarios
    #[must_use]
    pub fn scenarios_passed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    /// Number of scenarios with a failed or undefined step
    #[must_use]
    pub fn scenarios_failed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.failure().is_some()).count()
    }

    /// Number of scenarios never started because an earlier one failed
    #[must_use]
    pub fn scenarios_skipped(&self) -> usize {
        self.scenarios.len() - self.scenarios_passed() - self.scenarios_failed()
    }

    /// Number of steps across scenarios with the given outcome label
    #[must_use]
    pub fn step_count(&self, label: &str) -> usize {
        self.scenarios.iter().map(|s| s.count(label)).sum()
    }
}

/// Runs features scenario by scenario
#[derive(Debug)]
pub struct ScenarioRunner<F> {
    dispatcher: Dispatcher,
    factory: F,
    fail_fast: bool,
    stopped: bool,
}

impl<F: WorldFactory> ScenarioRunner<F> {
    /// Create a runner
    #[must_use]
    pub const fn new(dispatcher: Dispatcher, factory: F) -> Self {
        Self {
            dispatcher,
            factory,
            fail_fast: false,
            stopped: false,
        }
    }

    /// Stop after the first failing scenario.
    ///
    /// Every later scenario is reported as skipped, including those of
    /// features run afterwards with the same runner.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Whether a failure has stopped the run under fail-fast
    #[must_use]
    pub const fn stopped(&self) -> bool {
        self.stopped
    }

    /// Dispatcher in use
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run every scenario of a feature
    pub fn run_feature(&mut self, feature: &Feature) -> FeatureReport {
        self.run_feature_with(feature, |_| {})
    }

    /// Run every scenario, calling `on_scenario` after each one
    pub fn run_feature_with<C>(&mut self, feature: &Feature, mut on_scenario: C) -> FeatureReport
    where
        C: FnMut(&ScenarioReport),
    {
        let start = Instant::now();
        info!(feature = %feature.name, scenarios = feature.scenarios.len(), "running feature");
        let mut scenarios = Vec::with_capacity(feature.scenarios.len());
        for scenario in &feature.scenarios {
            let report = if self.stopped {
                skipped(&feature.background, scenario)
            } else {
                self.run_scenario(&feature.background, scenario)
            };
            if !report.passed() && self.fail_fast {
                self.stopped = true;
            }
            on_scenario(&report);
            scenarios.push(report);
        }
        FeatureReport {
            name: feature.name.clone(),
            scenarios,
            duration: start.elapsed(),
        }
    }

    /// Run one scenario in a fresh world
    pub fn run_scenario(&mut self, background: &[Step], scenario: &Scenario) -> ScenarioReport {
        let start = Instant::now();
        info!(scenario = %scenario.name, "scenario started");
        let mut world = self.factory.create();
        let mut aborted = false;
        let mut steps = Vec::with_capacity(background.len() + scenario.steps.len());

        for step in background.iter().chain(&scenario.steps) {
            if aborted {
                steps.push(StepReport {
                    step: step.clone(),
                    outcome: StepOutcome::Skipped,
                    duration: Duration::ZERO,
                });
                continue;
            }
            let step_start = Instant::now();
            let outcome = match self.dispatcher.dispatch(&mut world, step) {
                Ok(()) => StepOutcome::Passed,
                Err(err) => {
                    warn!(scenario = %scenario.name, step = %step, error = %err, "step did not pass");
                    aborted = true;
                    StepOutcome::from_error(&err)
                }
            };
            steps.push(StepReport {
                step: step.clone(),
                outcome,
                duration: step_start.elapsed(),
            });
        }

        let report = ScenarioReport {
            name: scenario.name.clone(),
            steps,
            duration: start.elapsed(),
        };
        info!(scenario = %scenario.name, passed = report.passed(), "scenario finished");
        report
    }
}

fn skipped(background: &[Step], scenario: &Scenario) -> ScenarioReport {
    ScenarioReport {
        name: scenario.name.clone(),
        steps: background
            .iter()
            .chain(&scenario.steps)
            .map(|step| StepReport {
                step: step.clone(),
                outcome: StepOutcome::Skipped,
                duration: Duration::ZERO,
            })
            .collect(),
        duration: Duration::ZERO,
    }
}
