//! Feature discovery, execution and static checking

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use todo_bdd::{
    steps, BddError, Feature, FeatureReport, ScenarioRunner, SimulatorFactory, StepRegistry,
};
use tracing::{debug, info};

const FEATURE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Expand files, directories and glob patterns into feature file paths.
///
/// Directories are searched recursively for `.yaml`/`.yml` files. Order
/// follows the inputs; matches within one input are sorted. Duplicates are
/// dropped.
pub fn discover_features(inputs: &[String]) -> CliResult<Vec<PathBuf>> {
    let mut found: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        let matches = if path.is_dir() {
            let mut all = Vec::new();
            for ext in FEATURE_EXTENSIONS {
                all.extend(expand_glob(&format!("{}/**/*.{ext}", input.trim_end_matches('/')))?);
            }
            all.sort();
            all
        } else if input.contains(['*', '?', '[']) {
            expand_glob(input)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            return Err(CliError::invalid_argument(format!("no such feature file: {input}")));
        };

        if matches.is_empty() {
            return Err(CliError::invalid_argument(format!(
                "no feature files match {input}"
            )));
        }
        debug!(input = %input, files = matches.len(), "expanded feature input");
        for m in matches {
            if !found.contains(&m) {
                found.push(m);
            }
        }
    }
    Ok(found)
}

fn expand_glob(pattern: &str) -> CliResult<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|e| CliError::invalid_argument(format!("bad pattern {pattern}: {e}")))?;
    let mut out = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| CliError::Io(e.into_error()))?;
        if path.is_file() {
            out.push(path);
        }
    }
    Ok(out)
}

/// Load one feature file, keeping the path in the error
pub fn load_feature(path: &Path) -> CliResult<Feature> {
    Feature::from_file(path).map_err(|source| CliError::FeatureFile {
        path: path.display().to_string(),
        source,
    })
}

/// Results of a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Per-feature reports, in run order
    pub features: Vec<FeatureReport>,
    /// Total duration
    pub duration: Duration,
}

impl RunSummary {
    /// Number of passed scenarios
    #[must_use]
    pub fn passed(&self) -> usize {
        self.features.iter().map(FeatureReport::scenarios_passed).sum()
    }

    /// Number of failed scenarios
    #[must_use]
    pub fn failed(&self) -> usize {
        self.features.iter().map(FeatureReport::scenarios_failed).sum()
    }

    /// Number of skipped scenarios
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.features.iter().map(FeatureReport::scenarios_skipped).sum()
    }

    /// Number of undefined steps
    #[must_use]
    pub fn undefined_steps(&self) -> usize {
        self.features.iter().map(|f| f.step_count("undefined")).sum()
    }

    /// Check if every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.features.iter().all(FeatureReport::passed)
    }
}

/// Runs feature files against the in-memory application
#[derive(Debug)]
pub struct FeatureRunner {
    config: CliConfig,
    reporter: ProgressReporter,
}

impl FeatureRunner {
    /// Create a new feature runner
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet())
                .with_steps(config.verbosity.is_verbose());
        Self { config, reporter }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Run every feature file in order
    pub fn run(&mut self, paths: &[PathBuf]) -> CliResult<RunSummary> {
        let start = Instant::now();
        let features = paths
            .iter()
            .map(|p| load_feature(p))
            .collect::<CliResult<Vec<_>>>()?;
        let harness = self.config.harness()?;
        info!(base_url = %harness.base_url, features = features.len(), "starting run");

        let mut runner = ScenarioRunner::new(steps::dispatcher()?, SimulatorFactory::new(harness))
            .with_fail_fast(self.config.fail_fast);

        let total: usize = features.iter().map(|f| f.scenarios.len()).sum();
        self.reporter.start_progress(total as u64, "Running scenarios");

        let mut summary = RunSummary::default();
        for feature in &features {
            if runner.stopped() {
                debug!(feature = %feature.name, "skipped after earlier failure");
            }
            self.reporter.header(&feature.name);
            let reporter = &self.reporter;
            let report = runner.run_feature_with(feature, |scenario| {
                reporter.scenario(scenario);
                reporter.increment(1);
            });
            summary.features.push(report);
        }

        self.reporter.finish();
        summary.duration = start.elapsed();
        self.reporter.summary(
            summary.passed(),
            summary.failed(),
            summary.skipped(),
            summary.duration,
        );
        Ok(summary)
    }
}

/// A step that cannot be dispatched as written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFinding {
    /// Feature file
    pub file: String,
    /// Step as written
    pub step: String,
    /// What is wrong with it
    pub problem: String,
}

/// Resolve every step of every feature against the registry without running
pub fn check_features(registry: &StepRegistry, paths: &[PathBuf]) -> CliResult<Vec<CheckFinding>> {
    let mut findings = Vec::new();
    for path in paths {
        let feature = load_feature(path)?;
        for step in feature.all_steps() {
            let problem = match registry.resolve(&step.text) {
                Ok(binding) => match (binding.pattern().takes_table(), step.table.is_some()) {
                    (true, false) => Some("expects a table but has none".to_string()),
                    (false, true) => Some("has a table its pattern does not take".to_string()),
                    _ => None,
                },
                Err(err @ (BddError::UnmatchedStep { .. } | BddError::AmbiguousStep { .. })) => {
                    Some(err.to_string())
                }
                Err(err) => return Err(err.into()),
            };
            if let Some(problem) = problem {
                findings.push(CheckFinding {
                    file: path.display().to_string(),
                    step: step.to_string(),
                    problem,
                });
            }
        }
    }
    Ok(findings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};
    use std::fs;
    use tempfile::TempDir;

    const PASSING: &str = "name: Adding\nscenarios:\n  - name: one item\n    steps:\n      - Given Jane opens the Todo Application\n      - When she adds 'buy milk'\n      - Then the remaining item count should show '1 item left'\n";
    const FAILING: &str = "name: Counting\nscenarios:\n  - name: wrong count\n    steps:\n      - Given Jane opens the Todo Application\n      - When she adds 'buy milk'\n      - Then the remaining item count should show '3 items left'\n  - name: after the failure\n    steps:\n      - Given Jane opens the Todo Application\n";
    const UNDEFINED: &str = "name: Dancing\nscenarios:\n  - name: dance\n    steps:\n      - Given Jane opens the Todo Application\n      - When she dances\n      - \"Then her todo list should contain:\"\n";

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn quiet_config() -> CliConfig {
        CliConfig::new()
            .with_verbosity(Verbosity::Quiet)
            .with_color(ColorChoice::Never)
    }

    mod discovery_tests {
        use super::*;

        #[test]
        fn test_single_file() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", PASSING);
            let found = discover_features(&[path.display().to_string()]).unwrap();
            assert_eq!(found, [path]);
        }

        #[test]
        fn test_directory_is_recursive_and_sorted() {
            let dir = TempDir::new().unwrap();
            let b = write(&dir, "b.yaml", PASSING);
            let a = write(&dir, "nested/a.yml", PASSING);
            write(&dir, "notes.txt", "not a feature");
            let found = discover_features(&[dir.path().display().to_string()]).unwrap();
            assert_eq!(found.len(), 2);
            assert!(found.contains(&a));
            assert!(found.contains(&b));
        }

        #[test]
        fn test_glob_pattern_and_dedup() {
            let dir = TempDir::new().unwrap();
            let a = write(&dir, "a.yaml", PASSING);
            write(&dir, "b.yaml", PASSING);
            let pattern = format!("{}/*.yaml", dir.path().display());
            let found = discover_features(&[a.display().to_string(), pattern]).unwrap();
            assert_eq!(found.len(), 2);
            assert_eq!(found[0], a);
        }

        #[test]
        fn test_missing_file() {
            let err = discover_features(&["/no/such/feature.yaml".to_string()]).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }

        #[test]
        fn test_empty_directory() {
            let dir = TempDir::new().unwrap();
            let err = discover_features(&[dir.path().display().to_string()]).unwrap_err();
            assert!(err.to_string().contains("no feature files"));
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn test_passing_feature() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", PASSING);
            let summary = FeatureRunner::new(quiet_config()).run(&[path]).unwrap();
            assert!(summary.all_passed());
            assert_eq!(summary.passed(), 1);
            assert_eq!(summary.failed(), 0);
        }

        #[test]
        fn test_failing_feature() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", FAILING);
            let summary = FeatureRunner::new(quiet_config()).run(&[path]).unwrap();
            assert!(!summary.all_passed());
            assert_eq!(summary.failed(), 1);
            assert_eq!(summary.passed(), 1);
        }

        #[test]
        fn test_fail_fast_stops_run() {
            let dir = TempDir::new().unwrap();
            let failing = write(&dir, "a.yaml", FAILING);
            let passing = write(&dir, "b.yaml", PASSING);
            let summary = FeatureRunner::new(quiet_config().with_fail_fast(true))
                .run(&[failing, passing])
                .unwrap();
            assert_eq!(summary.features.len(), 2);
            assert_eq!(summary.failed(), 1);
            assert_eq!(summary.passed(), 0);
            assert_eq!(summary.skipped(), 2);
            assert!(!summary.all_passed());

            let json = serde_json::to_value(&summary).unwrap();
            let later = &json["features"][1]["scenarios"][0]["steps"];
            assert!(later
                .as_array()
                .unwrap()
                .iter()
                .all(|step| step["outcome"]["status"] == "skipped"));
        }

        #[test]
        fn test_undefined_steps_counted() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", UNDEFINED);
            let summary = FeatureRunner::new(quiet_config()).run(&[path]).unwrap();
            assert_eq!(summary.undefined_steps(), 1);
            assert_eq!(summary.failed(), 1);
        }

        #[test]
        fn test_malformed_feature_names_file() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "broken.yaml", "scenarios: [");
            let err = FeatureRunner::new(quiet_config()).run(&[path]).unwrap_err();
            assert!(err.to_string().contains("broken.yaml"));
        }

        #[test]
        fn test_summary_serializes() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", PASSING);
            let summary = FeatureRunner::new(quiet_config()).run(&[path]).unwrap();
            let json = serde_json::to_string(&summary).unwrap();
            assert!(json.contains("\"status\":\"passed\""));
        }
    }

    mod check_tests {
        use super::*;

        #[test]
        fn test_clean_feature() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", PASSING);
            let findings = check_features(&steps::registry().unwrap(), &[path]).unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn test_undefined_and_missing_table() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "a.yaml", UNDEFINED);
            let findings = check_features(&steps::registry().unwrap(), &[path]).unwrap();
            assert_eq!(findings.len(), 2);
            assert!(findings[0].problem.contains("Undefined step"));
            assert_eq!(findings[0].step, "When she dances");
            assert!(findings[1].problem.contains("expects a table"));
        }
    }
}
