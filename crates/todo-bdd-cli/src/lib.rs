//! todo-bdd CLI library
//!
//! Command-line front end for the todo-bdd harness: discovers YAML feature
//! files, runs them against the in-memory TodoMVC application, and checks
//! them against the step vocabulary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, FormatArg, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, ProgressReporter};
pub use runner::{
    check_features, discover_features, load_feature, CheckFinding, FeatureRunner, RunSummary,
};
