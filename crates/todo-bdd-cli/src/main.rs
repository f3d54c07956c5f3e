//! todo-bdd CLI: run TodoMVC behavior scenarios
//!
//! ## Usage
//!
//! ```bash
//! todo-bdd run features/                    # Run every feature file
//! todo-bdd run features/*.yaml --fail-fast  # Stop at the first failure
//! todo-bdd run features/ --format json      # JSON report on stdout
//! todo-bdd steps                            # List the step vocabulary
//! todo-bdd check features/                  # Find undefined steps
//! ```

use clap::Parser;
use std::process::ExitCode;
use todo_bdd::steps;
use todo_bdd_cli::{
    check_features, discover_features, CheckArgs, Cli, CliConfig, CliError, CliResult,
    ColorChoice, Commands, FeatureRunner, OutputFormat, ProgressReporter, RunArgs, Verbosity,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity, cli.log_json);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: CliConfig) -> CliResult<()> {
    match cli.command {
        Commands::Run(args) => run_features(config, args),
        Commands::Steps => list_steps(),
        Commands::Check(args) => run_check(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn init_tracing(verbosity: Verbosity, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(verbosity.is_debug()).init();
    }
}

fn run_features(config: CliConfig, args: RunArgs) -> CliResult<()> {
    let config = config
        .with_fail_fast(args.fail_fast)
        .with_format(args.format.into())
        .with_harness_file(args.config)
        .with_base_url(args.base_url);
    let paths = discover_features(&args.files)?;

    let format = config.format;
    let config = if format == OutputFormat::Json {
        // stdout carries the report; keep stderr to failures
        config.with_verbosity(Verbosity::Quiet)
    } else {
        config
    };

    let summary = FeatureRunner::new(config).run(&paths)?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if summary.all_passed() {
        Ok(())
    } else {
        Err(CliError::scenario_failure(format!(
            "{} of {} scenarios did not pass",
            summary.failed() + summary.skipped(),
            summary.passed() + summary.failed() + summary.skipped()
        )))
    }
}

fn list_steps() -> CliResult<()> {
    let registry = steps::registry()?;
    for binding in registry.bindings() {
        println!("{binding}");
        for example in binding.examples() {
            println!("    e.g. {} {example}", binding.keyword());
        }
    }
    Ok(())
}

fn run_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let paths = discover_features(&args.files)?;
    let registry = steps::registry()?;
    let findings = check_features(&registry, &paths)?;
    let reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    for finding in &findings {
        reporter.failure(&format!("{}: {}", finding.file, finding.step));
        reporter.info(&finding.problem);
    }

    if findings.is_empty() {
        reporter.success(&format!("{} feature file(s), every step defined", paths.len()));
        Ok(())
    } else {
        Err(CliError::check(format!(
            "{} step(s) cannot be dispatched",
            findings.len()
        )))
    }
}
