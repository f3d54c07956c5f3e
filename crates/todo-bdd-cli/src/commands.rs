//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// todo-bdd: run TodoMVC behavior scenarios written in YAML
#[derive(Parser, Debug)]
#[command(name = "todo-bdd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit library logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run feature files against the in-memory TodoMVC application
    Run(RunArgs),

    /// List the registered step vocabulary
    Steps,

    /// Report undefined or ambiguous steps without running anything
    Check(CheckArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Feature files, directories or glob patterns
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Report format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,

    /// Harness configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the application under test
    #[arg(long, env = "TODO_BDD_BASE_URL")]
    pub base_url: Option<String>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Feature files, directories or glob patterns
    #[arg(required = true)]
    pub files: Vec<String>,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Report format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON report
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_run_command() {
            let cli = Cli::parse_from(["todo-bdd", "run", "features/add_todos.yaml"]);
            if let Commands::Run(args) = cli.command {
                assert_eq!(args.files, ["features/add_todos.yaml"]);
                assert!(!args.fail_fast);
                assert!(matches!(args.format, FormatArg::Text));
            } else {
                panic!("expected Run command");
            }
        }

        #[test]
        fn test_parse_run_options() {
            let cli = Cli::parse_from([
                "todo-bdd",
                "run",
                "a.yaml",
                "b.yaml",
                "--fail-fast",
                "--format",
                "json",
                "--config",
                "harness.yaml",
                "--base-url",
                "http://todo.test",
            ]);
            if let Commands::Run(args) = cli.command {
                assert_eq!(args.files.len(), 2);
                assert!(args.fail_fast);
                assert!(matches!(args.format, FormatArg::Json));
                assert_eq!(args.config, Some(PathBuf::from("harness.yaml")));
                assert_eq!(args.base_url.as_deref(), Some("http://todo.test"));
            } else {
                panic!("expected Run command");
            }
        }

        #[test]
        fn test_run_requires_files() {
            assert!(Cli::try_parse_from(["todo-bdd", "run"]).is_err());
        }

        #[test]
        fn test_parse_steps_command() {
            let cli = Cli::parse_from(["todo-bdd", "steps"]);
            assert!(matches!(cli.command, Commands::Steps));
        }

        #[test]
        fn test_parse_check_command() {
            let cli = Cli::parse_from(["todo-bdd", "check", "features"]);
            assert!(matches!(cli.command, Commands::Check(_)));
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from(["todo-bdd", "steps", "-vv", "--color", "never", "--log-json"]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert!(cli.log_json);
        }

        #[test]
        fn test_quiet_flag() {
            let cli = Cli::parse_from(["todo-bdd", "-q", "steps"]);
            assert!(cli.quiet);
        }
    }

    mod conversion_tests {
        use super::*;
        use crate::config::ColorChoice;
        use crate::output::OutputFormat;

        #[test]
        fn test_color_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::default()), ColorChoice::Auto);
        }

        #[test]
        fn test_format_conversion() {
            assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
            assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
        }
    }
}
