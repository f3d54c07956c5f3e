//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use todo_bdd::HarnessConfig;

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - failures only
    Quiet,
    /// Normal - one line per scenario
    #[default]
    Normal,
    /// Verbose - every step
    Verbose,
    /// Debug - every step plus library tracing
    Debug,
}

impl Verbosity {
    /// Map `-v` occurrences and `-q` to a level
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Default tracing filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet | Self::Normal => "error",
            Self::Verbose => "todo_bdd=info",
            Self::Debug => "todo_bdd=debug,todo_bdd_cli=debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Stop after the first failing scenario
    pub fail_fast: bool,
    /// Report format on stdout
    pub format: OutputFormat,
    /// Harness configuration file (YAML)
    pub harness_file: Option<PathBuf>,
    /// Base URL override for the application under test
    pub base_url: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            fail_fast: false,
            format: OutputFormat::Text,
            harness_file: None,
            base_url: None,
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set fail fast
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set report format
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set harness configuration file
    #[must_use]
    pub fn with_harness_file(mut self, path: Option<PathBuf>) -> Self {
        self.harness_file = path;
        self
    }

    /// Set base URL override
    #[must_use]
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        self.base_url = url;
        self
    }

    /// Resolve the harness configuration: file (if any), then overrides
    pub fn harness(&self) -> CliResult<HarnessConfig> {
        let mut harness = match &self.harness_file {
            Some(path) => HarnessConfig::from_file(path).map_err(|e| {
                CliError::config(format!("cannot load {}: {e}", path.display()))
            })?,
            None => HarnessConfig::default(),
        };
        if let Some(url) = &self.base_url {
            harness = harness.with_base_url(url.clone());
        }
        Ok(harness)
    }
}
