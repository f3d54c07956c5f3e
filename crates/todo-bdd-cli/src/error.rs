//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// One or more scenarios did not pass
    #[error("Scenario run failed: {message}")]
    ScenarioFailure {
        /// Error message
        message: String,
    },

    /// Feature files reference steps the registry cannot resolve
    #[error("Check failed: {message}")]
    Check {
        /// Error message
        message: String,
    },

    /// A feature file could not be read or parsed
    #[error("Cannot load feature {path}: {source}")]
    FeatureFile {
        /// File path
        path: String,
        /// Underlying library error
        source: todo_bdd::BddError,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Library error
    #[error("todo-bdd error: {0}")]
    Bdd(#[from] todo_bdd::BddError),

    /// Report serialization error
    #[error("Report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a scenario failure error
    #[must_use]
    pub fn scenario_failure(message: impl Into<String>) -> Self {
        Self::ScenarioFailure {
            message: message.into(),
        }
    }

    /// Create a check error
    #[must_use]
    pub fn check(message: impl Into<String>) -> Self {
        Self::Check {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_scenario_failure_error() {
        let err = CliError::scenario_failure("2 of 3 scenarios failed");
        assert!(err.to_string().contains("2 of 3"));
    }

    #[test]
    fn test_check_error() {
        let err = CliError::check("1 undefined step");
        assert!(err.to_string().starts_with("Check failed"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_feature_file_error() {
        let err = CliError::FeatureFile {
            path: "features/broken.yaml".to_string(),
            source: todo_bdd::BddError::Scenario {
                message: "feature has no name".to_string(),
            },
        };
        assert!(err.to_string().contains("features/broken.yaml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_bdd_error_from() {
        let err: CliError = todo_bdd::BddError::UnmatchedStep {
            text: "she dances".to_string(),
        }
        .into();
        assert!(err.to_string().contains("she dances"));
    }
}
