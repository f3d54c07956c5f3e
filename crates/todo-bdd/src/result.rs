//! Result and error types for todo-bdd.

use thiserror::Error;

/// Result type for todo-bdd operations
pub type BddResult<T> = Result<T, BddError>;

/// Errors that can occur while matching, dispatching or executing a step
#[derive(Debug, Error)]
pub enum BddError {
    /// No registered pattern matched the step text
    #[error("Undefined step: no pattern matches \"{text}\"")]
    UnmatchedStep {
        /// Step text that failed to match
        text: String,
    },

    /// More than one pattern matched and no unique priority resolved it
    #[error("Ambiguous step \"{text}\" matches {} patterns: {}", candidates.len(), candidates.join(", "))]
    AmbiguousStep {
        /// Step text (or example phrase) that matched ambiguously
        text: String,
        /// Sources of all matching patterns
        candidates: Vec<String>,
    },

    /// A captured value could not be converted to its declared type
    #[error("Step parameter error in \"{step}\": {message}")]
    StepParameter {
        /// Step text
        step: String,
        /// Error message
        message: String,
    },

    /// The element could not be located on the current page
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Rendered locator expression
        locator: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Domain input cannot be turned into a safe selector
    #[error("Invalid locator input {input:?}: {reason}")]
    InvalidLocatorInput {
        /// Offending input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Handler expectation not met
    #[error("Assertion failed: {message} (expected {expected}, got {actual})")]
    AssertionFailure {
        /// Error message
        message: String,
        /// Expected value, rendered
        expected: String,
        /// Observed value, rendered
        actual: String,
    },

    /// Navigation error
    #[error("Navigation to {page} failed: {message}")]
    NavigationError {
        /// Page identifier that failed
        page: String,
        /// Error message
        message: String,
    },

    /// Step pattern failed to compile
    #[error("Invalid step pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Error message
        message: String,
    },

    /// Page content does not have the expected shape
    #[error("Unexpected page state: {message}")]
    UnexpectedPageState {
        /// Error message
        message: String,
    },

    /// Scenario file is malformed
    #[error("Scenario error: {message}")]
    Scenario {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BddError {
    /// Create an assertion failure carrying expected and actual values
    #[must_use]
    pub fn assertion(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AssertionFailure {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a step parameter error
    #[must_use]
    pub fn step_parameter(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepParameter {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Create an invalid locator input error
    #[must_use]
    pub fn invalid_locator(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLocatorInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error marks the step as undefined rather than failed
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::UnmatchedStep { .. })
    }
}
