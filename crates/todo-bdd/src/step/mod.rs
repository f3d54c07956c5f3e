//! Step definitions: patterns, typed arguments, the registry and the
//! dispatcher that routes step text to handlers.
//!
//! ```text
//! step text ──► Dispatcher ──► StepRegistry::resolve ──► StepBinding
//!                   │                                       │
//!                   └──────── StepArgs ◄── StepPattern ◄────┘
//!                                │
//!                                ▼
//!                         Handler(world, args)
//! ```

pub mod args;
pub mod dispatcher;
pub mod pattern;
pub mod registry;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use args::{Param, ParamType, StepArgs};
pub use dispatcher::{DispatchState, Dispatcher};
pub use pattern::{PatternKind, StepPattern};
pub use registry::{Handler, StepBinding, StepRegistry, StepRegistryBuilder};

/// Gherkin step keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Context
    Given,
    /// Action
    When,
    /// Outcome
    Then,
    /// Continues the previous keyword
    And,
    /// Continues the previous keyword
    But,
    /// Keyword-agnostic binding
    #[serde(rename = "*")]
    Any,
}

impl Keyword {
    /// Keyword as written in feature files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Any => "*",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
