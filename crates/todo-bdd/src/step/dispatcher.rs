//! Step dispatcher.
//!
//! Routes one step at a time through a small state machine:
//!
//! ```text
//! Idle ──► Matching ──► Invoking ──► Idle
//!             │                      ▲
//!             └── unmatched/ambiguous┘
//! ```
//!
//! The handler's result is returned unmodified; classifying it as passed,
//! failed or undefined is the runner's job.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::registry::StepRegistry;
use crate::result::BddResult;
use crate::scenario::Step;
use crate::world::TodoWorld;

/// Dispatcher state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchState {
    /// Waiting for a step
    #[default]
    Idle,
    /// Resolving the step text against the registry
    Matching,
    /// Running the handler
    Invoking,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Matching => "matching",
            Self::Invoking => "invoking",
        };
        f.write_str(name)
    }
}

/// Dispatches steps to the handlers of one registry
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: StepRegistry,
    state: DispatchState,
}

impl Dispatcher {
    /// Create a dispatcher over a built registry
    #[must_use]
    pub const fn new(registry: StepRegistry) -> Self {
        Self {
            registry,
            state: DispatchState::Idle,
        }
    }

    /// Registry in use
    #[must_use]
    pub const fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Current state; `Idle` between steps
    #[must_use]
    pub const fn state(&self) -> DispatchState {
        self.state
    }

    fn transition(&mut self, next: DispatchState) {
        debug!(from = %self.state, to = %next, "dispatcher transition");
        self.state = next;
    }

    /// Match, extract and invoke the handler for a step
    pub fn dispatch(&mut self, world: &mut TodoWorld, step: &Step) -> BddResult<()> {
        let result = self.run(world, step);
        self.transition(DispatchState::Idle);
        result
    }

    fn run(&mut self, world: &mut TodoWorld, step: &Step) -> BddResult<()> {
        self.transition(DispatchState::Matching);
        let (handler, args) = {
            let binding = self.registry.resolve(&step.text).map_err(|err| {
                warn!(step = %step.text, error = %err, "step not dispatched");
                err
            })?;
            debug!(step = %step.text, pattern = %binding.pattern(), "step matched");
            (binding.handler(), binding.pattern().extract(&step.text, step.table.as_deref())?)
        };
        self.transition(DispatchState::Invoking);
        handler(world, &args)
    }
}
