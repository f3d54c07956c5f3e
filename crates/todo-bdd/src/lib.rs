//! todo-bdd: behavior-driven UI harness for the TodoMVC application
//!
//! Human-readable scenario steps ("she adds 'buy milk'") are matched against
//! registered step patterns, dispatched to handlers, and carried out through
//! stateless action classes that locate and drive elements on the current
//! page.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      TODO-BDD Architecture                       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌────────────┐   ┌──────────┐   ┌────────────┐   │
//! │  │ Scenario │──►│ Dispatcher │──►│ Actions  │──►│ UiDriver   │   │
//! │  │ (YAML)   │   │ + Registry │   │ Locators │   │ (simulator │   │
//! │  │          │   │            │   │          │   │  or real)  │   │
//! │  └──────────┘   └────────────┘   └──────────┘   └────────────┘   │
//! │        ▲                                              │          │
//! │        └───────────── ScenarioRunner reports ◄────────┘          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Action classes grouped by feature area
#[allow(clippy::missing_errors_doc, clippy::unused_self)]
pub mod actions;
mod assertion;
mod config;
#[allow(clippy::missing_errors_doc)]
mod driver;
/// Locators and the TodoMVC locator strategy
#[allow(clippy::missing_errors_doc)]
pub mod locator;
mod result;
#[allow(clippy::missing_errors_doc)]
mod runner;
#[allow(clippy::missing_errors_doc)]
mod scenario;
/// In-memory TodoMVC application
#[allow(clippy::missing_errors_doc, clippy::missing_const_for_fn)]
pub mod simulator;
/// Step patterns, registry and dispatcher
#[allow(clippy::missing_errors_doc)]
pub mod step;
/// The canonical TodoMVC step vocabulary
#[allow(clippy::missing_errors_doc, clippy::unnecessary_wraps)]
pub mod steps;
#[allow(clippy::missing_errors_doc)]
mod wait;
mod world;

pub use actions::{
    Actions, AddTodoActions, CompleteTodoActions, FilterItemsActions, LayoutActions,
    NavigateActions, TodoListActions,
};
pub use assertion::Assertion;
pub use config::{HarnessConfig, DEFAULT_APPLICATION_PAGE};
pub use driver::{text_of, wait_for_all, wait_for_one, ElementHandle, UiDriver};
pub use locator::{
    css_string, validate_text, xpath_literal, Locator, LocatorOptions, MatchStrategy, Path,
    PathStep, Predicate, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use result::{BddError, BddResult};
pub use runner::{FeatureReport, ScenarioReport, ScenarioRunner, StepOutcome, StepReport};
pub use scenario::{Feature, Scenario, Step};
pub use simulator::{Filter, Todo, TodoMvcSimulator};
pub use step::{
    DispatchState, Dispatcher, Handler, Keyword, Param, ParamType, PatternKind, StepArgs,
    StepBinding, StepPattern, StepRegistry, StepRegistryBuilder,
};
pub use wait::{poll, wait_until, WaitOptions};
pub use world::{SimulatorFactory, TodoWorld, WorldFactory};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::*;
    pub use super::assertion::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::locator::*;
    pub use super::result::*;
    pub use super::runner::*;
    pub use super::scenario::*;
    pub use super::simulator::{Filter, Todo, TodoMvcSimulator};
    pub use super::step::*;
    pub use super::wait::*;
    pub use super::world::*;
}
