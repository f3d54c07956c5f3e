//! Per-scenario world handed to every step handler.

use std::fmt;

use crate::actions::Actions;
use crate::config::HarnessConfig;
use crate::driver::UiDriver;
use crate::simulator::TodoMvcSimulator;

/// One driver session plus the configured action classes.
///
/// A world lives for exactly one scenario; the runner builds a fresh one
/// for every scenario so no page state leaks between them.
pub struct TodoWorld {
    driver: Box<dyn UiDriver>,
    actions: Actions,
}

impl TodoWorld {
    /// Create a world around a driver session
    #[must_use]
    pub fn new(driver: Box<dyn UiDriver>, config: &HarnessConfig) -> Self {
        Self {
            driver,
            actions: Actions::new(config),
        }
    }

    /// World backed by a fresh in-memory simulator with default configuration
    #[must_use]
    pub fn simulated() -> Self {
        Self::simulated_with(&HarnessConfig::default())
    }

    /// World backed by a fresh in-memory simulator
    #[must_use]
    pub fn simulated_with(config: &HarnessConfig) -> Self {
        Self::new(Box::new(TodoMvcSimulator::new(config.clone())), config)
    }

    /// Action classes
    #[must_use]
    pub const fn actions(&self) -> &Actions {
        &self.actions
    }

    /// Driver session
    pub fn driver(&mut self) -> &mut dyn UiDriver {
        self.driver.as_mut()
    }

    /// Borrow the actions and the driver together, as handlers need both
    pub fn parts(&mut self) -> (&Actions, &mut dyn UiDriver) {
        (&self.actions, self.driver.as_mut())
    }
}

impl fmt::Debug for TodoWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoWorld")
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

/// Creates one world per scenario
pub trait WorldFactory {
    /// Build a fresh world
    fn create(&self) -> TodoWorld;
}

/// Factory producing simulator-backed worlds
#[derive(Debug, Clone, Default)]
pub struct SimulatorFactory {
    config: HarnessConfig,
}

impl SimulatorFactory {
    /// Create a factory for the given configuration
    #[must_use]
    pub const fn new(config: HarnessConfig) -> Self {
        Self { config }
    }
}

impl WorldFactory for SimulatorFactory {
    fn create(&self) -> TodoWorld {
        TodoWorld::simulated_with(&self.config)
    }
}

impl<F> WorldFactory for F
where
    F: Fn() -> TodoWorld,
{
    fn create(&self) -> TodoWorld {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worlds_are_isolated() {
        let factory = SimulatorFactory::default();
        let mut first = factory.create();
        {
            let (actions, driver) = first.parts();
            actions.navigate.to_the_todo_mvc_application(driver).unwrap();
            actions.add_todo.item_called(driver, "buy milk").unwrap();
        }
        let mut second = factory.create();
        let (actions, driver) = second.parts();
        actions.navigate.to_the_todo_mvc_application(driver).unwrap();
        assert!(actions.todo_list.current_items(driver).unwrap().is_empty());
    }

    #[test]
    fn test_closure_factory() {
        let factory = || TodoWorld::simulated_with(&HarnessConfig::new().with_element_timeout(10));
        let mut world = factory.create();
        assert!(world.driver().title().is_err());
    }

    #[test]
    fn test_configured_application_page() {
        let config = HarnessConfig::new()
            .with_page("react.app", "/examples/react/")
            .with_application_page("react.app");
        let mut world = SimulatorFactory::new(config).create();
        let (actions, driver) = world.parts();
        assert_eq!(actions.navigate.page(), "react.app");
        actions.navigate.to_the_todo_mvc_application(driver).unwrap();
        assert!(driver.current_url().unwrap().ends_with("/examples/react/"));
    }
}
