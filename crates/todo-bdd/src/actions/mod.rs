//! Action classes: reusable page interactions grouped by feature area.
//!
//! Actions hold configuration only. They never cache elements or page
//! content; every operation takes the driver session explicitly and
//! re-resolves its locators against the live page, so two calls made
//! around a re-render both observe the current DOM.

mod add_todo;
mod complete_todo;
mod filter;
mod layout;
mod navigate;
mod todo_list;

pub use add_todo::AddTodoActions;
pub use complete_todo::CompleteTodoActions;
pub use filter::FilterItemsActions;
pub use layout::LayoutActions;
pub use navigate::NavigateActions;
pub use todo_list::TodoListActions;

use crate::config::HarnessConfig;

/// Every action class, configured for one run
#[derive(Debug, Clone)]
pub struct Actions {
    /// Opening the application
    pub navigate: NavigateActions,
    /// Entering todo items
    pub add_todo: AddTodoActions,
    /// Reading the list
    pub todo_list: TodoListActions,
    /// Completing items
    pub complete_todo: CompleteTodoActions,
    /// Filtering the list
    pub filter: FilterItemsActions,
    /// Page chrome
    pub layout: LayoutActions,
}

impl Actions {
    /// Configure every action class from the harness configuration
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            navigate: NavigateActions::new(config.application_page.clone()),
            add_todo: AddTodoActions::new(config.wait_options()),
            todo_list: TodoListActions,
            complete_todo: CompleteTodoActions,
            filter: FilterItemsActions,
            layout: LayoutActions,
        }
    }
}

impl Default for Actions {
    fn default() -> Self {
        Self::new(&HarnessConfig::default())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::HarnessConfig;
    use crate::driver::UiDriver;
    use crate::simulator::TodoMvcSimulator;

    /// Simulator already showing the application page
    pub fn open_app() -> TodoMvcSimulator {
        let mut sim = TodoMvcSimulator::new(HarnessConfig::default());
        sim.navigate("angular.app").unwrap();
        sim
    }
}
