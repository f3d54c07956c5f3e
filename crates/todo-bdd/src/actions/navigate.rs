//! Opening the application page

use tracing::debug;

use crate::driver::UiDriver;
use crate::result::BddResult;

/// Opens the application under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateActions {
    page: String,
}

impl NavigateActions {
    /// Navigate to the given page identifier
    #[must_use]
    pub fn new(page: impl Into<String>) -> Self {
        Self { page: page.into() }
    }

    /// Page identifier this action opens
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Open the TodoMVC application, replacing the current page
    pub fn to_the_todo_mvc_application(&self, driver: &mut dyn UiDriver) -> BddResult<()> {
        debug!(page = %self.page, "opening application");
        driver.navigate(&self.page)
    }
}
