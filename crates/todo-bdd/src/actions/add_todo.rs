//! Adding items through the new-todo field

use tracing::debug;

use super::todo_list::items_left_or_zero;
use crate::driver::{self, UiDriver};
use crate::locator::{todo, validate_text};
use crate::result::BddResult;
use crate::wait::{self, WaitOptions};

/// Enters new todo items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddTodoActions {
    settle: WaitOptions,
}

impl AddTodoActions {
    /// Wait with `settle` for each entry to be counted
    #[must_use]
    pub const fn new(settle: WaitOptions) -> Self {
        Self { settle }
    }

    /// Type `item` into the new-todo field and submit it.
    ///
    /// Returns once the remaining count has gone up by one. The count covers
    /// every active item whatever filter is selected, so a new entry is seen
    /// even while the list hides it. A submission the page never records
    /// fails with [`crate::BddError::Timeout`].
    pub fn item_called(&self, driver: &mut dyn UiDriver, item: &str) -> BddResult<()> {
        validate_text(item)?;
        debug!(item, "adding todo");
        let input = driver::wait_for_one(driver, &todo::new_todo_input())?;
        let before = items_left_or_zero(driver)?;
        driver.type_text(&input, item)?;
        // typing re-renders, so the handle has to be looked up again
        let input = driver.find_one(&todo::new_todo_input())?;
        driver.press_enter(&input)?;

        wait::wait_until(&self.settle, || Ok(items_left_or_zero(driver)? > before))
    }

    /// Add several items, one at a time and in order
    pub fn items_called<S: AsRef<str>>(&self, driver: &mut dyn UiDriver, items: &[S]) -> BddResult<()> {
        items
            .iter()
            .try_for_each(|item| self.item_called(driver, item.as_ref()))
    }

    /// Placeholder text suggesting how to add an item
    pub fn prompt(&self, driver: &mut dyn UiDriver) -> BddResult<String> {
        let input = driver::wait_for_one(driver, &todo::new_todo_input())?;
        Ok(driver.attribute(&input, "placeholder")?.unwrap_or_default())
    }
}
