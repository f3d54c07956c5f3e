//! Completing items and reading their completion state

use tracing::debug;

use crate::driver::UiDriver;
use crate::locator::todo;
use crate::result::BddResult;

/// Class carried by a completed list item
pub const COMPLETED_CLASS: &str = "completed";

/// Marks items as done and reads their completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompleteTodoActions;

impl CompleteTodoActions {
    /// Click the checkbox of the first item containing `item`
    pub fn item_called(&self, driver: &mut dyn UiDriver, item: &str) -> BddResult<()> {
        debug!(item, "completing todo");
        let checkbox = driver.find_one(&todo::checkbox_for(item)?)?;
        driver.click(&checkbox)
    }

    /// Whether the first item containing `item` is marked completed.
    ///
    /// A present but incomplete item is `false`; a missing item is
    /// [`crate::BddError::ElementNotFound`].
    pub fn is_completed(&self, driver: &mut dyn UiDriver, item: &str) -> BddResult<bool> {
        let element = driver.find_one(&todo::listed_item_for(item)?)?;
        let class = driver.attribute(&element, "class")?;
        Ok(class.is_some_and(|c| c.split_whitespace().any(|token| token == COMPLETED_CLASS)))
    }
}
