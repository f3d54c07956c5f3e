//! Observations of the todo list and its footer

use crate::driver::{self, UiDriver};
use crate::locator::todo;
use crate::result::{BddError, BddResult};

/// Reads the todo list and its remaining-count footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoListActions;

impl TodoListActions {
    /// Labels of the visible items, in display order.
    ///
    /// An empty list is a valid observation, so this never waits.
    pub fn current_items(&self, driver: &mut dyn UiDriver) -> BddResult<Vec<String>> {
        let labels = driver.find_all(&todo::todo_items())?;
        labels.iter().map(|label| driver.text(label)).collect()
    }

    /// Number shown in the remaining-count element
    pub fn number_of_items_left(&self, driver: &mut dyn UiDriver) -> BddResult<u64> {
        let text = driver::text_of(driver, &todo::items_left_count())?;
        parse_count(&text)
    }

    /// Full remaining-count message, e.g. "2 items left"
    pub fn number_of_items_left_message(&self, driver: &mut dyn UiDriver) -> BddResult<String> {
        driver::text_of(driver, &todo::items_left_message())
    }
}

/// Remaining count without waiting; the footer is absent on an empty list
pub(crate) fn items_left_or_zero(driver: &mut dyn UiDriver) -> BddResult<u64> {
    match driver.find_all(&todo::items_left_count())?.first() {
        Some(count) => parse_count(&driver.text(count)?),
        None => Ok(0),
    }
}

fn parse_count(text: &str) -> BddResult<u64> {
    text.trim()
        .parse()
        .map_err(|_| BddError::UnexpectedPageState {
            message: format!("remaining count {text:?} is not a number"),
        })
}
