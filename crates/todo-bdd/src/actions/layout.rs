//! Page chrome: title and footer

use crate::driver::{self, UiDriver};
use crate::locator::todo;
use crate::result::BddResult;

/// Reads page chrome outside the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutActions;

impl LayoutActions {
    /// Text of the info footer
    pub fn footer(&self, driver: &mut dyn UiDriver) -> BddResult<String> {
        driver::text_of(driver, &todo::footer())
    }

    /// Title of the current page
    pub fn title(&self, driver: &mut dyn UiDriver) -> BddResult<String> {
        driver.title()
    }
}
