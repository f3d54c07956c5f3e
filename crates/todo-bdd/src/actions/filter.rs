//! Switching the list filter

use tracing::debug;

use crate::driver::UiDriver;
use crate::locator::todo;
use crate::result::BddResult;

/// Switches between the All / Active / Completed views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterItemsActions;

impl FilterItemsActions {
    /// Click the filter link whose text is exactly `label`
    pub fn by(&self, driver: &mut dyn UiDriver, label: &str) -> BddResult<()> {
        debug!(label, "filtering list");
        let link = driver.find_one(&todo::filter_button(label)?)?;
        driver.click(&link)
    }
}
