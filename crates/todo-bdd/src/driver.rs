//! UiDriver - the browser automation capability consumed by actions.
//!
//! The driver owns the single *current page*. Actions never cache what it
//! returns: an [`ElementHandle`] is only valid for the render that produced
//! it, and a handle used after the page re-rendered fails with
//! [`BddError::ElementNotFound`].
//!
//! ```text
//! Step handler ──► Action ──► Locator ──► UiDriver ──► live page
//!                     ▲                      │
//!                     └──── observed state ──┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locator::Locator;
use crate::result::{BddError, BddResult};
use crate::wait::{self, WaitOptions};

/// Element handle for DOM interactions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Unique identifier for the element within one render
    pub id: String,
    /// Element tag name
    pub tag_name: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
        }
    }
}

/// Synchronous driver for one browser session.
///
/// Implementations may poll internally up to a configured timeout; exceeding
/// it surfaces as [`BddError::ElementNotFound`] or [`BddError::Timeout`].
pub trait UiDriver: Send {
    /// Replace the current page with the page registered under `page`
    fn navigate(&mut self, page: &str) -> BddResult<()>;

    /// Find the first element matching the locator
    fn find_one(&mut self, locator: &Locator) -> BddResult<ElementHandle>;

    /// Find all matching elements, in document order
    fn find_all(&mut self, locator: &Locator) -> BddResult<Vec<ElementHandle>>;

    /// Click an element
    fn click(&mut self, element: &ElementHandle) -> BddResult<()>;

    /// Type text into an element
    fn type_text(&mut self, element: &ElementHandle, text: &str) -> BddResult<()>;

    /// Press Enter while the element has focus
    fn press_enter(&mut self, element: &ElementHandle) -> BddResult<()>;

    /// Rendered text content of an element
    fn text(&mut self, element: &ElementHandle) -> BddResult<String>;

    /// Attribute value, `None` when absent
    fn attribute(&mut self, element: &ElementHandle, name: &str) -> BddResult<Option<String>>;

    /// Title of the current page
    fn title(&mut self) -> BddResult<String>;

    /// URL of the current page
    fn current_url(&mut self) -> BddResult<String>;
}

/// Wait until at least one element matches, returning all matches.
///
/// Times out as [`BddError::ElementNotFound`] for the locator.
pub fn wait_for_all(driver: &mut dyn UiDriver, locator: &Locator) -> BddResult<Vec<ElementHandle>> {
    let options = WaitOptions::from(locator.options());
    debug!(locator = %locator, timeout_ms = options.timeout_ms, "waiting for element");
    match wait::poll(&options, || {
        let found = driver.find_all(locator)?;
        Ok((!found.is_empty()).then_some(found))
    }) {
        Err(BddError::Timeout { .. }) => Err(BddError::ElementNotFound {
            locator: locator.to_string(),
        }),
        other => other,
    }
}

/// Wait until an element matches, returning the first match
pub fn wait_for_one(driver: &mut dyn UiDriver, locator: &Locator) -> BddResult<ElementHandle> {
    let mut found = wait_for_all(driver, locator)?;
    if locator.options().strict && found.len() > 1 {
        return Err(BddError::UnexpectedPageState {
            message: format!("strict mode: {} elements match {locator}", found.len()),
        });
    }
    Ok(found.swap_remove(0))
}

/// Read the text of the first element matching the locator
pub fn text_of(driver: &mut dyn UiDriver, locator: &Locator) -> BddResult<String> {
    let element = driver.find_one(locator)?;
    driver.text(&element)
}
