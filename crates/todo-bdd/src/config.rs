//! Harness configuration: where the application lives and how long to wait.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::locator::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use crate::result::{BddError, BddResult};
use crate::wait::WaitOptions;

/// Page identifier of the application under test
pub const DEFAULT_APPLICATION_PAGE: &str = "angular.app";

/// Configuration shared by every scenario of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL that page paths are resolved against
    pub base_url: String,
    /// Page identifier opened by the navigation action
    pub application_page: String,
    /// Page identifier -> path (or absolute URL)
    pub pages: BTreeMap<String, String>,
    /// Bounded wait for elements to appear or settle
    pub element_timeout_ms: u64,
    /// Polling interval while waiting
    pub poll_interval_ms: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let mut pages = BTreeMap::new();
        pages.insert(
            DEFAULT_APPLICATION_PAGE.to_string(),
            "/examples/angularjs/".to_string(),
        );
        Self {
            base_url: "http://localhost:8080".to_string(),
            application_page: DEFAULT_APPLICATION_PAGE.to_string(),
            pages,
            element_timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl HarnessConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from YAML; missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> BddResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> BddResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Register a page identifier
    #[must_use]
    pub fn with_page(mut self, id: impl Into<String>, path: impl Into<String>) -> Self {
        self.pages.insert(id.into(), path.into());
        self
    }

    /// Set the page the navigation action opens
    #[must_use]
    pub fn with_application_page(mut self, id: impl Into<String>) -> Self {
        self.application_page = id.into();
        self
    }

    /// Set element timeout
    #[must_use]
    pub const fn with_element_timeout(mut self, timeout_ms: u64) -> Self {
        self.element_timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Wait options derived from the timeouts
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.element_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Resolve a page identifier to a URL
    pub fn url_for(&self, page: &str) -> BddResult<String> {
        let path = self.pages.get(page).ok_or_else(|| BddError::NavigationError {
            page: page.to_string(),
            message: "no page registered under this name".to_string(),
        })?;
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("file://") {
            return Ok(path.clone());
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            Ok(format!("{base}{path}"))
        } else {
            Ok(format!("{base}/{path}"))
        }
    }
}
