//! Locator abstraction for element selection.
//!
//! A [`Locator`] is pure data describing *how* to find an element, never
//! *what was found*. It carries a [`Selector`] (rendered to the CSS, XPath or
//! link-text expression a driver consumes), a [`MatchStrategy`] tag and
//! auto-wait [`LocatorOptions`].
//!
//! Structural selectors are kept as a [`Path`] of descendant steps rather
//! than raw strings so that they can be escaped safely when rendered and
//! evaluated directly by in-memory drivers.

pub mod todo;

use std::fmt;
use std::time::Duration;

use crate::result::{BddError, BddResult};

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// A condition on a single element within a [`PathStep`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Element's class list contains the class token
    HasClass(String),
    /// Attribute value equals exactly
    AttrEquals {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// Element's rendered text (including descendants) contains the text
    ContainsText(String),
}

/// One descendant step of a [`Path`]: an optional tag name plus predicates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathStep {
    tag: Option<String>,
    predicates: Vec<Predicate>,
}

impl PathStep {
    /// Step matching elements with the given tag
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            predicates: Vec::new(),
        }
    }

    /// Step matching any element
    #[must_use]
    pub const fn any() -> Self {
        Self {
            tag: None,
            predicates: Vec::new(),
        }
    }

    /// Require a class token
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.predicates.push(Predicate::HasClass(class.into()));
        self
    }

    /// Require an exact attribute value
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::AttrEquals {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Require the rendered text to contain `text`
    #[must_use]
    pub fn containing(mut self, text: impl Into<String>) -> Self {
        self.predicates.push(Predicate::ContainsText(text.into()));
        self
    }

    /// Tag name, `None` for any element
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Predicates of this step
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn to_css(&self) -> String {
        let mut out = self.tag.clone().unwrap_or_default();
        for predicate in &self.predicates {
            match predicate {
                Predicate::HasClass(class) => {
                    out.push('.');
                    out.push_str(class);
                }
                Predicate::AttrEquals { name, value } => {
                    out.push_str(&format!("[{name}={}]", css_string(value)));
                }
                Predicate::ContainsText(text) => {
                    out.push_str(&format!(":contains({})", css_string(text)));
                }
            }
        }
        if out.is_empty() {
            out.push('*');
        }
        out
    }

    fn to_xpath(&self) -> String {
        let mut out = self.tag.clone().unwrap_or_else(|| "*".to_string());
        for predicate in &self.predicates {
            match predicate {
                Predicate::HasClass(class) => out.push_str(&format!(
                    "[contains(concat(' ',normalize-space(@class),' '),{})]",
                    xpath_literal(&format!(" {class} "))
                )),
                Predicate::AttrEquals { name, value } => {
                    out.push_str(&format!("[@{name}={}]", xpath_literal(value)));
                }
                Predicate::ContainsText(text) => {
                    out.push_str(&format!("[contains(.,{})]", xpath_literal(text)));
                }
            }
        }
        out
    }
}

/// A chain of descendant steps, evaluated from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// Create a path starting with one step
    #[must_use]
    pub fn root(step: PathStep) -> Self {
        Self { steps: vec![step] }
    }

    /// Append a descendant step
    #[must_use]
    pub fn then(mut self, step: PathStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps in order, outermost first
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Render as a CSS descendant selector
    #[must_use]
    pub fn to_css(&self) -> String {
        self.steps
            .iter()
            .map(PathStep::to_css)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render as an XPath expression using the descendant axis
    #[must_use]
    pub fn to_xpath(&self) -> String {
        self.steps
            .iter()
            .map(|step| format!("//{}", step.to_xpath()))
            .collect()
    }
}

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., ".todo-list label")
    Css(Path),
    /// XPath selector
    XPath(Path),
    /// Anchor whose trimmed text equals the label exactly
    LinkText(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(path: Path) -> Self {
        Self::Css(path)
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(path: Path) -> Self {
        Self::XPath(path)
    }

    /// Create a link text selector
    #[must_use]
    pub fn link_text(label: impl Into<String>) -> Self {
        Self::LinkText(label.into())
    }

    /// The structural path, if this selector has one
    #[must_use]
    pub const fn path(&self) -> Option<&Path> {
        match self {
            Self::Css(path) | Self::XPath(path) => Some(path),
            Self::LinkText(_) => None,
        }
    }

    /// Render the selector expression a driver consumes
    #[must_use]
    pub fn expression(&self) -> String {
        match self {
            Self::Css(path) => path.to_css(),
            Self::XPath(path) => path.to_xpath(),
            Self::LinkText(label) => format!("link={label}"),
        }
    }
}

/// How a locator matches its domain parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStrategy {
    /// Fixed structure or exact label equality
    Exact,
    /// Match on an attribute value
    Attribute,
    /// Substring containment on rendered text
    ContainsText,
}

impl MatchStrategy {
    /// Short name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Attribute => "attribute",
            Self::ContainsText => "contains-text",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locator options for customizing auto-wait behavior
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
    /// Whether a single-element lookup fails when several elements match
    pub strict: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            strict: false,
        }
    }
}

/// A locator for finding elements on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    selector: Selector,
    strategy: MatchStrategy,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a selector and strategy
    #[must_use]
    pub fn new(selector: Selector, strategy: MatchStrategy) -> Self {
        Self {
            selector,
            strategy,
            options: LocatorOptions::default(),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Enable or disable strict single-element matching
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the match strategy
    #[must_use]
    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Rendered selector expression
    #[must_use]
    pub fn expression(&self) -> String {
        self.selector.expression()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.strategy, self.selector.expression())
    }
}

/// Validate free text that will be embedded in a selector.
///
/// Rejects empty or whitespace-only text and control characters; quotes are
/// allowed because every renderer escapes them.
pub fn validate_text(input: &str) -> BddResult<&str> {
    if input.trim().is_empty() {
        return Err(BddError::invalid_locator(input, "text must not be empty"));
    }
    if input.chars().any(char::is_control) {
        return Err(BddError::invalid_locator(
            input,
            "text must not contain control characters",
        ));
    }
    Ok(input)
}

/// Quote a string as an XPath 1.0 literal.
///
/// XPath has no escape sequences, so text containing both quote kinds is
/// split into a `concat()` of single-quoted and double-quoted parts.
#[must_use]
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    if !text.contains('"') {
        return format!("\"{text}\"");
    }
    let parts: Vec<String> = text
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Quote a string as a CSS string literal
#[must_use]
pub fn css_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    mod path_tests {
        use super::*;

        #[test]
        fn test_css_rendering() {
            let path = Path::root(PathStep::any().with_class("todo-list")).then(PathStep::tag("label"));
            assert_eq!(path.to_css(), ".todo-list label");
        }

        #[test]
        fn test_css_attribute_rendering() {
            let path = Path::root(PathStep::tag("input").with_attr("type", "checkbox"));
            assert_eq!(path.to_css(), "input[type=\"checkbox\"]");
        }

        #[test]
        fn test_xpath_rendering() {
            let path = Path::root(PathStep::tag("ul").with_attr("class", "todo-list"))
                .then(PathStep::tag("li").containing("buy milk"));
            assert_eq!(
                path.to_xpath(),
                "//ul[@class='todo-list']//li[contains(.,'buy milk')]"
            );
        }

        #[test]
        fn test_xpath_any_tag() {
            let path = Path::root(PathStep::any().containing("x"));
            assert_eq!(path.to_xpath(), "//*[contains(.,'x')]");
        }
    }

    mod literal_tests {
        use super::*;

        #[test]
        fn test_plain_literal() {
            assert_eq!(xpath_literal("buy milk"), "'buy milk'");
        }

        #[test]
        fn test_apostrophe_literal() {
            assert_eq!(xpath_literal("Bob's milk"), "\"Bob's milk\"");
        }

        #[test]
        fn test_mixed_quotes_literal() {
            assert_eq!(
                xpath_literal("say \"hi\" to Bob's cat"),
                "concat('say \"hi\" to Bob', \"'\", 's cat')"
            );
        }

        #[test]
        fn test_css_string_escapes() {
            assert_eq!(css_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_rejects_empty() {
            assert!(matches!(
                validate_text(""),
                Err(BddError::InvalidLocatorInput { .. })
            ));
            assert!(validate_text("   ").is_err());
        }

        #[test]
        fn test_rejects_control_chars() {
            assert!(validate_text("milk\nbread").is_err());
        }

        #[test]
        fn test_accepts_quotes() {
            assert_eq!(validate_text("Bob's \"best\"").unwrap(), "Bob's \"best\"");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_options() {
            let locator = Locator::new(Selector::link_text("All"), MatchStrategy::Exact)
                .with_timeout(Duration::from_secs(1))
                .with_poll_interval(Duration::from_millis(10))
                .with_strict(true);
            assert_eq!(locator.options().timeout, Duration::from_secs(1));
            assert_eq!(locator.options().poll_interval, Duration::from_millis(10));
            assert!(locator.options().strict);
        }

        #[test]
        fn test_locator_display() {
            let locator = Locator::new(Selector::link_text("Active"), MatchStrategy::Exact);
            assert_eq!(locator.to_string(), "[exact] link=Active");
        }

        #[test]
        fn test_link_text_has_no_path() {
            assert!(Selector::link_text("All").path().is_none());
        }
    }
}
