//! Locator strategy for the TodoMVC page.
//!
//! Pure functions from domain concepts ("the checkbox for item X") to
//! [`Locator`]s. The same input always produces an equal locator, so actions
//! and step handlers can be tested without a live page.

use super::{validate_text, Locator, MatchStrategy, Path, PathStep, Selector};
use crate::result::BddResult;

fn todo_list() -> PathStep {
    PathStep::tag("ul").with_attr("class", "todo-list")
}

fn listed_item_path(item: &str) -> BddResult<Path> {
    let item = validate_text(item)?;
    Ok(Path::root(todo_list()).then(PathStep::tag("li").containing(item)))
}

/// Labels of every listed todo item, in DOM order
#[must_use]
pub fn todo_items() -> Locator {
    Locator::new(
        Selector::css(Path::root(PathStep::any().with_class("todo-list")).then(PathStep::tag("label"))),
        MatchStrategy::Exact,
    )
}

/// The bold number inside the remaining-count message
#[must_use]
pub fn items_left_count() -> Locator {
    Locator::new(
        Selector::css(Path::root(PathStep::any().with_class("todo-count")).then(PathStep::tag("strong"))),
        MatchStrategy::Exact,
    )
}

/// The whole remaining-count message ("2 items left")
#[must_use]
pub fn items_left_message() -> Locator {
    Locator::new(
        Selector::css(Path::root(PathStep::any().with_class("todo-count"))),
        MatchStrategy::Exact,
    )
}

/// The input used to enter new todo items
#[must_use]
pub fn new_todo_input() -> Locator {
    Locator::new(
        Selector::css(Path::root(PathStep::any().with_class("new-todo"))),
        MatchStrategy::Exact,
    )
}

/// The page footer carrying the credits
#[must_use]
pub fn footer() -> Locator {
    Locator::new(
        Selector::css(Path::root(PathStep::any().with_class("info"))),
        MatchStrategy::Exact,
    )
}

/// The list item whose rendered text contains `item`.
///
/// This is a containment match, not equality: `"milk"` also locates
/// `"buy milk"`, so when one item's text is a substring of another's the
/// locator matches both and single-element lookups take the first in DOM
/// order.
pub fn listed_item_for(item: &str) -> BddResult<Locator> {
    Ok(Locator::new(
        Selector::xpath(listed_item_path(item)?),
        MatchStrategy::ContainsText,
    ))
}

/// The completion checkbox inside the list item containing `item`
pub fn checkbox_for(item: &str) -> BddResult<Locator> {
    let path = listed_item_path(item)?.then(PathStep::tag("input").with_attr("type", "checkbox"));
    Ok(Locator::new(Selector::xpath(path), MatchStrategy::Attribute))
}

/// The filter link whose label equals `label` exactly
pub fn filter_button(label: &str) -> BddResult<Locator> {
    let label = validate_text(label)?;
    Ok(Locator::new(Selector::link_text(label), MatchStrategy::Exact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::BddError;

    #[test]
    fn test_static_locators() {
        assert_eq!(todo_items().expression(), ".todo-list label");
        assert_eq!(items_left_count().expression(), ".todo-count strong");
        assert_eq!(items_left_message().expression(), ".todo-count");
        assert_eq!(new_todo_input().expression(), ".new-todo");
        assert_eq!(footer().expression(), ".info");
    }

    #[test]
    fn test_listed_item_xpath() {
        let locator = listed_item_for("buy milk").unwrap();
        assert_eq!(
            locator.expression(),
            "//ul[@class='todo-list']//li[contains(.,'buy milk')]"
        );
        assert_eq!(locator.strategy(), MatchStrategy::ContainsText);
    }

    #[test]
    fn test_checkbox_xpath() {
        let locator = checkbox_for("walk dog").unwrap();
        assert_eq!(
            locator.expression(),
            "//ul[@class='todo-list']//li[contains(.,'walk dog')]//input[@type='checkbox']"
        );
        assert_eq!(locator.strategy(), MatchStrategy::Attribute);
    }

    #[test]
    fn test_quotes_are_escaped() {
        let locator = listed_item_for("Bob's milk").unwrap();
        assert!(locator.expression().contains("contains(.,\"Bob's milk\")"));
    }

    #[test]
    fn test_empty_item_rejected() {
        assert!(matches!(
            listed_item_for(""),
            Err(BddError::InvalidLocatorInput { .. })
        ));
        assert!(checkbox_for(" ").is_err());
        assert!(filter_button("").is_err());
    }

    #[test]
    fn test_filter_is_exact_link_text() {
        let locator = filter_button("Completed").unwrap();
        assert_eq!(locator.selector(), &Selector::link_text("Completed"));
        assert_eq!(locator.strategy(), MatchStrategy::Exact);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(listed_item_for("a").unwrap(), listed_item_for("a").unwrap());
        assert_ne!(listed_item_for("a").unwrap(), listed_item_for("b").unwrap());
        assert_ne!(listed_item_for("a").unwrap(), checkbox_for("a").unwrap());
    }
}
