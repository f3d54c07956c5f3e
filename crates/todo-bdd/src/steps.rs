//! The TodoMVC step vocabulary.
//!
//! Exactly one registry is built here; every binding declares the phrases it
//! is meant for, so an overlap between two bindings fails at build time
//! instead of surfacing mid-run.

use crate::assertion::Assertion;
use crate::result::BddResult;
use crate::simulator::PROMPT;
use crate::step::{Dispatcher, Keyword, StepArgs, StepRegistry};
use crate::world::TodoWorld;

/// Text the footer credits must contain
pub const CREDITS: &str = "TodoMVC";

/// Build the canonical step registry
pub fn registry() -> BddResult<StepRegistry> {
    StepRegistry::builder()
        .regex(Keyword::Given, "(.*) opens the Todo Application", opens_the_application)
        .example("James opens the Todo Application")
        .regex(Keyword::Given, "(?:.*) has not entered any todo items", has_not_entered_any_items)
        .example("Jane has not entered any todo items")
        .regex(Keyword::Given, "(?:.*) has a todo list containing", has_a_list_containing)
        .with_table()
        .example("Jane has a todo list containing")
        .when("she adds {string}", adds)
        .example("she adds 'buy milk'")
        .then("his/her todo list should contain:", list_should_contain)
        .with_table()
        .example("her todo list should contain:")
        .example("his todo list should contain:")
        .then("the remaining item count should show {string}", remaining_count_should_show)
        .example("the remaining item count should show '1 item left'")
        .when("he/she filters the list to show {word} tasks", filters_by)
        .example("she filters the list to show Active tasks")
        .when("he/she completes {string}", completes)
        .example("he completes 'walk dog'")
        .then(
            "the todo item called {string} should be marked as completed",
            should_be_completed,
        )
        .example("the todo item called 'walk dog' should be marked as completed")
        .then("he/she should see the credits in the footer", should_see_credits)
        .example("he should see the credits in the footer")
        .then("the page title should include {string}", title_should_include)
        .example("the page title should include 'TodoMVC'")
        .then("the application should suggest how to add them", should_suggest_how_to_add)
        .example("the application should suggest how to add them")
        .build()
}

/// Dispatcher over the canonical registry
pub fn dispatcher() -> BddResult<Dispatcher> {
    Ok(Dispatcher::new(registry()?))
}

fn opens_the_application(world: &mut TodoWorld, _: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    actions.navigate.to_the_todo_mvc_application(driver)
}

fn has_not_entered_any_items(world: &mut TodoWorld, _: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    actions.navigate.to_the_todo_mvc_application(driver)
}

fn has_a_list_containing(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    actions.navigate.to_the_todo_mvc_application(driver)?;
    actions.add_todo.items_called(driver, args.list(0)?)
}

fn adds(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    actions.add_todo.item_called(driver, args.string(0)?)
}

fn list_should_contain(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    let current = actions.todo_list.current_items(driver)?;
    Assertion::contains_all("todo list", &current, args.list(0)?)
}

fn remaining_count_should_show(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    let message = actions.todo_list.number_of_items_left_message(driver)?;
    Assertion::equals("remaining item count", &args.string(0)?, &message.as_str())
}

fn filters_by(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    actions.filter.by(driver, args.word(0)?)
}

fn completes(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    actions.complete_todo.item_called(driver, args.string(0)?)
}

fn should_be_completed(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let item = args.string(0)?;
    let (actions, driver) = world.parts();
    let completed = actions.complete_todo.is_completed(driver, item)?;
    Assertion::is_true(completed, &format!("{item:?} is marked as completed"))
}

fn should_see_credits(world: &mut TodoWorld, _: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    Assertion::contains("footer", &actions.layout.footer(driver)?, CREDITS)
}

fn title_should_include(world: &mut TodoWorld, args: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    Assertion::contains("page title", &actions.layout.title(driver)?, args.string(0)?)
}

fn should_suggest_how_to_add(world: &mut TodoWorld, _: &StepArgs) -> BddResult<()> {
    let (actions, driver) = world.parts();
    Assertion::equals("new todo prompt", &PROMPT, &actions.add_todo.prompt(driver)?.as_str())
}
