//! In-memory TodoMVC application implementing [`UiDriver`].
//!
//! Models the AngularJS TodoMVC page closely enough that locators, actions,
//! the dispatcher and the runner can all be exercised without a browser.
//! The whole page is re-rendered after every interaction and every render
//! issues fresh element ids, so a handle kept across an interaction is stale.

mod dom;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::dom::{Binding, Document, El};
use crate::config::HarnessConfig;
use crate::driver::{ElementHandle, UiDriver};
use crate::locator::Locator;
use crate::result::{BddError, BddResult};

/// Placeholder of the new-todo input
pub const PROMPT: &str = "What needs to be done?";

/// Title of the application page
pub const TITLE: &str = "AngularJS • TodoMVC";

/// Which todos the list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// Link label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    const fn href(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    const fn shows(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A todo entry in the application state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Entered title
    pub title: String,
    /// Whether it has been completed
    pub completed: bool,
}

/// In-memory TodoMVC page
#[derive(Debug)]
pub struct TodoMvcSimulator {
    config: HarnessConfig,
    unreachable: Vec<String>,
    current_url: Option<String>,
    todos: Vec<Todo>,
    filter: Filter,
    draft: String,
    renders: u64,
    document: Option<Document>,
    history: Vec<String>,
}

impl TodoMvcSimulator {
    /// Create a simulator serving every page in the configuration
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            unreachable: Vec::new(),
            current_url: None,
            todos: Vec::new(),
            filter: Filter::All,
            draft: String::new(),
            renders: 0,
            document: None,
            history: Vec::new(),
        }
    }

    /// Make a configured page fail to load
    #[must_use]
    pub fn with_unreachable(mut self, page: impl Into<String>) -> Self {
        self.unreachable.push(page.into());
        self
    }

    /// Current application state
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Active filter
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Number of renders so far
    #[must_use]
    pub const fn renders(&self) -> u64 {
        self.renders
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Check if a driver method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history.iter().any(|c| c.starts_with(method))
    }

    fn page(&self) -> BddResult<&Document> {
        self.document.as_ref().ok_or_else(|| BddError::UnexpectedPageState {
            message: "no page is open; navigate first".to_string(),
        })
    }

    fn resolve(&self, element: &ElementHandle) -> BddResult<(usize, Option<Binding>)> {
        let doc = self.page()?;
        let idx = doc.resolve(element).ok_or_else(|| BddError::ElementNotFound {
            locator: format!("stale element {}", element.id),
        })?;
        Ok((idx, doc.binding(idx)))
    }

    fn remaining(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    fn rerender(&mut self) {
        self.renders += 1;
        let root = self.view();
        self.document = Some(Document::build(&root, self.renders));
    }

    fn view(&self) -> El {
        let header = El::new("header")
            .class("header")
            .child(El::new("h1").text("todos"))
            .child(
                El::new("input")
                    .class("new-todo")
                    .attr("placeholder", PROMPT)
                    .attr("value", &self.draft)
                    .bind(Binding::NewTodo),
            );

        let mut app = El::new("section").class("todoapp").child(header);

        if !self.todos.is_empty() {
            let items = self
                .todos
                .iter()
                .enumerate()
                .filter(|(_, todo)| self.filter.shows(todo.completed))
                .map(|(index, todo)| {
                    El::new("li").class_if(todo.completed, "completed").child(
                        El::new("div")
                            .class("view")
                            .child(
                                El::new("input")
                                    .class("toggle")
                                    .attr("type", "checkbox")
                                    .attr_if(todo.completed, "checked", "checked")
                                    .bind(Binding::Toggle(index)),
                            )
                            .child(El::new("label").text(&todo.title))
                            .child(El::new("button").class("destroy").bind(Binding::Destroy(index))),
                    )
                });

            let all_done = self.remaining() == 0;
            let main = El::new("section")
                .class("main")
                .child(
                    El::new("input")
                        .class("toggle-all")
                        .attr("type", "checkbox")
                        .attr_if(all_done, "checked", "checked")
                        .bind(Binding::ToggleAll),
                )
                .child(El::new("ul").class("todo-list").children(items));

            let remaining = self.remaining();
            let noun = if remaining == 1 { "item" } else { "items" };
            let filters = [Filter::All, Filter::Active, Filter::Completed].map(|filter| {
                El::new("li").child(
                    El::new("a")
                        .class_if(filter == self.filter, "selected")
                        .attr("href", filter.href())
                        .text(filter.label())
                        .bind(Binding::Filter(filter)),
                )
            });
            let mut footer = El::new("footer")
                .class("footer")
                .child(
                    El::new("span")
                        .class("todo-count")
                        .child(El::new("strong").text(&remaining.to_string()))
                        .text(&format!(" {noun} left")),
                )
                .child(El::new("ul").class("filters").children(filters));
            if remaining < self.todos.len() {
                footer = footer.child(
                    El::new("button")
                        .class("clear-completed")
                        .text("Clear completed")
                        .bind(Binding::ClearCompleted),
                );
            }
            app = app.child(main).child(footer);
        }

        let info = El::new("footer")
            .class("info")
            .child(El::new("p").text("Double-click to edit a todo"))
            .child(
                El::new("p")
                    .text("Part of ")
                    .child(El::new("a").attr("href", "http://todomvc.com").text("TodoMVC")),
            );

        El::new("body").child(app).child(info)
    }
}

impl UiDriver for TodoMvcSimulator {
    fn navigate(&mut self, page: &str) -> BddResult<()> {
        self.history.push(format!("navigate:{page}"));
        let url = self.config.url_for(page)?;
        if self.unreachable.iter().any(|p| p == page) {
            return Err(BddError::NavigationError {
                page: page.to_string(),
                message: format!("{url} is unreachable"),
            });
        }
        debug!(page, url = %url, "loading page");
        self.current_url = Some(url);
        self.todos.clear();
        self.filter = Filter::All;
        self.draft.clear();
        self.rerender();
        Ok(())
    }

    fn find_one(&mut self, locator: &Locator) -> BddResult<ElementHandle> {
        let doc = self.page()?;
        let found = doc.select(locator.selector());
        if locator.options().strict && found.len() > 1 {
            return Err(BddError::UnexpectedPageState {
                message: format!("strict mode: {} elements match {locator}", found.len()),
            });
        }
        found
            .first()
            .map(|&idx| doc.handle(idx))
            .ok_or_else(|| BddError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    fn find_all(&mut self, locator: &Locator) -> BddResult<Vec<ElementHandle>> {
        let doc = self.page()?;
        Ok(doc
            .select(locator.selector())
            .into_iter()
            .map(|idx| doc.handle(idx))
            .collect())
    }

    fn click(&mut self, element: &ElementHandle) -> BddResult<()> {
        self.history.push(format!("click:{}", element.id));
        let (_, binding) = self.resolve(element)?;
        match binding {
            Some(Binding::Toggle(index)) => {
                if let Some(todo) = self.todos.get_mut(index) {
                    todo.completed = !todo.completed;
                }
            }
            Some(Binding::ToggleAll) => {
                let complete = self.remaining() > 0;
                for todo in &mut self.todos {
                    todo.completed = complete;
                }
            }
            Some(Binding::Destroy(index)) => {
                if index < self.todos.len() {
                    self.todos.remove(index);
                }
            }
            Some(Binding::Filter(filter)) => self.filter = filter,
            Some(Binding::ClearCompleted) => self.todos.retain(|t| !t.completed),
            Some(Binding::NewTodo) | None => {}
        }
        self.rerender();
        Ok(())
    }

    fn type_text(&mut self, element: &ElementHandle, text: &str) -> BddResult<()> {
        self.history.push(format!("type:{}:{text}", element.id));
        let (idx, binding) = self.resolve(element)?;
        if binding != Some(Binding::NewTodo) {
            let tag = self.page()?.tag(idx).to_string();
            return Err(BddError::UnexpectedPageState {
                message: format!("<{tag}> {} is not editable", element.id),
            });
        }
        self.draft.push_str(text);
        self.rerender();
        Ok(())
    }

    fn press_enter(&mut self, element: &ElementHandle) -> BddResult<()> {
        self.history.push(format!("enter:{}", element.id));
        let (_, binding) = self.resolve(element)?;
        if binding == Some(Binding::NewTodo) {
            let title = self.draft.trim().to_string();
            if !title.is_empty() {
                self.todos.push(Todo {
                    title,
                    completed: false,
                });
            }
            self.draft.clear();
        }
        self.rerender();
        Ok(())
    }

    fn text(&mut self, element: &ElementHandle) -> BddResult<String> {
        let (idx, _) = self.resolve(element)?;
        Ok(self.page()?.text(idx))
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> BddResult<Option<String>> {
        let (idx, _) = self.resolve(element)?;
        Ok(self.page()?.attribute(idx, name))
    }

    fn title(&mut self) -> BddResult<String> {
        self.page()?;
        Ok(TITLE.to_string())
    }

    fn current_url(&mut self) -> BddResult<String> {
        self.current_url
            .clone()
            .ok_or_else(|| BddError::UnexpectedPageState {
                message: "no page is open".to_string(),
            })
    }
}
