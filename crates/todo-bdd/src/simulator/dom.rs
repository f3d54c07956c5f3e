//! Minimal DOM for the simulator: an arena of nodes in document order that
//! evaluates [`Selector`]s the way a browser would for the subset of CSS and
//! XPath the locator strategy emits.

use std::collections::{BTreeMap, BTreeSet};

use super::Filter;
use crate::driver::ElementHandle;
use crate::locator::{PathStep, Predicate, Selector};

/// What clicking or typing into an element does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The new-todo input
    NewTodo,
    /// Checkbox toggling the todo at an index
    Toggle(usize),
    /// Checkbox toggling every todo
    ToggleAll,
    /// Button deleting the todo at an index
    Destroy(usize),
    /// Filter link
    Filter(Filter),
    /// Button removing completed todos
    ClearCompleted,
}

#[derive(Debug, Clone)]
enum Content {
    Element(El),
    Text(String),
}

/// Element builder used to describe one render
#[derive(Debug, Clone)]
pub struct El {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    children: Vec<Content>,
    binding: Option<Binding>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
            binding: None,
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn class_if(self, condition: bool, class: &str) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn attr_if(self, condition: bool, name: &str, value: &str) -> Self {
        if condition {
            self.attr(name, value)
        } else {
            self
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Content::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: Self) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children
            .extend(children.into_iter().map(Content::Element));
        self
    }

    pub const fn bind(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<usize>,
    binding: Option<Binding>,
}

impl Node {
    const fn is_element(&self) -> bool {
        self.text.is_none()
    }
}

/// One immutable render of the page
#[derive(Debug, Clone)]
pub struct Document {
    render: u64,
    nodes: Vec<Node>,
}

impl Document {
    /// Flatten an element tree; node indices follow document order
    pub fn build(root: &El, render: u64) -> Self {
        let mut doc = Self {
            render,
            nodes: Vec::new(),
        };
        doc.push_element(root);
        doc
    }

    fn push_element(&mut self, el: &El) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            tag: el.tag.clone(),
            classes: el.classes.clone(),
            attrs: el.attrs.clone(),
            text: None,
            children: Vec::new(),
            binding: el.binding,
        });
        for child in &el.children {
            let child_idx = match child {
                Content::Element(child) => self.push_element(child),
                Content::Text(text) => {
                    self.nodes.push(Node {
                        tag: "#text".to_string(),
                        classes: Vec::new(),
                        attrs: BTreeMap::new(),
                        text: Some(text.clone()),
                        children: Vec::new(),
                        binding: None,
                    });
                    self.nodes.len() - 1
                }
            };
            self.nodes[idx].children.push(child_idx);
        }
        idx
    }

    /// Render counter this document belongs to
    pub const fn render(&self) -> u64 {
        self.render
    }

    /// Evaluate a selector, returning element indices in document order
    pub fn select(&self, selector: &Selector) -> Vec<usize> {
        match selector {
            Selector::LinkText(label) => (0..self.nodes.len())
                .filter(|&i| self.nodes[i].is_element() && self.nodes[i].tag == "a")
                .filter(|&i| self.text(i) == collapse(label))
                .collect(),
            Selector::Css(path) | Selector::XPath(path) => {
                let mut current: Vec<usize> = Vec::new();
                for (depth, step) in path.steps().iter().enumerate() {
                    let candidates: BTreeSet<usize> = if depth == 0 {
                        (0..self.nodes.len()).collect()
                    } else {
                        current
                            .iter()
                            .flat_map(|&i| self.descendants(i))
                            .collect()
                    };
                    current = candidates
                        .into_iter()
                        .filter(|&i| self.matches(i, step))
                        .collect();
                }
                current
            }
        }
    }

    fn descendants(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for &child in &self.nodes[idx].children {
            out.push(child);
            out.extend(self.descendants(child));
        }
        out
    }

    fn matches(&self, idx: usize, step: &PathStep) -> bool {
        let node = &self.nodes[idx];
        if !node.is_element() {
            return false;
        }
        if step.tag_name().is_some_and(|tag| tag != node.tag) {
            return false;
        }
        step.predicates().iter().all(|predicate| match predicate {
            Predicate::HasClass(class) => node.classes.iter().any(|c| c == class),
            Predicate::AttrEquals { name, value } => {
                self.attribute(idx, name).as_deref() == Some(value.as_str())
            }
            Predicate::ContainsText(text) => self.text(idx).contains(&collapse(text)),
        })
    }

    fn text_content(&self, idx: usize) -> String {
        let node = &self.nodes[idx];
        match &node.text {
            Some(text) => text.clone(),
            None => node
                .children
                .iter()
                .map(|&child| self.text_content(child))
                .collect(),
        }
    }

    /// Visible text: whitespace collapsed and trimmed
    pub fn text(&self, idx: usize) -> String {
        collapse(&self.text_content(idx))
    }

    /// Attribute value; `class` is synthesized from the class list
    pub fn attribute(&self, idx: usize, name: &str) -> Option<String> {
        let node = &self.nodes[idx];
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attrs.get(name).cloned()
    }

    pub fn binding(&self, idx: usize) -> Option<Binding> {
        self.nodes[idx].binding
    }

    pub fn tag(&self, idx: usize) -> &str {
        &self.nodes[idx].tag
    }

    /// Handle for a node, valid for this render only
    pub fn handle(&self, idx: usize) -> ElementHandle {
        ElementHandle::new(format!("r{}-e{idx}", self.render), self.nodes[idx].tag.clone())
    }

    /// Resolve a handle issued by this render
    pub fn resolve(&self, handle: &ElementHandle) -> Option<usize> {
        let prefix = format!("r{}-e", self.render);
        let idx: usize = handle.id.strip_prefix(&prefix)?.parse().ok()?;
        (idx < self.nodes.len() && self.nodes[idx].is_element()).then_some(idx)
    }
}

/// Runs of whitespace become one space; ends are trimmed
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Path;

    fn sample() -> Document {
        let root = El::new("body")
            .child(
                El::new("ul").class("todo-list").children([
                    El::new("li").class("completed").child(El::new("label").text("buy milk")),
                    El::new("li").child(El::new("label").text("walk dog")),
                ]),
            )
            .child(
                El::new("span")
                    .class("todo-count")
                    .child(El::new("strong").text("1"))
                    .text(" item left"),
            )
            .child(El::new("a").attr("href", "#/").text(" All "));
        Document::build(&root, 3)
    }

    #[test]
    fn test_css_descendant() {
        let doc = sample();
        let path = Path::root(PathStep::any().with_class("todo-list")).then(PathStep::tag("label"));
        let labels = doc.select(&Selector::Css(path));
        let texts: Vec<String> = labels.iter().map(|&i| doc.text(i)).collect();
        assert_eq!(texts, vec!["buy milk", "walk dog"]);
    }

    #[test]
    fn test_class_attribute_is_exact() {
        let doc = sample();
        let path = Path::root(PathStep::tag("ul").with_attr("class", "todo-list"));
        assert_eq!(doc.select(&Selector::XPath(path)).len(), 1);
        let partial = Path::root(PathStep::tag("ul").with_attr("class", "todo"));
        assert!(doc.select(&Selector::XPath(partial)).is_empty());
    }

    #[test]
    fn test_contains_text() {
        let doc = sample();
        let path = Path::root(PathStep::tag("li").containing("milk"));
        let found = doc.select(&Selector::XPath(path));
        assert_eq!(found.len(), 1);
        assert_eq!(doc.attribute(found[0], "class").as_deref(), Some("completed"));
    }

    #[test]
    fn test_contains_text_ignores_whitespace_runs() {
        let root = El::new("ul").child(El::new("li").child(El::new("label").text("buy  milk ")));
        let doc = Document::build(&root, 1);
        let label = doc.select(&Selector::Css(Path::root(PathStep::tag("label"))))[0];
        assert_eq!(doc.text(label), "buy milk");
        for needle in ["buy milk", "buy  milk", "buy \tmilk"] {
            let path = Path::root(PathStep::tag("li").containing(needle));
            assert_eq!(doc.select(&Selector::XPath(path)).len(), 1, "{needle:?}");
        }
        let path = Path::root(PathStep::tag("li").containing("buymilk"));
        assert!(doc.select(&Selector::XPath(path)).is_empty());
    }

    #[test]
    fn test_mixed_text_content() {
        let doc = sample();
        let path = Path::root(PathStep::any().with_class("todo-count"));
        let found = doc.select(&Selector::Css(path));
        assert_eq!(doc.text(found[0]), "1 item left");
    }

    #[test]
    fn test_link_text_trimmed_equality() {
        let doc = sample();
        assert_eq!(doc.select(&Selector::link_text("All")).len(), 1);
        assert!(doc.select(&Selector::link_text("Al")).is_empty());
    }

    #[test]
    fn test_handles_are_per_render() {
        let doc = sample();
        let handle = doc.handle(1);
        assert_eq!(doc.resolve(&handle), Some(1));
        let next = Document::build(&El::new("body"), 4);
        assert_eq!(next.resolve(&handle), None);
    }
}
