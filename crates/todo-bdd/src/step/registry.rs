//! Step registry.
//!
//! Bindings are assembled with [`StepRegistryBuilder`] and frozen by
//! [`StepRegistryBuilder::build`]. Resolution evaluates the whole match set:
//! one match dispatches, several matches are settled by a unique highest
//! priority and are otherwise ambiguous. Registration order never decides.

use std::collections::HashMap;
use std::fmt;

use super::args::StepArgs;
use super::pattern::StepPattern;
use super::Keyword;
use crate::result::{BddError, BddResult};
use crate::world::TodoWorld;

/// Step handler; stateless apart from the world it is given
pub type Handler = fn(&mut TodoWorld, &StepArgs) -> BddResult<()>;

/// A pattern bound to its handler
#[derive(Clone)]
pub struct StepBinding {
    keyword: Keyword,
    pattern: StepPattern,
    handler: Handler,
    priority: i32,
    examples: Vec<String>,
}

impl StepBinding {
    /// Keyword the binding was registered under
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Compiled pattern
    #[must_use]
    pub const fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Handler function
    #[must_use]
    pub const fn handler(&self) -> Handler {
        self.handler
    }

    /// Priority used when several bindings match
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Example phrases the binding must match
    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}

impl fmt::Debug for StepBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepBinding")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern.source())
            .field("priority", &self.priority)
            .field("examples", &self.examples)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for StepBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.pattern)
    }
}

/// Immutable set of step bindings
#[derive(Debug, Clone)]
pub struct StepRegistry {
    bindings: Vec<StepBinding>,
}

impl StepRegistry {
    /// Start assembling a registry
    #[must_use]
    pub fn builder() -> StepRegistryBuilder {
        StepRegistryBuilder::default()
    }

    /// All bindings, in registration order
    #[must_use]
    pub fn bindings(&self) -> &[StepBinding] {
        &self.bindings
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Every binding whose pattern matches the whole text
    #[must_use]
    pub fn matches(&self, text: &str) -> Vec<&StepBinding> {
        self.bindings
            .iter()
            .filter(|binding| binding.pattern.is_match(text))
            .collect()
    }

    /// Select the binding for step text
    pub fn resolve(&self, text: &str) -> BddResult<&StepBinding> {
        let matches = self.matches(text);
        match matches.as_slice() {
            [] => Err(BddError::UnmatchedStep {
                text: text.to_string(),
            }),
            [only] => Ok(*only),
            _ => {
                let top = matches.iter().map(|b| b.priority).max().unwrap_or_default();
                let winners: Vec<&&StepBinding> =
                    matches.iter().filter(|b| b.priority == top).collect();
                if let [winner] = winners.as_slice() {
                    Ok(**winner)
                } else {
                    Err(BddError::AmbiguousStep {
                        text: text.to_string(),
                        candidates: matches.iter().map(|b| b.pattern.source().to_string()).collect(),
                    })
                }
            }
        }
    }
}

/// Builder for [`StepRegistry`].
///
/// Compilation errors are collected and reported by [`Self::build`], so
/// bindings can be chained without intermediate `?`. The modifiers
/// ([`Self::with_table`], [`Self::priority`], [`Self::example`]) apply to
/// the most recently added binding.
#[derive(Debug, Default)]
pub struct StepRegistryBuilder {
    bindings: Vec<StepBinding>,
    errors: Vec<BddError>,
    last_ok: bool,
}

impl StepRegistryBuilder {
    fn add(mut self, keyword: Keyword, pattern: BddResult<StepPattern>, handler: Handler) -> Self {
        match pattern {
            Ok(pattern) => {
                self.bindings.push(StepBinding {
                    keyword,
                    pattern,
                    handler,
                    priority: 0,
                    examples: Vec::new(),
                });
                self.last_ok = true;
            }
            Err(err) => {
                self.errors.push(err);
                self.last_ok = false;
            }
        }
        self
    }

    fn last(&mut self) -> Option<&mut StepBinding> {
        if self.last_ok {
            self.bindings.last_mut()
        } else {
            None
        }
    }

    /// Bind a `Given` step expression
    #[must_use]
    pub fn given(self, expression: &str, handler: Handler) -> Self {
        self.add(Keyword::Given, StepPattern::expression(expression), handler)
    }

    /// Bind a `When` step expression
    #[must_use]
    pub fn when(self, expression: &str, handler: Handler) -> Self {
        self.add(Keyword::When, StepPattern::expression(expression), handler)
    }

    /// Bind a `Then` step expression
    #[must_use]
    pub fn then(self, expression: &str, handler: Handler) -> Self {
        self.add(Keyword::Then, StepPattern::expression(expression), handler)
    }

    /// Bind a step expression under any keyword
    #[must_use]
    pub fn step(self, expression: &str, handler: Handler) -> Self {
        self.add(Keyword::Any, StepPattern::expression(expression), handler)
    }

    /// Bind a raw regular expression
    #[must_use]
    pub fn regex(self, keyword: Keyword, regex: &str, handler: Handler) -> Self {
        self.add(keyword, StepPattern::regex(regex), handler)
    }

    /// The last binding consumes a table
    #[must_use]
    pub fn with_table(mut self) -> Self {
        if let Some(binding) = self.last() {
            binding.pattern = binding.pattern.clone().with_table();
        }
        self
    }

    /// Set the priority of the last binding (default 0)
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        if let Some(binding) = self.last() {
            binding.priority = priority;
        }
        self
    }

    /// Declare an example phrase the last binding must match
    #[must_use]
    pub fn example(mut self, phrase: &str) -> Self {
        if let Some(binding) = self.last() {
            binding.examples.push(phrase.to_string());
        }
        self
    }

    /// Freeze the registry.
    ///
    /// Fails on the first pattern that did not compile, on two bindings with
    /// the same pattern, on an example its own binding does not match, and
    /// on an example matched ambiguously.
    pub fn build(self) -> BddResult<StepRegistry> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }

        let mut seen: HashMap<&str, &StepPattern> = HashMap::new();
        for binding in &self.bindings {
            let source = binding.pattern.source();
            if let Some(previous) = seen.insert(source, &binding.pattern) {
                return Err(BddError::AmbiguousStep {
                    text: source.to_string(),
                    candidates: vec![previous.source().to_string(), source.to_string()],
                });
            }
        }

        let registry = StepRegistry {
            bindings: self.bindings,
        };
        for binding in &registry.bindings {
            for example in &binding.examples {
                if !binding.pattern.is_match(example) {
                    return Err(BddError::InvalidPattern {
                        pattern: binding.pattern.source().to_string(),
                        message: format!("does not match its example {example:?}"),
                    });
                }
                registry.resolve(example)?;
            }
        }
        Ok(registry)
    }
}
