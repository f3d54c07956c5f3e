//! Step patterns.
//!
//! Two source forms compile to one anchored [`Regex`]:
//!
//! - step expressions: literal text with `{string}`, `{word}` and `{int}`
//!   placeholders and `/` alternation between words (`he/she`);
//! - raw regular expressions, whose capture groups are all plain text.
//!
//! Either way the pattern must match the whole step text.

use std::fmt;

use regex::Regex;

use super::args::{Param, ParamType, StepArgs};
use crate::result::{BddError, BddResult};

const STRING_GROUP: &str = r#"("[^"]*"|'[^']*')"#;
const WORD_GROUP: &str = r"(\S+)";
const INT_GROUP: &str = r"(-?\d+)";

/// Source form of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Step expression with typed placeholders
    Expression,
    /// Raw regular expression
    Regex,
}

/// A compiled step pattern
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    kind: PatternKind,
    regex: Regex,
    params: Vec<ParamType>,
    takes_table: bool,
}

impl StepPattern {
    /// Compile a step expression
    pub fn expression(source: &str) -> BddResult<Self> {
        let (body, params) = translate_expression(source)?;
        Self::compile(source, PatternKind::Expression, &body, params)
    }

    /// Compile a raw regular expression
    pub fn regex(source: &str) -> BddResult<Self> {
        let probe = Regex::new(source).map_err(|e| invalid(source, e.to_string()))?;
        let groups = probe.captures_len() - 1;
        Self::compile(source, PatternKind::Regex, source, vec![ParamType::Text; groups])
    }

    fn compile(
        source: &str,
        kind: PatternKind,
        body: &str,
        params: Vec<ParamType>,
    ) -> BddResult<Self> {
        let regex = Regex::new(&format!("^(?:{body})$")).map_err(|e| invalid(source, e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            kind,
            regex,
            params,
            takes_table: false,
        })
    }

    /// Declare that the step carries a table, delivered as a trailing list parameter
    #[must_use]
    pub fn with_table(mut self) -> Self {
        self.takes_table = true;
        self
    }

    /// Pattern source as written
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source form
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Declared parameter types, in capture order (the table last)
    #[must_use]
    pub fn param_types(&self) -> Vec<ParamType> {
        let mut types = self.params.clone();
        if self.takes_table {
            types.push(ParamType::List);
        }
        types
    }

    /// Whether the step must carry a table
    #[must_use]
    pub const fn takes_table(&self) -> bool {
        self.takes_table
    }

    /// Whether the pattern matches the whole text
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Extract typed arguments from matching text.
    ///
    /// `table` is the step's table; its first column becomes the list
    /// parameter. A missing or unexpected table is a parameter error.
    pub fn extract(&self, text: &str, table: Option<&[Vec<String>]>) -> BddResult<StepArgs> {
        let captures = self.regex.captures(text).ok_or_else(|| BddError::UnmatchedStep {
            text: text.to_string(),
        })?;

        let mut params = Vec::with_capacity(self.params.len() + 1);
        for (index, param_type) in self.params.iter().enumerate() {
            let raw = captures.get(index + 1).map_or("", |m| m.as_str());
            params.push(convert(text, *param_type, raw)?);
        }

        match (self.takes_table, table) {
            (true, Some(rows)) => params.push(Param::List(
                rows.iter().filter_map(|row| row.first().cloned()).collect(),
            )),
            (true, None) => {
                return Err(BddError::step_parameter(text, "step requires a table"));
            }
            (false, Some(_)) => {
                return Err(BddError::step_parameter(text, "step does not take a table"));
            }
            (false, None) => {}
        }

        Ok(StepArgs::new(text, params))
    }
}

impl PartialEq for StepPattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.source == other.source && self.takes_table == other.takes_table
    }
}

impl Eq for StepPattern {}

impl fmt::Display for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn invalid(source: &str, message: impl Into<String>) -> BddError {
    BddError::InvalidPattern {
        pattern: source.to_string(),
        message: message.into(),
    }
}

fn convert(step: &str, param_type: ParamType, raw: &str) -> BddResult<Param> {
    match param_type {
        ParamType::String => Ok(Param::Str(strip_quotes(raw).to_string())),
        ParamType::Text => Ok(Param::Str(raw.to_string())),
        ParamType::Word => Ok(Param::Word(raw.to_string())),
        ParamType::Int => raw
            .parse()
            .map(Param::Int)
            .map_err(|e| BddError::step_parameter(step, format!("{raw:?} is not an integer: {e}"))),
        ParamType::List => Err(BddError::step_parameter(step, "lists only come from tables")),
    }
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Translate a step expression into a regex body and its parameter types
fn translate_expression(source: &str) -> BddResult<(String, Vec<ParamType>)> {
    let mut body = String::new();
    let mut params = Vec::new();
    let mut word = String::new();
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                push_word(&mut body, &mut word, source)?;
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(invalid(source, "unterminated '{'")),
                    }
                }
                let (group, param_type) = match name.as_str() {
                    "string" => (STRING_GROUP, ParamType::String),
                    "word" => (WORD_GROUP, ParamType::Word),
                    "int" => (INT_GROUP, ParamType::Int),
                    other => return Err(invalid(source, format!("unknown parameter type {{{other}}}"))),
                };
                body.push_str(group);
                params.push(param_type);
            }
            '}' => return Err(invalid(source, "unbalanced '}'")),
            c if c.is_whitespace() => {
                push_word(&mut body, &mut word, source)?;
                body.push_str(&regex::escape(&c.to_string()));
            }
            c => word.push(c),
        }
    }
    push_word(&mut body, &mut word, source)?;
    Ok((body, params))
}

/// Flush a pending word, expanding `a/b` alternation
fn push_word(body: &mut String, word: &mut String, source: &str) -> BddResult<()> {
    if word.is_empty() {
        return Ok(());
    }
    if word.contains('/') {
        let alternatives: Vec<&str> = word.split('/').collect();
        if alternatives.iter().any(|a| a.is_empty()) {
            return Err(invalid(source, format!("empty alternative in {word:?}")));
        }
        let escaped: Vec<String> = alternatives.iter().map(|a| regex::escape(a)).collect();
        body.push_str(&format!("(?:{})", escaped.join("|")));
    } else {
        body.push_str(&regex::escape(word));
    }
    word.clear();
    Ok(())
}
