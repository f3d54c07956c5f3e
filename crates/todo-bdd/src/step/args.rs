//! Typed step arguments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::result::{BddError, BddResult};

/// Declared type of a capture slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamType {
    /// `{string}`: quoted text, delivered without its quotes
    String,
    /// Raw regex capture, delivered as-is
    Text,
    /// `{word}`: a single whitespace-free token
    Word,
    /// `{int}`: signed integer
    Int,
    /// Step table, first column of every row
    List,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Word => "word",
            Self::Int => "int",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// A converted argument value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Param {
    /// Text from `{string}` or a raw capture
    Str(String),
    /// Single token
    Word(String),
    /// Integer
    Int(i64),
    /// Ordered list of strings
    List(Vec<String>),
}

/// Arguments extracted from one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepArgs {
    text: String,
    params: Vec<Param>,
}

impl StepArgs {
    /// Create arguments for step text
    #[must_use]
    pub fn new(text: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }

    /// Step text the arguments came from
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All parameters, in declaration order
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    fn get(&self, index: usize) -> BddResult<&Param> {
        self.params.get(index).ok_or_else(|| {
            BddError::step_parameter(&self.text, format!("no parameter at position {index}"))
        })
    }

    fn mismatch(&self, index: usize, wanted: ParamType, found: &Param) -> BddError {
        BddError::step_parameter(
            &self.text,
            format!("parameter {index} is {found:?}, expected {wanted}"),
        )
    }

    /// Text parameter at `index`
    pub fn string(&self, index: usize) -> BddResult<&str> {
        match self.get(index)? {
            Param::Str(s) => Ok(s),
            other => Err(self.mismatch(index, ParamType::String, other)),
        }
    }

    /// Word parameter at `index`
    pub fn word(&self, index: usize) -> BddResult<&str> {
        match self.get(index)? {
            Param::Word(s) => Ok(s),
            other => Err(self.mismatch(index, ParamType::Word, other)),
        }
    }

    /// Integer parameter at `index`
    pub fn int(&self, index: usize) -> BddResult<i64> {
        match self.get(index)? {
            Param::Int(n) => Ok(*n),
            other => Err(self.mismatch(index, ParamType::Int, other)),
        }
    }

    /// List parameter at `index`
    pub fn list(&self, index: usize) -> BddResult<&[String]> {
        match self.get(index)? {
            Param::List(items) => Ok(items),
            other => Err(self.mismatch(index, ParamType::List, other)),
        }
    }
}
