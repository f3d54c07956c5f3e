//! Feature files: scenarios and their steps, loaded from YAML.
//!
//! ```yaml
//! name: Completing todos
//! background:
//!   - Given Jane opens the Todo Application
//! scenarios:
//!   - name: Mark an item done
//!     steps:
//!       - When she adds 'buy milk'
//!       - step: "Then her todo list should contain:"
//!         table: [buy milk]
//! ```
//!
//! A step is either a single line starting with its keyword or a mapping
//! with `step` and `table`. Table rows may be a list of cells or one cell.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::result::{BddError, BddResult};
use crate::step::Keyword;

/// A feature: shared background plus scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Steps run before every scenario
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub background: Vec<Step>,
    /// Scenarios, in file order
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// Parse a feature from YAML
    pub fn from_yaml_str(yaml: &str) -> BddResult<Self> {
        let feature: Self = serde_yaml_ng::from_str(yaml)?;
        feature.validate()?;
        Ok(feature)
    }

    /// Load a feature file
    pub fn from_file(path: impl AsRef<Path>) -> BddResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    fn validate(&self) -> BddResult<()> {
        if self.name.trim().is_empty() {
            return Err(BddError::Scenario {
                message: "feature has no name".to_string(),
            });
        }
        for scenario in &self.scenarios {
            if scenario.steps.is_empty() {
                return Err(BddError::Scenario {
                    message: format!("scenario {:?} has no steps", scenario.name),
                });
            }
        }
        Ok(())
    }

    /// Every step of the feature, background included
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.background
            .iter()
            .chain(self.scenarios.iter().flat_map(|s| s.steps.iter()))
    }
}

/// A named sequence of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    /// Steps, in execution order
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Create a scenario
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

/// One step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStep")]
pub struct Step {
    /// Keyword as written
    pub keyword: Keyword,
    /// Text after the keyword
    pub text: String,
    /// Attached table, rows of cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Vec<String>>>,
}

impl Step {
    /// Create a step
    #[must_use]
    pub fn new(keyword: Keyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
            table: None,
        }
    }

    /// `Given` step
    #[must_use]
    pub fn given(text: impl Into<String>) -> Self {
        Self::new(Keyword::Given, text)
    }

    /// `When` step
    #[must_use]
    pub fn when(text: impl Into<String>) -> Self {
        Self::new(Keyword::When, text)
    }

    /// `Then` step
    #[must_use]
    pub fn then(text: impl Into<String>) -> Self {
        Self::new(Keyword::Then, text)
    }

    /// `And` step
    #[must_use]
    pub fn and(text: impl Into<String>) -> Self {
        Self::new(Keyword::And, text)
    }

    /// Attach a table
    #[must_use]
    pub fn with_table(mut self, table: Vec<Vec<String>>) -> Self {
        self.table = Some(table);
        self
    }

    /// Attach a single-column table
    #[must_use]
    pub fn with_rows<I, S>(self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_table(rows.into_iter().map(|cell| vec![cell.into()]).collect())
    }

    /// Split a line such as `When she adds 'x'` into keyword and text
    pub fn parse_line(line: &str) -> BddResult<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let keyword = match word {
            "Given" => Keyword::Given,
            "When" => Keyword::When,
            "Then" => Keyword::Then,
            "And" => Keyword::And,
            "But" => Keyword::But,
            "*" => Keyword::Any,
            _ => {
                return Err(BddError::Scenario {
                    message: format!("step {line:?} does not start with a keyword"),
                })
            }
        };
        let text = rest.trim();
        if text.is_empty() {
            return Err(BddError::Scenario {
                message: format!("step {line:?} has no text"),
            });
        }
        Ok(Self::new(keyword, text))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRow {
    Cells(Vec<String>),
    Cell(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStep {
    Line(String),
    Detailed {
        step: String,
        #[serde(default)]
        table: Option<Vec<RawRow>>,
    },
    Full {
        keyword: Keyword,
        text: String,
        #[serde(default)]
        table: Option<Vec<Vec<String>>>,
    },
}

impl TryFrom<RawStep> for Step {
    type Error = BddError;

    fn try_from(raw: RawStep) -> BddResult<Self> {
        match raw {
            RawStep::Line(line) => Self::parse_line(&line),
            RawStep::Detailed { step, table } => {
                let mut parsed = Self::parse_line(&step)?;
                parsed.table = table.map(|rows| {
                    rows.into_iter()
                        .map(|row| match row {
                            RawRow::Cells(cells) => cells,
                            RawRow::Cell(cell) => vec![cell],
                        })
                        .collect()
                });
                Ok(parsed)
            }
            RawStep::Full {
                keyword,
                text,
                table,
            } => Ok(Self {
                keyword,
                text,
                table,
            }),
        }
    }
}
