//! Assertions used by step handlers.
//!
//! Every failure carries the expected and observed values so the runner can
//! report them verbatim.

use std::fmt::Debug;

use crate::result::{BddError, BddResult};

/// Assertion helpers for step handlers
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    pub fn equals<T: PartialEq + Debug>(what: &str, expected: &T, actual: &T) -> BddResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(BddError::assertion(
                what,
                format!("{expected:?}"),
                format!("{actual:?}"),
            ))
        }
    }

    /// Assert a string contains a substring
    pub fn contains(what: &str, haystack: &str, needle: &str) -> BddResult<()> {
        if haystack.contains(needle) {
            Ok(())
        } else {
            Err(BddError::assertion(
                what,
                format!("text containing {needle:?}"),
                format!("{haystack:?}"),
            ))
        }
    }

    /// Assert every expected item is present in `actual`, in any order
    pub fn contains_all<T: PartialEq + Debug>(
        what: &str,
        actual: &[T],
        expected: &[T],
    ) -> BddResult<()> {
        let missing: Vec<&T> = expected.iter().filter(|e| !actual.contains(e)).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BddError::assertion(
                format!("{what}: missing {missing:?}"),
                format!("{expected:?}"),
                format!("{actual:?}"),
            ))
        }
    }

    /// Assert a condition is true
    pub fn is_true(condition: bool, message: &str) -> BddResult<()> {
        if condition {
            Ok(())
        } else {
            Err(BddError::assertion(message, "true", "false"))
        }
    }
}
