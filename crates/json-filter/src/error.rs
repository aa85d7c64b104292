//! Error types for filter parsing and JSON field extraction.

use crate::token::Token;
use thiserror::Error;

/// Errors that can occur while parsing or applying a filter specification.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The filter text did not match the grammar at `position` (a byte offset
    /// into `specification`, after any skipped whitespace).
    #[error(
        "Error parsing [{specification}]. After [{}] expected one of [{}] but found [{}]",
        consumed(.specification, .position),
        join_tokens(.expected),
        remaining(.specification, .position)
    )]
    UnexpectedToken {
        specification: String,
        position: usize,
        expected: Vec<Token>,
    },

    /// The document handed to one of the string helpers was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout json-filter.
pub type Result<T> = std::result::Result<T, FilterError>;

fn consumed<'a>(specification: &'a str, position: &usize) -> &'a str {
    specification.get(..*position).unwrap_or(specification)
}

fn remaining<'a>(specification: &'a str, position: &usize) -> &'a str {
    specification.get(*position..).unwrap_or("")
}

fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(",")
}

/// Errors raised by the typed field extractors in [`crate::extract`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("No value found for required key '{key}'.")]
    Missing { key: String },

    #[error("Value for '{key}' is not a valid {description}.")]
    InvalidValue { key: String, description: String },

    #[error("Value for '{key}' is not a valid list of {description}.")]
    InvalidList { key: String, description: String },

    #[error("JSON array is not a collection of expected types.")]
    InvalidArray,

    #[error("Invalid number of records in list. Expected exactly {expected}, found {found}.")]
    WrongCount { expected: usize, found: usize },
}
