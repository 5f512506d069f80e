use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of an item, taken from the request path.
///
/// Wraps an `i64` so a raw path segment has to go through [`ItemId::parse`]
/// before it can be used to build an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Creates an item ID from an already validated integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses an item ID from user input.
    ///
    /// Surrounding whitespace is ignored and a leading sign is accepted.
    /// Single underscores between digits (`1_000`) and an all-zero
    /// fraction (`4.0`, `42.00`) are also accepted.
    pub fn parse(input: &str) -> Result<Self, ItemIdError> {
        let not_an_integer = || ItemIdError::NotAnInteger {
            input: input.to_string(),
        };
        let digits = normalize_integer(input).ok_or_else(not_an_integer)?;

        digits.parse::<i64>().map(Self).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ItemIdError::OutOfRange {
                input: input.to_string(),
            },
            _ => not_an_integer(),
        })
    }

    /// Returns the underlying integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Reduces integer-like text to a plain signed digit string.
///
/// Returns `None` for stray characters, misplaced underscores or a
/// non-zero fraction.
fn normalize_integer(input: &str) -> Option<String> {
    let text = input.trim();
    let text = match text.split_once('.') {
        Some((whole, fraction)) if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') => {
            whole
        }
        Some(_) => return None,
        None => text,
    };

    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b'_')
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    Some(format!("{sign}{}", digits.replace('_', "")))
}

impl FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Errors produced when an item ID cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemIdError {
    /// The input is not a base-10 integer.
    #[error("Input should be a valid integer, unable to parse string as an integer")]
    NotAnInteger { input: String },

    /// The input is an integer but does not fit in 64 bits.
    #[error("Unable to parse input string as an integer, exceeded maximum size")]
    OutOfRange { input: String },
}

impl ItemIdError {
    /// Returns the raw input that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            ItemIdError::NotAnInteger { input } | ItemIdError::OutOfRange { input } => input,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ItemIdError::NotAnInteger { .. } => "int_parsing",
            ItemIdError::OutOfRange { .. } => "int_parsing_size",
        }
    }
}

/// An item record echoed back by the item lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub q: Option<String>,
}

impl Item {
    pub fn new(item_id: ItemId, q: Option<String>) -> Self {
        Self { item_id, q }
    }
}
