//! `--by` flag parsing: `column`, `column:asc`, or `column:desc`.
//!
//! The direction suffix is split on the last `:` so column names containing
//! colons still work as long as they do not end in a direction keyword.

use super::compare::Direction;

/// A sort column as named on the command line, before header resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub column: String,
    pub direction: Direction,
}

/// Error returned when a `--by` value cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySpecError {
    EmptyColumn,
}

impl std::fmt::Display for KeySpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySpecError::EmptyColumn => write!(f, "sort column name is empty"),
        }
    }
}

impl std::error::Error for KeySpecError {}

/// Parse one `--by` value. Direction defaults to descending (top = largest).
pub fn parse_key_spec(raw: &str) -> Result<KeySpec, KeySpecError> {
    let (column, direction) = match raw.rsplit_once(':') {
        Some((column, suffix)) => match suffix.to_ascii_lowercase().as_str() {
            "asc" => (column, Direction::Ascending),
            "desc" => (column, Direction::Descending),
            _ => (raw, Direction::Descending),
        },
        None => (raw, Direction::Descending),
    };
    if column.is_empty() {
        return Err(KeySpecError::EmptyColumn);
    }
    Ok(KeySpec {
        column: column.to_string(),
        direction,
    })
}
