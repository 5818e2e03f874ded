//! Value Lists - per-epoch schedules such as `--lr 0.1,0.05,0.01`
//!
//! Accepted spellings:
//! - comma separated scalars: `0.1,0.05`
//! - bracketed literals: `[0.1, 0.05]`, `(2, 4)`, `(0.1,)`
//! - a bare scalar, which becomes a one element list: `0.25`

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scalar types a [`ValueList`] can hold.
///
/// Elements go through the type's `FromStr` with no numeric coercion:
/// `2.0` is not an integer, so `--update-freq 2.0` is rejected rather than
/// truncated to `[2]`.
pub trait ListElement: FromStr + Clone + fmt::Display {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;
}

impl ListElement for usize {
    const TYPE_NAME: &'static str = "integer";
}

impl ListElement for f64 {
    const TYPE_NAME: &'static str = "float";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListParseError {
    #[error("expected at least one value")]
    Empty,
    #[error("cannot parse `{element}` as {expected}")]
    InvalidElement {
        element: String,
        expected: &'static str,
    },
}

/// Non-empty list of scalars, indexed by epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueList<T>(Vec<T>);

impl<T: ListElement> ValueList<T> {
    pub fn new(values: Vec<T>) -> Result<Self, ListParseError> {
        if values.is_empty() {
            return Err(ListParseError::Empty);
        }
        Ok(Self(values))
    }

    /// Parse a user supplied string. Used as the clap value parser.
    pub fn parse(input: &str) -> Result<Self, ListParseError> {
        let inner = strip_delimiters(input.trim());

        let mut elements: Vec<&str> = inner.split(',').map(str::trim).collect();
        // `(0.1,)` leaves a trailing empty element
        if elements.len() > 1 && elements.last().is_some_and(|e| e.is_empty()) {
            elements.pop();
        }
        if elements.iter().all(|e| e.is_empty()) {
            return Err(ListParseError::Empty);
        }

        let values = elements
            .into_iter()
            .map(|element| {
                element
                    .parse::<T>()
                    .map_err(|_| ListParseError::InvalidElement {
                        element: element.to_string(),
                        expected: T::TYPE_NAME,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(values))
    }

    /// Value for a 1-based epoch. Epochs past the end reuse the last entry.
    pub fn for_epoch(&self, epoch: usize) -> &T {
        let idx = epoch.saturating_sub(1).min(self.0.len() - 1);
        &self.0[idx]
    }
}

impl<T> ValueList<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a list built through `new` or `parse`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: ListElement> TryFrom<Vec<T>> for ValueList<T> {
    type Error = ListParseError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<T: ListElement> FromStr for ValueList<T> {
    type Err = ListParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: ListElement> fmt::Display for ValueList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

fn strip_delimiters(input: &str) -> &str {
    for (open, close) in [('[', ']'), ('(', ')')] {
        if let Some(inner) = input
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    input
}
