// entropy-analyzer-core/src/strategies/mod.rs
//! Concrete implementations of the `EntropyStrategy` trait.
//!
//! Each strategy lives in its own file and offers two entry points: a typed
//! `score` method for callers that already hold the right shape, and the
//! `compute_entropy` trait method that validates a [`Datum`] first.

pub mod contextual;
pub mod numerical;
pub mod search;
pub mod text;
pub mod time;

use crate::datum::{present, Datum};
use crate::errors::EntropyError;

/// Unwraps a string input, rejecting any other present shape.
pub(crate) fn expect_text(data: Option<&Datum>) -> Result<Option<&str>, EntropyError> {
    match present(data) {
        None => Ok(None),
        Some(Datum::Text(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(EntropyError::invalid(format!(
            "Input must be a string or None, got {}",
            other.type_name()
        ))),
    }
}

/// Unwraps a list input, rejecting any other present shape.
pub(crate) fn expect_list<'a>(data: Option<&'a Datum>, shape: &str) -> Result<Option<&'a [Datum]>, EntropyError> {
    match present(data) {
        None => Ok(None),
        Some(Datum::List(items)) => Ok(Some(items.as_slice())),
        Some(other) => Err(EntropyError::invalid(format!(
            "Input must be a {} or None, got {}",
            shape,
            other.type_name()
        ))),
    }
}

/// Borrows every element of `items` as a string.
pub(crate) fn expect_strings<'a>(items: &'a [Datum], element: &str) -> Result<Vec<&'a str>, EntropyError> {
    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                EntropyError::invalid(format!("All elements must be {}, got {}", element, item.type_name()))
            })
        })
        .collect()
}
