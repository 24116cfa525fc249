//! List save/load codec
//!
//! The whole list is stored as one JSON array of items, newest first:
//! `[{ "id": "...", "text": "...", "completed": false }, ...]`
//!
//! There is no version field; what cannot be decoded is reported as corrupt.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::list::{Item, ItemId};

/// Why a stored value could not be restored
#[derive(Debug, Error)]
pub enum LoadError {
    /// Not JSON, or array elements that are not items
    #[error("stored list is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Valid JSON, but not an array
    #[error("stored list is not an array (found {found})")]
    NotAnArray { found: &'static str },
    /// Two items share an id
    #[error("stored list contains duplicate id `{0}`")]
    DuplicateId(ItemId),
}

/// Serialize the list for storage
pub fn encode(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parse a stored list
///
/// An empty string is treated like an absent slot and yields an empty list.
pub fn decode(json: &str) -> Result<Vec<Item>, LoadError> {
    if json.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(LoadError::NotAnArray {
            found: kind_of(&value),
        });
    }

    let items: Vec<Item> = serde_json::from_value(value)?;
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(&item.id) {
            return Err(LoadError::DuplicateId(item.id.clone()));
        }
    }
    Ok(items)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
