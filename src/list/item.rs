//! List entries

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque item identifier
///
/// Freshly created items get a v4 UUID, but any string read back from storage
/// is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a new random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One list entry
///
/// Serialized exactly as `{ "id": string, "text": string, "completed": bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
}

impl Item {
    /// New, not yet completed item with a fresh id. Text is kept as typed.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            text: text.into(),
            completed: false,
        }
    }

    /// Completed items are shown read-only
    pub fn is_editable(&self) -> bool {
        !self.completed
    }
}
