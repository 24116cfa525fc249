//! List state and persistence
//!
//! `ListStore` owns the list. The presentation layer reads snapshots and routes
//! every change through the mutation methods here. Lifecycle:
//! - `Uninitialized`: mutations apply in memory only, nothing is written
//! - `initialize()` loads the saved list once and moves to `Ready`
//! - `Ready`: every mutation that changed the list rewrites the whole slot

use thiserror::Error;

use super::item::{Item, ItemId};
use crate::persistence::{self, LoadError};
use crate::settings::Settings;
use crate::storage::{Storage, StorageError};

/// Store lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Saved list not loaded yet; writes are held back
    Uninitialized,
    /// Load attempt finished; mutations are persisted
    Ready,
}

/// Rejected mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Text was empty or whitespace only
    #[error("input is empty")]
    EmptyInput,
}

/// Owner of the list
pub struct ListStore<S: Storage> {
    storage: S,
    settings: Settings,
    items: Vec<Item>,
    phase: Phase,
    /// Text currently typed in the new-item input
    draft: String,
    /// Validation message for the last rejected add
    error: Option<String>,
    last_write_error: Option<StorageError>,
}

impl<S: Storage> ListStore<S> {
    /// Create an empty, uninitialized store
    pub fn new(storage: S, settings: Settings) -> Self {
        Self {
            storage,
            settings,
            items: Vec::new(),
            phase: Phase::Uninitialized,
            draft: String::new(),
            error: None,
            last_write_error: None,
        }
    }

    /// Load the saved list and start persisting
    ///
    /// Returns the number of restored items. Corrupt data is logged, returned
    /// as `Err` and otherwise ignored: the in-memory list is left as it was.
    /// A failed read is treated like an empty slot. Either way the store is
    /// `Ready` afterwards.
    pub fn initialize(&mut self) -> Result<usize, LoadError> {
        if self.phase == Phase::Ready {
            log::warn!("List store already initialized");
            return Ok(self.items.len());
        }

        let result = match self.storage.get_item(&self.settings.storage_key) {
            Ok(Some(json)) => match persistence::decode(&json) {
                Ok(items) => {
                    log::info!("Loaded {} items", items.len());
                    self.items = items;
                    Ok(self.items.len())
                }
                Err(e) => {
                    log::error!("Discarding saved list: {}", e);
                    Err(e)
                }
            },
            Ok(None) => {
                log::info!("No saved list found, starting fresh");
                Ok(self.items.len())
            }
            Err(e) => {
                log::warn!("Could not read saved list: {}", e);
                Ok(self.items.len())
            }
        };

        self.phase = Phase::Ready;
        result
    }

    /// Prepend a new item
    ///
    /// The text is stored as typed but must not be blank once trimmed. A blank
    /// add records the validation message and leaves the list untouched.
    pub fn add(&mut self, text: impl Into<String>) -> Result<ItemId, ListError> {
        let text = text.into();
        if is_blank(&text) {
            self.error = Some(self.settings.empty_input_message.clone());
            return Err(ListError::EmptyInput);
        }

        let mut item = Item::new(text);
        while self.get(&item.id).is_some() {
            item.id = ItemId::generate();
        }
        let id = item.id.clone();
        self.items.insert(0, item);
        self.error = None;
        self.persist();
        Ok(id)
    }

    /// Replace an item's text. Empty text is allowed.
    ///
    /// Returns false when no item has `id`.
    pub fn edit(&mut self, id: &ItemId, text: impl Into<String>) -> bool {
        let Some(item) = self.find_mut(id) else {
            return false;
        };
        item.text = text.into();
        self.persist();
        true
    }

    /// Set `completed` to the negation of the caller's view of it
    ///
    /// `current` is what the caller last saw; pass the item's actual value or
    /// use [`ListStore::toggle`].
    pub fn toggle_completed(&mut self, id: &ItemId, current: bool) -> bool {
        let Some(item) = self.find_mut(id) else {
            return false;
        };
        item.completed = !current;
        self.persist();
        true
    }

    /// Flip `completed` based on the stored value
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        let Some(item) = self.find_mut(id) else {
            return false;
        };
        item.completed = !item.completed;
        self.persist();
        true
    }

    /// Remove an item, keeping the order of the rest
    pub fn delete(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Update the new-item input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Add the draft as a new item, clearing the draft on success
    pub fn submit(&mut self) -> Result<ItemId, ListError> {
        let text = self.draft.clone();
        let id = self.add(text)?;
        self.draft.clear();
        Ok(id)
    }

    /// Current list, newest first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validation message to show, if the last add was rejected
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Most recent failed write; cleared by the next successful one
    pub fn last_write_error(&self) -> Option<&StorageError> {
        self.last_write_error.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn find_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Write the list if ready. Failures keep the in-memory state.
    fn persist(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        match self.write() {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                log::error!("Failed to save list: {}", e);
                self.last_write_error = Some(e);
            }
        }
    }

    fn write(&mut self) -> Result<(), StorageError> {
        let json =
            persistence::encode(&self.items).map_err(|e| StorageError::Backend(e.to_string()))?;
        if self.settings.debug_persistence {
            log::debug!("Saving list: {}", json);
        }
        self.storage.set_item(&self.settings.storage_key, &json)
    }
}

/// Whitespace only, counting the byte order mark as whitespace
fn is_blank(text: &str) -> bool {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}
