//! Todo List - a small in-browser todo list
//!
//! Core modules:
//! - `list`: Items and the list store (add, edit, toggle, delete)
//! - `persistence`: JSON codec for the saved list
//! - `storage`: LocalStorage on web, in-memory elsewhere
//! - `settings`: Persisted app settings

pub mod list;
pub mod persistence;
pub mod settings;
pub mod storage;

pub use list::{Item, ItemId, ListError, ListStore, Phase};
pub use persistence::LoadError;
pub use settings::{LogLevel, Settings};
pub use storage::{MemoryStorage, Storage, StorageError};
