//! The todo list
//!
//! Items and the store that owns them. All list state lives in `ListStore`;
//! nothing here touches the DOM.

pub mod item;
pub mod store;

pub use item::{Item, ItemId};
pub use store::{ListError, ListStore, Phase};
