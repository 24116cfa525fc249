//! In-memory storage backend

use std::collections::HashMap;

use super::{Storage, StorageError};

/// Map-backed storage with an optional byte quota
///
/// The quota counts the byte length of all stored values, which is enough to
/// reproduce the browser's "quota exceeded" failure on a full slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create empty, unlimited storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty storage that rejects writes past `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Seed a slot directly, bypassing the quota
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    /// Change (or lift) the quota
    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Total bytes currently stored
    pub fn used_bytes(&self) -> usize {
        self.slots.values().map(String::len).sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let replaced = self.slots.get(key).map(String::len).unwrap_or(0);
            if self.used_bytes() - replaced + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    len: value.len(),
                });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_slot_reads_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("todos"), Ok(None));
    }

    #[test]
    fn test_set_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set_item("todos", "[]").unwrap();
        storage.set_item("todos", "[1]").unwrap();
        assert_eq!(storage.get_item("todos").unwrap().as_deref(), Some("[1]"));

        storage.remove_item("todos").unwrap();
        assert_eq!(storage.get_item("todos"), Ok(None));
        // Removing twice is fine
        storage.remove_item("todos").unwrap();
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let mut storage = MemoryStorage::with_quota(4);
        storage.set_item("a", "1234").unwrap();

        let err = storage.set_item("b", "5").unwrap_err();
        assert_eq!(
            err,
            StorageError::QuotaExceeded {
                key: "b".to_string(),
                len: 1
            }
        );
        // Failed write leaves the slot untouched
        assert_eq!(storage.get_item("b"), Ok(None));

        // Replacing a slot only counts the new value
        storage.set_item("a", "abcd").unwrap();
        assert_eq!(storage.used_bytes(), 4);

        // Lifting the quota accepts the write that failed before
        storage.set_quota(None);
        storage.set_item("b", "5").unwrap();
        assert_eq!(storage.used_bytes(), 5);
    }
}
