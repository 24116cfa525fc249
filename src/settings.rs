//! App settings
//!
//! Persisted separately from the list itself, under `SETTINGS_KEY`.

use serde::{Deserialize, Serialize};

use crate::storage::{Storage, StorageError};

/// Storage slot holding the serialized settings
pub const SETTINGS_KEY: &str = "todo_list_settings";

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// App settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Storage slot holding the list
    pub storage_key: String,
    /// Message shown when an empty item is submitted
    pub empty_input_message: String,
    /// Console log verbosity
    pub log_level: LogLevel,
    /// Log every persisted payload at debug level
    pub debug_persistence: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: "todos".to_string(),
            empty_input_message: "Input is empty!".to_string(),
            log_level: LogLevel::Info,
            debug_persistence: false,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_item(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return Self::with_valid_key(settings);
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// The list must not share the settings slot
    fn with_valid_key(mut settings: Self) -> Self {
        if settings.storage_key == SETTINGS_KEY || settings.storage_key.is_empty() {
            let default_key = Self::default().storage_key;
            log::warn!(
                "Storage key `{}` is reserved, using `{}`",
                settings.storage_key,
                default_key
            );
            settings.storage_key = default_key;
        }
        settings
    }

    /// Save settings
    pub fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        storage.set_item(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_when_absent() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());
        assert_eq!(Settings::default().storage_key, "todos");
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            storage_key: "my_list".to_string(),
            log_level: LogLevel::Debug,
            ..Default::default()
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let storage =
            MemoryStorage::new().with_item(SETTINGS_KEY, r#"{"log_level":"Warn"}"#);
        let settings = Settings::load(&storage);
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.storage_key, "todos");
    }

    #[test]
    fn test_garbage_settings_fall_back() {
        let storage = MemoryStorage::new().with_item(SETTINGS_KEY, "{{{");
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_reserved_storage_key_replaced() {
        let storage = MemoryStorage::new().with_item(
            SETTINGS_KEY,
            format!(r#"{{"storage_key":"{}","log_level":"Debug"}}"#, SETTINGS_KEY),
        );
        let settings = Settings::load(&storage);
        assert_eq!(settings.storage_key, "todos");
        assert_eq!(settings.log_level, LogLevel::Debug);

        let storage = MemoryStorage::new().with_item(SETTINGS_KEY, r#"{"storage_key":""}"#);
        assert_eq!(Settings::load(&storage).storage_key, "todos");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::from_str("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("nope"), None);
        assert_eq!(LogLevel::Debug.as_str(), "debug");
        assert_eq!(LogLevel::Trace.to_level(), log::Level::Trace);
    }
}
