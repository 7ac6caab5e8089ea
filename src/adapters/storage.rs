//! Preference Storage Adapters
//!
//! Durable storage for the single preferred-wallet entry. The file-backed
//! store mirrors browser localStorage semantics: IO trouble is logged and
//! degrades to "no preference stored" rather than failing the connect.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::ports::storage::PreferenceStore;

/// File name of the persisted preference inside the data directory.
pub const PREFERENCE_FILE: &str = "preferred_wallet.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    wallet_name: String,
}

/// JSON-file-backed preference store.
pub struct FilePreferenceStore {
    data_dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCE_FILE)
    }

    fn read_preference(path: &Path) -> Option<String> {
        if !path.exists() {
            return None;
        }
        let content = fs::read_to_string(path)
            .map_err(|e| tracing::warn!("failed to read preference file: {e}"))
            .ok()?;
        let stored: StoredPreference = serde_json::from_str(&content)
            .map_err(|e| tracing::warn!("failed to parse preference file: {e}"))
            .ok()?;
        Some(stored.wallet_name)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        Self::read_preference(&self.path())
    }

    fn save(&self, wallet_name: &str) {
        if let Err(e) = fs::create_dir_all(&self.data_dir) {
            tracing::warn!("failed to create data directory: {e}");
            return;
        }
        let stored = StoredPreference {
            wallet_name: wallet_name.to_string(),
        };
        match serde_json::to_string_pretty(&stored) {
            Ok(content) => {
                if let Err(e) = fs::write(self.path(), content) {
                    tracing::warn!("failed to write preference file: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize preference: {e}"),
        }
    }

    fn clear(&self) {
        let path = self.path();
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("failed to delete preference file: {e}");
            }
        }
    }
}

/// In-memory preference store for tests and the demo composition root.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    name: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.name.lock().unwrap().clone()
    }

    fn save(&self, wallet_name: &str) {
        *self.name.lock().unwrap() = Some(wallet_name.to_string());
    }

    fn clear(&self) {
        *self.name.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path());

        assert!(store.load().is_none());
        store.save("Slush");
        assert_eq!(store.load(), Some("Slush".to_string()));
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_overwrites_previous_entry() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path());

        store.save("Slush");
        store.save("Sui Wallet");
        assert_eq!(store.load(), Some("Sui Wallet".to_string()));
    }

    #[test]
    fn test_file_store_tolerates_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path());
        fs::write(dir.path().join(PREFERENCE_FILE), "not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryPreferenceStore::new();
        assert!(store.load().is_none());
        store.save("Slush");
        assert_eq!(store.load(), Some("Slush".to_string()));
        store.clear();
        assert!(store.load().is_none());
    }
}
