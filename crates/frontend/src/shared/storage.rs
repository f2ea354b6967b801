//! Key-value persistence behind the domain stores.
//!
//! `BrowserStorage` writes to `window.localStorage`; the test-only
//! `MemoryStorage` backs the native unit tests. Every value is a whole JSON
//! document that is replaced on each write.

use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::{BTreeMap, BTreeSet};
#[cfg(test)]
use std::rc::Rc;
use thiserror::Error;

/// Appended to a key to name the copy of its unreadable value
pub const BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("ストレージを利用できません")]
    Unavailable,
    #[error("ストレージへの書き込みに失敗しました（容量不足の可能性があります）: {0}")]
    WriteRejected(String),
    #[error("データの変換に失敗しました: {0}")]
    Serialize(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    /// Every key currently held
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Raw value, `None` when missing or unreadable
    fn read(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("storage read '{}' failed: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.set(key, &json)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("stored '{}' is not valid JSON: {}", key, e);
                None
            }
        }
    }

    /// Copy `raw` aside under `<key>.backup` before the key gets replaced.
    /// Returns the backup key, or `None` when the copy could not be written.
    fn back_up(&self, key: &str, raw: &str) -> Option<String> {
        let backup_key = format!("{}{}", key, BACKUP_SUFFIX);
        match self.set(&backup_key, raw) {
            Ok(()) => {
                log::warn!("unreadable '{}' copied to '{}'", key, backup_key);
                Some(backup_key)
            }
            Err(e) => {
                log::error!("could not back up unreadable '{}': {}", key, e);
                None
            }
        }
    }

    /// Total characters across stored values
    fn usage_chars(&self) -> Result<usize, StorageError> {
        let mut total = 0;
        for key in self.keys()? {
            total += self.get(&key)?.map(|v| v.chars().count()).unwrap_or(0);
        }
        Ok(total)
    }
}

// ============================================================================
// Browser
// ============================================================================

/// `window.localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let storage = Self::storage()?;
        let len = storage.length().map_err(|_| StorageError::Unavailable)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Ok(Some(key)) = storage.key(i) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

// ============================================================================
// In memory
// ============================================================================

/// Shared in-memory store. Clones see the same entries.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    /// Reject writes, simulating a full quota
    read_only: Rc<RefCell<bool>>,
    /// Keys whose writes are rejected
    rejected: Rc<RefCell<BTreeSet<String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.borrow_mut() = read_only;
    }

    pub fn reject_writes_to(&self, key: &str) {
        self.rejected.borrow_mut().insert(key.to_string());
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.read_only.borrow() || self.rejected.borrow().contains(key) {
            return Err(StorageError::WriteRejected("QuotaExceededError".into()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shares_entries_between_clones() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        b.remove("k").unwrap();
        assert_eq!(a.read("k"), None);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let s = MemoryStorage::new();
        s.set_read_only(true);
        assert!(matches!(s.set("k", "v"), Err(StorageError::WriteRejected(_))));

        let s = MemoryStorage::new();
        s.reject_writes_to("full");
        assert!(s.set("full", "v").is_err());
        assert!(s.set("other", "v").is_ok());
    }

    #[test]
    fn test_json_helpers() {
        let s = MemoryStorage::new();
        s.write_json("ids", &vec!["a", "b"]).unwrap();
        let ids: Vec<String> = s.read_json("ids").unwrap();
        assert_eq!(ids, vec!["a", "b"]);
        s.set("broken", "{").unwrap();
        assert!(s.read_json::<Vec<String>>("broken").is_none());
    }

    #[test]
    fn test_back_up_copies_raw_value() {
        let s = MemoryStorage::new();
        assert_eq!(s.back_up("foodsData", "{oops").as_deref(), Some("foodsData.backup"));
        assert_eq!(s.read("foodsData.backup").as_deref(), Some("{oops"));

        s.set_read_only(true);
        assert_eq!(s.back_up("foodsData", "{oops"), None);
    }

    #[test]
    fn test_usage_counts_characters() {
        let s = MemoryStorage::new().with_entry("a", "12345").with_entry("b", "日本");
        assert_eq!(s.usage_chars().unwrap(), 7);
    }
}
