use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::{window, Storage};

use crate::error::StorageError;

/// String key/value persistence (browser localStorage or in-memory)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// None when localStorage is blocked (private mode, sandboxed iframe)
    pub fn open() -> Option<Self> {
        get_local_storage().map(|storage| Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if self.storage.remove_item(key).is_err() {
            log::warn!("⚠️ [STORAGE] Could not remove {}", key);
        }
    }
}

/// Process-lifetime store, used when localStorage is unavailable
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// localStorage when the browser allows it, memory otherwise
pub fn browser_or_memory() -> Box<dyn KeyValueStore> {
    match LocalStorageStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("⚠️ [STORAGE] localStorage unavailable, session will not survive reloads");
            Box::new(MemoryStore::new())
        }
    }
}
