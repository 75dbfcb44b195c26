use std::rc::Rc;

use portal_api::prelude::*;

/// Browser `localStorage`, holding plain string values.
#[cfg(feature = "web")]
pub struct LocalStore;

#[cfg(feature = "web")]
impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}

#[cfg(feature = "web")]
impl LocalStore {
    /// Fails when the browser blocks storage (some private modes, sandboxed frames).
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(_)) => Ok(LocalStore),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".to_string())),
            Err(e) => Err(StorageError::Unavailable(format!("{:?}", e))),
        }
    }
}

#[cfg(feature = "web")]
pub fn preference_store() -> Rc<dyn PreferenceStore> {
    match LocalStore::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            tracing::warn!("Preferences will not persist: {}", e);
            Rc::new(MemoryStore::new())
        }
    }
}

#[cfg(not(feature = "web"))]
pub fn preference_store() -> Rc<dyn PreferenceStore> {
    Rc::new(MemoryStore::new())
}
