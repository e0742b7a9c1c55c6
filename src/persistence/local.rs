//! Browser LocalStorage store (wasm32 only)

use super::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

fn backend_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{e:?}"))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(backend_error)
    }
}
