use std::fmt::Debug;

use gloo_storage::Storage as _;
use liftlog_domain::StorageError;

use crate::KeyValueStore;

/// Store backed by the local storage of the browser.
///
/// Values are stored as raw strings, so the stored data is readable with the browser's developer
/// tools and compatible with other clients of the same origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        gloo_storage::LocalStorage::raw()
            .get_item(key)
            .map_err(js_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        gloo_storage::LocalStorage::raw()
            .set_item(key, value)
            .map_err(js_error)
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            gloo_storage::LocalStorage::delete(key);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        gloo_storage::LocalStorage::clear();
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let storage = gloo_storage::LocalStorage::raw();
        let length = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(length as usize);
        for i in 0..length {
            if let Some(key) = storage.key(i).map_err(js_error)? {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn js_error<E: Debug>(err: E) -> StorageError {
    let message = format!("{err:?}");
    if message.contains("QuotaExceeded") {
        StorageError::QuotaExceeded
    } else {
        StorageError::Unavailable(message)
    }
}
