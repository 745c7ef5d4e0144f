use std::cell::{Cell, RefCell};

use liftlog_domain::StorageError;

use crate::{KeyValueStore, memory::MemoryStore};


/// Memory store that can be switched to fail on demand.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    unavailable: Cell<bool>,
    failing_key: RefCell<Option<String>>,
}

impl FaultyStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Let every write of the given key fail.
    pub fn fail_writes_of(&self, key: Option<&str>) {
        *self.failing_key.borrow_mut() = key.map(str::to_string);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable("device storage error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for FaultyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        if self.failing_key.borrow().as_deref() == Some(key) {
            return Err(StorageError::QuotaExceeded);
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(keys).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check()?;
        self.inner.clear().await
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        self.inner.list_keys().await
    }
}
