#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Persistence of exercises and workouts in a string key-value store.
//!
//! Every collection lives under a single key as a JSON array. Operations load the whole
//! collection, modify it in memory and store it again. The store is assumed to be used by a
//! single process; within that process, [`KeyValueRepository`] serializes the read-modify-write
//! sequences per collection.

use liftlog_domain::StorageError;
use strum::AsRefStr;

pub mod backup;
#[cfg(not(target_arch = "wasm32"))]
pub mod fs;
#[cfg(target_arch = "wasm32")]
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod migration;
pub mod record;
pub mod repository;

#[cfg(test)]
mod tests;

pub use repository::KeyValueRepository;

/// Persistent string-keyed storage.
///
/// The value of a key is always replaced as a whole. A failing operation leaves the previously
/// stored values untouched.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
    async fn list_keys(&self) -> Result<Vec<String>, StorageError>;
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "exercises")]
    Exercises,
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "@theme_preference")]
    ThemePreference,
    #[strum(serialize = "migration_v1_done")]
    MigrationV1Done,
}
