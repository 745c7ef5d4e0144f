//! Export of all exercises and workouts into a single file and restore from such a file.

use chrono::{DateTime, Utc};
use liftlog_domain::{ReadError, StorageError};
use log::info;
use serde_json::Value;

use crate::{
    Key, KeyValueRepository, KeyValueStore,
    migration::{remap_all, remap_exercise, remap_workout},
};

pub const BACKUP_VERSION: u64 = 1;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct BackupDocument {
    pub version: u64,
    pub timestamp: i64,
    pub exercises: Vec<Value>,
    pub workouts: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub name: String,
    pub contents: String,
}

#[must_use]
pub fn file_name(now: DateTime<Utc>) -> String {
    now.format("gym-backup-%Y-%m-%dT%H-%M-%S.json").to_string()
}

/// Platform facility receiving an exported backup file.
#[allow(async_fn_in_trait)]
pub trait ShareTarget {
    async fn share(&self, file: &BackupFile) -> Result<(), Box<dyn std::error::Error>>;
}

/// Platform facility letting the user choose a backup file. Yields `None` if the user cancels.
#[allow(async_fn_in_trait)]
pub trait DocumentPicker {
    async fn pick(&self) -> Result<Option<String>, Box<dyn std::error::Error>>;
}

#[derive(thiserror::Error, Debug)]
pub enum BackupError {
    #[error("invalid backup format")]
    InvalidFormat,
    #[error("Import cancelled")]
    Cancelled,
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to share backup: {0}")]
    Share(Box<dyn std::error::Error>),
    #[error("failed to pick backup: {0}")]
    Pick(Box<dyn std::error::Error>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imported {
    pub exercises: usize,
    pub workouts: usize,
}

pub struct BackupService<'a, S> {
    repository: &'a KeyValueRepository<S>,
}

impl<'a, S: KeyValueStore> BackupService<'a, S> {
    pub fn new(repository: &'a KeyValueRepository<S>) -> Self {
        Self { repository }
    }

    /// Serialize the stored collections as they are, without validating their records.
    pub async fn export_document(&self, now: DateTime<Utc>) -> Result<BackupFile, BackupError> {
        let document = {
            let _locks = self.repository.lock_all().await;
            BackupDocument {
                version: BACKUP_VERSION,
                timestamp: now.timestamp_millis(),
                exercises: self.repository.read_records(Key::Exercises).await?,
                workouts: self.repository.read_records(Key::Workouts).await?,
            }
        };
        Ok(BackupFile {
            name: file_name(now),
            contents: serde_json::to_string_pretty(&document)?,
        })
    }

    pub async fn export_data(&self, target: &impl ShareTarget) -> Result<(), BackupError> {
        let file = self.export_document(Utc::now()).await?;
        target.share(&file).await.map_err(BackupError::Share)?;
        info!("exported backup {}", file.name);
        Ok(())
    }

    /// Replace all exercises and workouts by the content of a backup.
    ///
    /// Nothing is changed unless the document is valid. The records of each collection get the
    /// ids `1..=N` in document order. References of workout exercises to exercises are not
    /// adjusted, so they only stay intact if the exported ids were dense already.
    pub async fn import_document(&self, text: &str) -> Result<Imported, BackupError> {
        let BackupDocument {
            mut exercises,
            mut workouts,
            ..
        } = parse(text)?;

        remap_all(&mut exercises, remap_exercise);
        remap_all(&mut workouts, remap_workout);
        renumber(&mut exercises);
        renumber(&mut workouts);

        let _locks = self.repository.lock_all().await;
        self.repository
            .store()
            .remove(&[Key::Exercises.as_ref(), Key::Workouts.as_ref()])
            .await?;
        self.repository
            .write_records(Key::Exercises, &exercises)
            .await?;
        self.repository
            .write_records(Key::Workouts, &workouts)
            .await?;

        let imported = Imported {
            exercises: exercises.len(),
            workouts: workouts.len(),
        };
        info!(
            "imported {} exercises and {} workouts",
            imported.exercises, imported.workouts
        );
        Ok(imported)
    }

    pub async fn import_data(&self, picker: &impl DocumentPicker) -> Result<Imported, BackupError> {
        let text = picker
            .pick()
            .await
            .map_err(BackupError::Pick)?
            .ok_or(BackupError::Cancelled)?;
        self.import_document(&text).await
    }
}

fn parse(text: &str) -> Result<BackupDocument, BackupError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(mut document) = value else {
        return Err(BackupError::InvalidFormat);
    };
    // JSON does not distinguish `1` from `1.0`
    if document.get("version").and_then(Value::as_f64) != Some(BACKUP_VERSION as f64) {
        return Err(BackupError::InvalidFormat);
    }
    let timestamp = document
        .get("timestamp")
        .and_then(Value::as_i64)
        .unwrap_or_default();
    let mut collection = |key: &str| match document.remove(key) {
        Some(Value::Array(records)) if records.iter().all(Value::is_object) => Ok(records),
        _ => Err(BackupError::InvalidFormat),
    };
    let exercises = collection("exercises")?;
    let workouts = collection("workouts")?;
    Ok(BackupDocument {
        version: BACKUP_VERSION,
        timestamp,
        exercises,
        workouts,
    })
}

fn renumber(records: &mut [Value]) {
    for (record, id) in records.iter_mut().zip(1_u64..) {
        if let Value::Object(fields) = record {
            fields.insert("id".to_string(), Value::from(id));
        }
    }
}
