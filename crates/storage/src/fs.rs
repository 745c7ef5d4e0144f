use std::{
    borrow::Cow,
    fs, io,
    path::{Path, PathBuf},
};

use liftlog_domain::StorageError;
use uuid::Uuid;

use crate::{
    KeyValueStore,
    backup::{BackupFile, DocumentPicker, ShareTarget},
};

const EXTENSION: &str = "value";

/// Store keeping every key in a separate file of a directory.
///
/// Values are written to a temporary file first and then renamed over the previous file, so a
/// failed write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", encode_key(key)))
    }

    fn entries(&self) -> Result<Vec<(PathBuf, String)>, StorageError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(io_error(&err)),
        };
        let mut entries = vec![];
        for entry in read_dir {
            let path = entry.map_err(|err| io_error(&err))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_key)
            {
                entries.push((path, key));
            }
        }
        Ok(entries)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| io_error(&err))?;
        let tmp_path = self.dir.join(format!(".{}.tmp", Uuid::new_v4()));
        if let Err(err) = fs::write(&tmp_path, value) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error(&err));
        }
        fs::rename(&tmp_path, self.path(key)).map_err(|err| {
            let _ = fs::remove_file(&tmp_path);
            io_error(&err)
        })
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            match fs::remove_file(self.path(key)) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(io_error(&err)),
            }
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        for (path, _) in self.entries()? {
            fs::remove_file(path).map_err(|err| io_error(&err))?;
        }
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = self
            .entries()?
            .into_iter()
            .map(|(_, key)| key)
            .collect::<Vec<_>>();
        keys.sort();
        Ok(keys)
    }
}

fn io_error(err: &io::Error) -> StorageError {
    match err.kind() {
        io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => StorageError::QuotaExceeded,
        _ => StorageError::Unavailable(err.to_string()),
    }
}

/// Map a key to a portable file name. All bytes except `[A-Za-z0-9-_.~]` are percent-encoded.
fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

fn decode_key(name: &str) -> Option<String> {
    urlencoding::decode(name).ok().map(Cow::into_owned)
}

/// Share target saving backups into a directory.
#[derive(Debug, Clone)]
pub struct BackupDirectory(pub PathBuf);

impl ShareTarget for BackupDirectory {
    async fn share(&self, file: &BackupFile) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(&self.0)?;
        fs::write(self.0.join(&file.name), &file.contents)?;
        Ok(())
    }
}

/// Document picker returning the content of a previously chosen file, `None` if nothing was
/// chosen.
#[derive(Debug, Clone)]
pub struct SelectedFile(pub Option<PathBuf>);

impl DocumentPicker for SelectedFile {
    async fn pick(&self) -> Result<Option<String>, Box<dyn std::error::Error>> {
        match &self.0 {
            Some(path) => Ok(Some(fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}
