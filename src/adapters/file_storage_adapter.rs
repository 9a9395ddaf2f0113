//! File-backed storage adapter: one `<key>.json` file per key in a data
//! directory.

use crate::domain::error::JournalError;
use crate::ports::config_port::ConfigPort;
use crate::ports::storage_port::StoragePort;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = ".ictjournal";

pub struct FileStorageAdapter {
    base_path: PathBuf,
}

impl FileStorageAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self::new(PathBuf::from(config.get_string_or(
            "journal",
            "data_dir",
            DEFAULT_DATA_DIR,
        )))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStorageAdapter {
    fn read(&self, key: &str) -> Result<Option<String>, JournalError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JournalError::Deserialization {
                key: key.to_string(),
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), JournalError> {
        let persistence = |e: std::io::Error, what: &Path| JournalError::Persistence {
            key: key.to_string(),
            reason: format!("{}: {}", what.display(), e),
        };

        fs::create_dir_all(&self.base_path).map_err(|e| persistence(e, &self.base_path))?;

        let path = self.entry_path(key);
        let staging = self.base_path.join(format!(".{}.json.tmp", key));
        fs::write(&staging, value).map_err(|e| persistence(e, &staging))?;
        fs::rename(&staging, &path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            persistence(e, &path)
        })?;
        Ok(())
    }
}
