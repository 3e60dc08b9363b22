//! # JSON File Property Store
//!
//! Properties live in one JSON object on disk. Every batch is a
//! read-modify-write under an exclusive `fs2` lock on a sibling `.lock`
//! file, and the new object is written to a temp file in the same directory
//! and renamed over the old one, so readers never see a partial file.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use rg_01_required_gate::{PropertyOperation, PropertyStore, StoreError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Property store backed by a JSON file.
#[derive(Debug)]
pub struct JsonFilePropertyStore {
    path: PathBuf,
    lock_path: PathBuf,
    writer: Mutex<()>,
}

impl JsonFilePropertyStore {
    /// Open the store at `path`, creating the parent directory if needed.
    ///
    /// The file itself is created by the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        Ok(Self {
            path,
            lock_path,
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hold the cross-process lock until the returned file is dropped.
    fn lock(&self) -> Result<File, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(file)
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn write(&self, properties: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(properties)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl PropertyStore for JsonFilePropertyStore {
    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let _lock = self.lock()?;
        self.read()
    }

    fn apply(&self, operations: Vec<PropertyOperation>) -> Result<(), StoreError> {
        if operations.is_empty() {
            return Ok(());
        }

        let _writer = self.writer.lock();
        let _lock = self.lock()?;
        let mut properties = self.read()?;
        let count = operations.len();
        for operation in operations {
            match operation {
                PropertyOperation::Set { key, value } => {
                    properties.insert(key, value);
                }
                PropertyOperation::Remove { key } => {
                    properties.remove(&key);
                }
            }
        }
        self.write(&properties)?;
        debug!(path = %self.path.display(), operations = count, "Property file updated");
        Ok(())
    }
}
