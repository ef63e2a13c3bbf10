//! Durable key/value storage for the session record

use pitwatch_core::AppConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Key the identity is stored under.
pub const SESSION_KEY: &str = "user";

/// Backend holding one serialized session record.
pub trait SessionStorage {
    /// Raw stored record, `None` when nothing is stored
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored record
    fn store(&mut self, value: &str) -> Result<()>;

    /// Remove the stored record. Removing nothing is not an error.
    fn clear(&mut self) -> Result<()>;
}

/// In-process storage, lost on restart
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    value: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `value`
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn store(&mut self, value: &str) -> Result<()> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}

/// JSON file of string entries; the session lives under [`SESSION_KEY`].
///
/// Other keys in the file are preserved across writes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.session.storage_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Readers see either the old file or the new one
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(SESSION_KEY))
    }

    fn store(&mut self, value: &str) -> Result<()> {
        // Unreadable contents are overwritten
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(SESSION_KEY.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn clear(&mut self) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.remove(SESSION_KEY);

        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            Ok(())
        } else {
            self.write_entries(&entries)
        }
    }
}
