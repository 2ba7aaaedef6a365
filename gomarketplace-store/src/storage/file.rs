//! File-backed key-value storage.
//!
//! Each key maps to `<dir>/<escaped key>.json`. Writes go through
//! [`write_atomic`], so a crash mid-write leaves the previous value intact.

use async_trait::async_trait;
use gomarketplace_core::{CoreError, KeyValueStore};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

use crate::persistence::{read_optional, write_atomic};

/// Key-value storage persisted as files in one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`.
    ///
    /// ASCII letters, digits and `-` are kept; every other byte becomes
    /// `_` followed by two hex digits. Distinct keys never share a file, so
    /// `@gomarketplace:products` maps to `_40gomarketplace_3aproducts.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut stem = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                stem.push(char::from(byte));
            } else {
                stem.push_str(&format!("_{byte:02x}"));
            }
        }
        if stem.is_empty() {
            stem.push('_');
        }
        self.dir.join(format!("{stem}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        let value = read_optional(&path).await?;
        debug!(path = %path.display(), found = value.is_some(), "Read storage file");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        write_atomic(&path, value).await?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    async fn modified(&self, key: &str) -> Result<Option<SystemTime>, CoreError> {
        match tokio::fs::metadata(self.path_for(key)).await {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
