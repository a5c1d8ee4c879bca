//! Filesystem-backed key-value store.
//!
//! One file per key under a root directory, written atomically (temp file +
//! rename) so a crash mid-write never leaves a torn value behind.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::traits::KeyValueStore;

/// Key-value store persisting each value as a file under `root`.
pub struct FsKeyValueStore {
    root: PathBuf,
}

impl FsKeyValueStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)
            .map_err(|e| anyhow!("Failed to create store root {}: {}", root.display(), e))?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are short identifiers; anything path-hostile is flattened.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FsKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)
            .map_err(|e| anyhow!("Failed to write temp file {}: {}", tmp_path.display(), e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| {
            anyhow!(
                "Failed to rename {} to {}: {}",
                tmp_path.display(),
                path.display(),
                e
            )
        })?;
        Ok(())
    }
}
