use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::core::utils::{ensure_dir, tmp_path, PathResolver};
use crate::domain::{BudgetConfig, Transaction};
use crate::errors::Result;

use super::StorageBackend;

/// Filesystem-backed JSON persistence: one file per snapshot under a root directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    config_file: PathBuf,
    transactions_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self {
            config_file: PathResolver::config_file_in(&root),
            transactions_file: PathResolver::transactions_file_in(&root),
            root,
        })
    }

    /// Storage rooted at the resolved application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(PathResolver::base_dir())
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_file
    }

    pub fn transactions_path(&self) -> &Path {
        &self.transactions_file
    }
}

impl StorageBackend for JsonStorage {
    fn load_config(&self) -> Result<Option<BudgetConfig>> {
        read_json(&self.config_file)
    }

    fn save_config(&self, config: &BudgetConfig) -> Result<()> {
        write_json(&self.config_file, config)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(read_json(&self.transactions_file)?.unwrap_or_default())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        write_json(&self.transactions_file, transactions)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), bytes = json.len(), "snapshot written");
    Ok(())
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_read_as_empty_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("store")).unwrap();
        assert!(storage.load_config().unwrap().is_none());
        assert!(storage.load_transactions().unwrap().is_empty());
    }
}
