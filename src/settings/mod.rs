//! Application settings: where data lives and how verbose logging is.
//!
//! The budget plan itself is domain data and is persisted through
//! [`StorageBackend`](crate::storage::StorageBackend), not here.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::utils::{ensure_dir, tmp_path, PathResolver};
use crate::errors::{BudgetError, Result};
use crate::storage::JsonStorage;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Custom directory for budget snapshots. `EXPENSE_MACROS_HOME` still wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Settings {
    pub fn resolve_data_dir(&self) -> PathBuf {
        PathResolver::resolve_base(self.data_dir.clone())
    }

    /// JSON storage rooted at the resolved data directory.
    pub fn open_storage(&self) -> Result<JsonStorage> {
        JsonStorage::new(self.resolve_data_dir())
    }

    /// Installs the global subscriber using `log_filter`.
    pub fn init_tracing(&self) {
        crate::utils::init_tracing(self.log_filter.as_deref());
    }
}

/// Handles persistence for [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for `settings.json` inside the resolved application directory.
    pub fn new_default() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self::new(PathResolver::settings_file_in(&base)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| BudgetError::SettingsError(err.to_string()))
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|err| BudgetError::SettingsError(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Settings::default());
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let settings = Settings {
            data_dir: Some(dir.path().join("data")),
            log_filter: Some("expense_macros=debug".into()),
        };
        manager.save(&settings).unwrap();
        assert_eq!(manager.load().unwrap(), settings);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_file_is_a_settings_error() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(BudgetError::SettingsError(_))));
    }

    #[test]
    fn failed_save_keeps_previous_settings() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let first = Settings {
            data_dir: None,
            log_filter: Some("expense_macros=warn".into()),
        };
        manager.save(&first).unwrap();

        fs::create_dir_all(tmp_path(manager.path())).unwrap();
        let second = Settings {
            data_dir: None,
            log_filter: Some("expense_macros=trace".into()),
        };
        assert!(manager.save(&second).is_err());
        assert_eq!(manager.load().unwrap(), first);
    }
}
