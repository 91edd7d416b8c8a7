use dirs::{data_dir, home_dir};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;

pub const HOME_ENV: &str = "EXPENSE_MACROS_HOME";
const APP_DIR_NAME: &str = "expense_macros";
const HIDDEN_DIR_NAME: &str = ".expense_macros";
const CONFIG_FILE: &str = "budget_config.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Resolves where application files live.
pub struct PathResolver;

impl PathResolver {
    /// `EXPENSE_MACROS_HOME`, then the platform data directory, then `~/.expense_macros`.
    pub fn base_dir() -> PathBuf {
        Self::resolve_base(None)
    }

    /// Like [`PathResolver::base_dir`], with `custom` taking precedence over the
    /// platform defaults but not over the environment variable.
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        if let Some(from_env) = env::var_os(HOME_ENV) {
            return PathBuf::from(from_env);
        }
        if let Some(path) = custom {
            return path;
        }
        data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .or_else(|| home_dir().map(|home| home.join(HIDDEN_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn transactions_file_in(base: &Path) -> PathBuf {
        base.join(TRANSACTIONS_FILE)
    }

    pub fn settings_file_in(base: &Path) -> PathBuf {
        base.join(SETTINGS_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Staging path for an atomic write: `transactions.json` becomes `transactions.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
