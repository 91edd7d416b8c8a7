use thiserror::Error;

/// Unified error type for the domain, engine, and storage layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("No budget configuration; run setup first")]
    ConfigMissing,
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Settings error: {0}")]
    SettingsError(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_surface_as_storage_errors() {
        let err: BudgetError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, BudgetError::StorageError(ref msg) if msg.contains("disk full")));
    }
}
