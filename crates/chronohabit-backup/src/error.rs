use chronohabit_storage::StorageError;
use thiserror::Error;

/// Result type for gateway operations.
pub type BackupResult<T> = Result<T, BackupError>;

/// Errors from the export/import gateway.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("malformed backup document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported backup version: {0}")]
    UnsupportedVersion(u32),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("upload failed: {0}")]
    Upload(String),
}
