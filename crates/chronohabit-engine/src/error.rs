use chronohabit_storage::StorageError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from the contract engine.
///
/// Missing targets (no active contract, unknown commitment id) are not
/// errors: those operations report `false`/`None` so a stale UI action
/// stays harmless.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
