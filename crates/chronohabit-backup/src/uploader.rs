use crate::BackupResult;

/// Destination for best-effort cloud backups.
///
/// Implementations own all network concerns (auth, retries, timeouts).
/// Callers must treat `upload` as fire-and-forget: local state transitions
/// complete before the upload is attempted and are never rolled back on
/// failure.
pub trait BackupUploader: Send + Sync {
    fn upload(&self, payload: &str) -> BackupResult<()>;
}

/// Uploader that discards everything. The default when cloud sync is not
/// configured.
pub struct NoopUploader;

impl BackupUploader for NoopUploader {
    fn upload(&self, _payload: &str) -> BackupResult<()> {
        Ok(())
    }
}
