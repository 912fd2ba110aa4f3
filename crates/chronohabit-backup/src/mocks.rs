use std::sync::{Mutex, PoisonError};

use crate::uploader::BackupUploader;
use crate::{BackupError, BackupResult};

/// Uploader that records every payload for inspection in tests.
#[derive(Default)]
pub struct RecordingUploader {
    payloads: Mutex<Vec<String>>,
}

impl RecordingUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn upload_count(&self) -> usize {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl BackupUploader for RecordingUploader {
    fn upload(&self, payload: &str) -> BackupResult<()> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.to_string());
        Ok(())
    }
}

/// Uploader that rejects every payload, for exercising the best-effort
/// contract.
pub struct FailingUploader;

impl BackupUploader for FailingUploader {
    fn upload(&self, _payload: &str) -> BackupResult<()> {
        Err(BackupError::Upload("simulated network failure".to_string()))
    }
}
