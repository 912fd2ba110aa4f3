//! Export/import gateway and cloud-backup seam for ChronoHabit.
//!
//! The gateway produces a versioned JSON document covering the full
//! persisted state and restores it atomically: the whole document is parsed
//! and validated before any store is touched, so a malformed file can never
//! corrupt existing state. Sections owned by excluded collaborators (tasks,
//! time entries, subtasks, goals) ride along as opaque JSON so a backup of
//! the full application round-trips losslessly through this crate.
//!
//! Cloud sync goes through the [`BackupUploader`] trait. Upload is
//! best-effort by contract: callers fire it after state-changing events and
//! never let its outcome block or roll back a local transition.

pub mod error;
pub mod export;
pub mod import;
pub mod mocks;
pub mod uploader;

pub use error::{BackupError, BackupResult};
pub use export::{backup_filename, export_document, export_json, ExportDocument, EXPORT_VERSION};
pub use import::{import_document, import_json, ImportMode, ImportSummary};
pub use mocks::{FailingUploader, RecordingUploader};
pub use uploader::{BackupUploader, NoopUploader};
