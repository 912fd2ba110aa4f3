//! Shared harness for the integration scenarios.

use std::sync::Arc;

use chrono::NaiveDate;

use chronohabit_backup::RecordingUploader;
use chronohabit_engine::{ContractEngine, EngineConfig, ManualClock};
use chronohabit_storage::InMemoryHabitStorage;
use chronohabit_types::{AllowedDays, CommitmentDraft, CommitmentStatus, DisciplineContract};

/// Full stack on in-memory storage with a manual calendar and a recording
/// backup uploader.
pub struct Harness {
    pub engine: ContractEngine,
    pub storage: Arc<InMemoryHabitStorage>,
    pub clock: Arc<ManualClock>,
    pub uploader: Arc<RecordingUploader>,
}

impl Harness {
    pub fn on_date(date: NaiveDate) -> Self {
        init_tracing();

        let storage = Arc::new(InMemoryHabitStorage::new());
        let clock = Arc::new(ManualClock::starting_at(date));
        let uploader = Arc::new(RecordingUploader::new());
        let engine = ContractEngine::new(
            storage.clone(),
            clock.clone(),
            uploader.clone(),
            EngineConfig::default(),
        );

        Self {
            engine,
            storage,
            clock,
            uploader,
        }
    }

    /// Start a "Read"/"Exercise" contract live on every weekday.
    pub fn start_default_contract(&self, duration_days: u32) -> DisciplineContract {
        self.engine
            .start_contract(
                &[
                    CommitmentDraft::new("Read").with_time("07:00"),
                    CommitmentDraft::new("Exercise"),
                ],
                duration_days,
                AllowedDays::every_day(),
            )
            .expect("start contract")
    }

    /// Mark every commitment of the active contract completed.
    pub fn complete_all(&self) {
        let contract = self
            .engine
            .contract()
            .expect("load contract")
            .expect("active contract");
        for commitment in &contract.commitments {
            self.engine
                .set_commitment_status(&commitment.id, CommitmentStatus::Completed)
                .expect("set status");
        }
    }
}

/// 2026-08-03, a Monday — the anchor date most scenarios run from.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date")
}

/// Install a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
