use std::sync::Arc;

use tracing::{debug, info, warn};

use chronohabit_backup::{export_json, BackupUploader, NoopUploader};
use chronohabit_storage::HabitStorage;
use chronohabit_types::{
    AllowedDays, Commitment, CommitmentDraft, CommitmentId, CommitmentStatus, ContractHistoryItem,
    ContractId, ContractOutcome, DisciplineContract, RoutineId, SavedRoutine,
};

use crate::archive::archive_contract;
use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, EngineResult};
use crate::rollover::{apply_rollover, RolloverOutcome};
use crate::scoring::rescore_today;

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Scoring multiplier new contracts start with. Carried through
    /// snapshots but never escalated.
    pub initial_streak_level: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_streak_level: 1.0,
        }
    }
}

/// The discipline contract engine.
///
/// Owns the singleton active contract, the archive of past contracts, and
/// the routine templates, all behind injected storage. Every public
/// operation evaluates the daily rollover before its own logic and
/// persists synchronously. The backup uploader is only ever invoked
/// best-effort, after local effects are committed.
pub struct ContractEngine {
    storage: Arc<dyn HabitStorage>,
    clock: Arc<dyn Clock>,
    uploader: Arc<dyn BackupUploader>,
    config: EngineConfig,
}

impl ContractEngine {
    pub fn new(
        storage: Arc<dyn HabitStorage>,
        clock: Arc<dyn Clock>,
        uploader: Arc<dyn BackupUploader>,
        config: EngineConfig,
    ) -> Self {
        Self {
            storage,
            clock,
            uploader,
            config,
        }
    }

    /// Engine on the system clock with cloud sync disabled.
    pub fn with_defaults(storage: Arc<dyn HabitStorage>) -> Self {
        Self::new(
            storage,
            Arc::new(SystemClock),
            Arc::new(NoopUploader),
            EngineConfig::default(),
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a new contract, replacing any active one.
    ///
    /// Blank commitment titles are dropped; an empty remainder or a
    /// zero-day duration is rejected.
    pub fn start_contract(
        &self,
        drafts: &[CommitmentDraft],
        duration_days: u32,
        allowed_days: AllowedDays,
    ) -> EngineResult<DisciplineContract> {
        let commitments: Vec<Commitment> = drafts
            .iter()
            .filter_map(CommitmentDraft::normalized)
            .map(|draft| Commitment::from_draft(&draft))
            .collect();

        if commitments.is_empty() {
            return Err(EngineError::InvalidArgument(
                "a contract needs at least one non-blank commitment".to_string(),
            ));
        }
        if duration_days == 0 {
            return Err(EngineError::InvalidArgument(
                "contract duration must be at least one day".to_string(),
            ));
        }

        let mut contract = DisciplineContract {
            id: ContractId::new(),
            current_phase: duration_days,
            // The start day counts as day 1.
            day_in_phase: 1,
            start_date: self.clock.now(),
            last_check_date: self.clock.today(),
            commitments,
            daily_history: Vec::new(),
            current_streak_level: self.config.initial_streak_level,
            failed: false,
            allowed_days,
            daily_completed: false,
        };
        rescore_today(&mut contract);
        self.storage.save_contract(&contract)?;

        info!(
            contract = %contract.id,
            phase_days = duration_days,
            commitments = contract.commitments.len(),
            "contract started"
        );
        Ok(contract)
    }

    /// Start a contract seeded from a saved routine.
    pub fn start_contract_from_routine(
        &self,
        routine_id: &RoutineId,
        duration_days: u32,
    ) -> EngineResult<DisciplineContract> {
        let routine = self
            .storage
            .list_routines()?
            .into_iter()
            .find(|r| r.id == *routine_id)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!("unknown routine: {routine_id}"))
            })?;

        self.start_contract(&routine.commitments, duration_days, routine.allowed_days)
    }

    /// The active contract after today's rollover, or `None`.
    ///
    /// This is the read path: rendering the contract is what triggers the
    /// date-boundary transition, and its side effects are persisted here.
    pub fn contract(&self) -> EngineResult<Option<DisciplineContract>> {
        self.load_rolled()
    }

    /// Set a commitment's status directly. Returns `false` when there is
    /// no active contract or no such commitment.
    pub fn set_commitment_status(
        &self,
        id: &CommitmentId,
        status: CommitmentStatus,
    ) -> EngineResult<bool> {
        let Some(mut contract) = self.load_rolled()? else {
            return Ok(false);
        };
        let Some(commitment) = contract.commitment_mut(id) else {
            debug!(commitment = %id, "status change for unknown commitment ignored");
            return Ok(false);
        };

        commitment.status = status;
        rescore_today(&mut contract);
        self.storage.save_contract(&contract)?;

        debug!(commitment = %id, ?status, "commitment status set");
        Ok(true)
    }

    /// Tap gesture: a completed commitment goes back to pending, anything
    /// else (pending or failed) becomes completed.
    pub fn toggle_commitment(&self, id: &CommitmentId) -> EngineResult<bool> {
        let Some(contract) = self.load_rolled()? else {
            return Ok(false);
        };
        let Some(commitment) = contract.commitment(id) else {
            debug!(commitment = %id, "toggle for unknown commitment ignored");
            return Ok(false);
        };

        let next = match commitment.status {
            CommitmentStatus::Completed => CommitmentStatus::Pending,
            CommitmentStatus::Pending | CommitmentStatus::Failed => CommitmentStatus::Completed,
        };
        self.set_commitment_status(id, next)
    }

    /// Snapshot today's score and enter the "come back tomorrow" state.
    /// Does not terminate the contract.
    pub fn complete_day(&self) -> EngineResult<bool> {
        let Some(mut contract) = self.load_rolled()? else {
            return Ok(false);
        };

        rescore_today(&mut contract);
        contract.daily_completed = true;
        self.storage.save_contract(&contract)?;

        info!(
            contract = %contract.id,
            day = contract.day_in_phase,
            of = contract.current_phase,
            "day completed"
        );
        Ok(true)
    }

    /// Deliberately finish the contract: archive it as completed and
    /// clear the active aggregate.
    pub fn complete_contract(&self) -> EngineResult<Option<ContractHistoryItem>> {
        let Some(mut contract) = self.load_rolled()? else {
            return Ok(None);
        };

        rescore_today(&mut contract);
        let item = archive_contract(&contract, ContractOutcome::Completed, self.clock.now());
        self.storage.push_history(item.clone())?;
        self.storage.clear_contract()?;

        info!(
            contract = %contract.id,
            days_held = contract.day_in_phase,
            "contract completed and archived"
        );
        Ok(Some(item))
    }

    /// Break the streak: zero today's points, archive the contract as
    /// failed, clear the aggregate, then fire a best-effort cloud backup.
    pub fn reset_contract(&self) -> EngineResult<Option<ContractHistoryItem>> {
        let Some(mut contract) = self.load_rolled()? else {
            return Ok(None);
        };

        rescore_today(&mut contract);
        let last_checked = contract.last_check_date;
        if let Some(entry) = contract.history_entry_mut(last_checked) {
            entry.points = 0.0;
        }
        contract.failed = true;

        let item = archive_contract(&contract, ContractOutcome::Failed, self.clock.now());
        self.storage.push_history(item.clone())?;
        self.storage.clear_contract()?;

        info!(
            contract = %contract.id,
            days_held = contract.day_in_phase,
            "contract reset and archived as failed"
        );

        // Local effects are committed; the upload may fail freely.
        match export_json(self.storage.as_ref(), self.clock.now()) {
            Ok(payload) => {
                if let Err(e) = self.uploader.upload(&payload) {
                    warn!(error = %e, "post-reset backup upload failed");
                }
            }
            Err(e) => warn!(error = %e, "post-reset backup export failed"),
        }

        Ok(Some(item))
    }

    /// The archive, newest first.
    pub fn history(&self) -> EngineResult<Vec<ContractHistoryItem>> {
        Ok(self.storage.list_history()?)
    }

    /// Save a routine template from a blank form.
    pub fn save_routine(
        &self,
        title: &str,
        drafts: &[CommitmentDraft],
        allowed_days: AllowedDays,
    ) -> EngineResult<SavedRoutine> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EngineError::InvalidArgument(
                "a routine needs a title".to_string(),
            ));
        }

        let commitments: Vec<CommitmentDraft> = drafts
            .iter()
            .filter_map(CommitmentDraft::normalized)
            .collect();
        if commitments.is_empty() {
            return Err(EngineError::InvalidArgument(
                "a routine needs at least one non-blank commitment".to_string(),
            ));
        }

        let routine = SavedRoutine {
            id: RoutineId::new(),
            title: title.to_string(),
            commitments,
            allowed_days,
        };
        self.storage.upsert_routine(&routine)?;

        info!(routine = %routine.id, title = %routine.title, "routine saved");
        Ok(routine)
    }

    /// Save a routine snapshotting the active contract's commitments.
    /// `None` when there is no active contract.
    pub fn routine_from_contract(&self, title: &str) -> EngineResult<Option<SavedRoutine>> {
        let Some(contract) = self.load_rolled()? else {
            return Ok(None);
        };

        let drafts: Vec<CommitmentDraft> = contract
            .commitments
            .iter()
            .map(|c| CommitmentDraft {
                title: c.title.clone(),
                time: c.time.clone(),
            })
            .collect();

        self.save_routine(title, &drafts, contract.allowed_days.clone())
            .map(Some)
    }

    /// Save a routine from an archived contract. The archive keeps titles
    /// only, so times are empty and the routine runs every day.
    pub fn routine_from_history(
        &self,
        title: &str,
        item: &ContractHistoryItem,
    ) -> EngineResult<SavedRoutine> {
        let drafts: Vec<CommitmentDraft> = item
            .commitments_snapshot
            .iter()
            .map(CommitmentDraft::new)
            .collect();

        self.save_routine(title, &drafts, AllowedDays::every_day())
    }

    /// Delete a routine. Returns `false` when no routine had that id.
    pub fn delete_routine(&self, id: &RoutineId) -> EngineResult<bool> {
        let removed = self.storage.delete_routine(id)?;
        if removed {
            info!(routine = %id, "routine deleted");
        }
        Ok(removed)
    }

    pub fn routines(&self) -> EngineResult<Vec<SavedRoutine>> {
        Ok(self.storage.list_routines()?)
    }

    /// Load the contract and apply today's rollover, persisting its
    /// effects before anything else sees the aggregate.
    fn load_rolled(&self) -> EngineResult<Option<DisciplineContract>> {
        let Some(mut contract) = self.storage.load_contract()? else {
            return Ok(None);
        };

        let today = self.clock.today();
        match apply_rollover(&mut contract, today) {
            RolloverOutcome::Unchanged => {}
            outcome => {
                debug!(
                    contract = %contract.id,
                    ?outcome,
                    day_in_phase = contract.day_in_phase,
                    %today,
                    "daily rollover applied"
                );
                self.storage.save_contract(&contract)?;
            }
        }
        Ok(Some(contract))
    }
}
