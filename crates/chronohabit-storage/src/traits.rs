use chronohabit_types::{ContractHistoryItem, DisciplineContract, RoutineId, SavedRoutine};

use crate::StorageResult;

/// Storage interface for the singleton active contract.
///
/// Absence of a stored contract means "no active contract" — first run and
/// the state after completion or reset look identical.
pub trait ContractStore: Send + Sync {
    fn load_contract(&self) -> StorageResult<Option<DisciplineContract>>;

    fn save_contract(&self, contract: &DisciplineContract) -> StorageResult<()>;

    fn clear_contract(&self) -> StorageResult<()>;
}

/// Storage interface for the archive of terminated contracts.
pub trait HistoryStore: Send + Sync {
    /// Prepend an archived contract. The list is kept newest-first — the
    /// display order the UI depends on.
    fn push_history(&self, item: ContractHistoryItem) -> StorageResult<()>;

    /// Read the archive, newest first.
    fn list_history(&self) -> StorageResult<Vec<ContractHistoryItem>>;

    /// Replace the whole archive (import path).
    fn replace_history(&self, items: Vec<ContractHistoryItem>) -> StorageResult<()>;
}

/// Storage interface for saved routine templates.
pub trait RoutineStore: Send + Sync {
    /// Insert or overwrite a routine by id.
    fn upsert_routine(&self, routine: &SavedRoutine) -> StorageResult<()>;

    /// Remove a routine. Returns `false` when no routine had that id.
    fn delete_routine(&self, id: &RoutineId) -> StorageResult<bool>;

    fn list_routines(&self) -> StorageResult<Vec<SavedRoutine>>;

    /// Replace all routines (import path).
    fn replace_routines(&self, routines: Vec<SavedRoutine>) -> StorageResult<()>;
}

/// Unified storage bundle used by the ChronoHabit engine and gateway.
pub trait HabitStorage: ContractStore + HistoryStore + RoutineStore {}

impl<T> HabitStorage for T where T: ContractStore + HistoryStore + RoutineStore {}
