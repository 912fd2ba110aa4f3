//! In-memory reference implementation for the ChronoHabit storage traits.
//!
//! This adapter is deterministic and test-friendly. Durable deployments use
//! [`JsonKvStorage`](crate::JsonKvStorage) over a persistent key-value
//! backend.

use std::sync::RwLock;

use chronohabit_types::{ContractHistoryItem, DisciplineContract, RoutineId, SavedRoutine};

use crate::traits::{ContractStore, HistoryStore, RoutineStore};
use crate::{StorageError, StorageResult};

/// In-memory ChronoHabit storage adapter.
#[derive(Default)]
pub struct InMemoryHabitStorage {
    contract: RwLock<Option<DisciplineContract>>,
    history: RwLock<Vec<ContractHistoryItem>>,
    routines: RwLock<Vec<SavedRoutine>>,
}

impl InMemoryHabitStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContractStore for InMemoryHabitStorage {
    fn load_contract(&self) -> StorageResult<Option<DisciplineContract>> {
        let guard = self
            .contract
            .read()
            .map_err(|_| StorageError::Backend("contract lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save_contract(&self, contract: &DisciplineContract) -> StorageResult<()> {
        let mut guard = self
            .contract
            .write()
            .map_err(|_| StorageError::Backend("contract lock poisoned".to_string()))?;
        *guard = Some(contract.clone());
        Ok(())
    }

    fn clear_contract(&self) -> StorageResult<()> {
        let mut guard = self
            .contract
            .write()
            .map_err(|_| StorageError::Backend("contract lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

impl HistoryStore for InMemoryHabitStorage {
    fn push_history(&self, item: ContractHistoryItem) -> StorageResult<()> {
        let mut guard = self
            .history
            .write()
            .map_err(|_| StorageError::Backend("history lock poisoned".to_string()))?;
        guard.insert(0, item);
        Ok(())
    }

    fn list_history(&self) -> StorageResult<Vec<ContractHistoryItem>> {
        let guard = self
            .history
            .read()
            .map_err(|_| StorageError::Backend("history lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn replace_history(&self, items: Vec<ContractHistoryItem>) -> StorageResult<()> {
        let mut guard = self
            .history
            .write()
            .map_err(|_| StorageError::Backend("history lock poisoned".to_string()))?;
        *guard = items;
        Ok(())
    }
}

impl RoutineStore for InMemoryHabitStorage {
    fn upsert_routine(&self, routine: &SavedRoutine) -> StorageResult<()> {
        let mut guard = self
            .routines
            .write()
            .map_err(|_| StorageError::Backend("routines lock poisoned".to_string()))?;
        if let Some(existing) = guard.iter_mut().find(|r| r.id == routine.id) {
            *existing = routine.clone();
        } else {
            guard.push(routine.clone());
        }
        Ok(())
    }

    fn delete_routine(&self, id: &RoutineId) -> StorageResult<bool> {
        let mut guard = self
            .routines
            .write()
            .map_err(|_| StorageError::Backend("routines lock poisoned".to_string()))?;
        let before = guard.len();
        guard.retain(|r| r.id != *id);
        Ok(guard.len() < before)
    }

    fn list_routines(&self) -> StorageResult<Vec<SavedRoutine>> {
        let guard = self
            .routines
            .read()
            .map_err(|_| StorageError::Backend("routines lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn replace_routines(&self, routines: Vec<SavedRoutine>) -> StorageResult<()> {
        let mut guard = self
            .routines
            .write()
            .map_err(|_| StorageError::Backend("routines lock poisoned".to_string()))?;
        *guard = routines;
        Ok(())
    }
}
