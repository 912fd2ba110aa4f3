//! [`HabitStorage`](crate::HabitStorage) over a [`KeyValueStore`] backend.
//!
//! State is cached in memory and written through on every mutation. A
//! malformed blob under a key is discarded on open (first run and corrupt
//! storage look the same). A failed write is logged and swallowed: the
//! in-memory copy stays authoritative for the session.

use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use chronohabit_types::{ContractHistoryItem, DisciplineContract, RoutineId, SavedRoutine};

use crate::kv::KeyValueStore;
use crate::traits::{ContractStore, HistoryStore, RoutineStore};
use crate::{StorageError, StorageResult};

/// Storage key for the active contract blob.
pub const CONTRACT_KEY: &str = "contract";
/// Storage key for the archive blob, newest first.
pub const PAST_CONTRACTS_KEY: &str = "pastContracts";
/// Storage key for the routine templates blob.
pub const SAVED_ROUTINES_KEY: &str = "savedRoutines";

#[derive(Default)]
struct CachedState {
    contract: Option<DisciplineContract>,
    history: Vec<ContractHistoryItem>,
    routines: Vec<SavedRoutine>,
}

/// Key-value backed ChronoHabit storage adapter.
pub struct JsonKvStorage<K: KeyValueStore> {
    backend: K,
    state: RwLock<CachedState>,
}

impl<K: KeyValueStore> JsonKvStorage<K> {
    /// Load all sections from the backend. Absent and malformed sections
    /// both yield empty state.
    pub fn open(backend: K) -> StorageResult<Self> {
        let contract = read_section(&backend, CONTRACT_KEY)?;
        let history = read_section(&backend, PAST_CONTRACTS_KEY)?.unwrap_or_default();
        let routines = read_section(&backend, SAVED_ROUTINES_KEY)?.unwrap_or_default();

        Ok(Self {
            backend,
            state: RwLock::new(CachedState {
                contract,
                history,
                routines,
            }),
        })
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(e) = self.backend.put(key, &raw) {
                    warn!(key, error = %e, "persist failed; in-memory state stays authoritative");
                }
            }
            Err(e) => {
                warn!(key, error = %e, "serialize failed; in-memory state stays authoritative");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            warn!(key, error = %e, "delete failed; in-memory state stays authoritative");
        }
    }
}

fn read_section<K: KeyValueStore, T: DeserializeOwned>(
    backend: &K,
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed stored JSON");
            Ok(None)
        }
    }
}

impl<K: KeyValueStore> ContractStore for JsonKvStorage<K> {
    fn load_contract(&self) -> StorageResult<Option<DisciplineContract>> {
        let guard = self
            .state
            .read()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        Ok(guard.contract.clone())
    }

    fn save_contract(&self, contract: &DisciplineContract) -> StorageResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        guard.contract = Some(contract.clone());
        self.persist(CONTRACT_KEY, contract);
        Ok(())
    }

    fn clear_contract(&self) -> StorageResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        guard.contract = None;
        self.remove(CONTRACT_KEY);
        Ok(())
    }
}

impl<K: KeyValueStore> HistoryStore for JsonKvStorage<K> {
    fn push_history(&self, item: ContractHistoryItem) -> StorageResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        guard.history.insert(0, item);
        self.persist(PAST_CONTRACTS_KEY, &guard.history);
        Ok(())
    }

    fn list_history(&self) -> StorageResult<Vec<ContractHistoryItem>> {
        let guard = self
            .state
            .read()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        Ok(guard.history.clone())
    }

    fn replace_history(&self, items: Vec<ContractHistoryItem>) -> StorageResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        guard.history = items;
        self.persist(PAST_CONTRACTS_KEY, &guard.history);
        Ok(())
    }
}

impl<K: KeyValueStore> RoutineStore for JsonKvStorage<K> {
    fn upsert_routine(&self, routine: &SavedRoutine) -> StorageResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        if let Some(existing) = guard.routines.iter_mut().find(|r| r.id == routine.id) {
            *existing = routine.clone();
        } else {
            guard.routines.push(routine.clone());
        }
        self.persist(SAVED_ROUTINES_KEY, &guard.routines);
        Ok(())
    }

    fn delete_routine(&self, id: &RoutineId) -> StorageResult<bool> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        let before = guard.routines.len();
        guard.routines.retain(|r| r.id != *id);
        let removed = guard.routines.len() < before;
        if removed {
            self.persist(SAVED_ROUTINES_KEY, &guard.routines);
        }
        Ok(removed)
    }

    fn list_routines(&self) -> StorageResult<Vec<SavedRoutine>> {
        let guard = self
            .state
            .read()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        Ok(guard.routines.clone())
    }

    fn replace_routines(&self, routines: Vec<SavedRoutine>) -> StorageResult<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| StorageError::Backend("state lock poisoned".to_string()))?;
        guard.routines = routines;
        self.persist(SAVED_ROUTINES_KEY, &guard.routines);
        Ok(())
    }
}
