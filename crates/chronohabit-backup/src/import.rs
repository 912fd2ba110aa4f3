use std::collections::HashSet;

use tracing::{info, warn};

use chronohabit_storage::HabitStorage;
use chronohabit_types::ContractHistoryItem;

use crate::export::{ExportDocument, EXPORT_VERSION};
use crate::{BackupError, BackupResult};

/// How an imported document is applied to existing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportMode {
    /// Every section present in the document replaces the corresponding
    /// store wholesale. Absent sections are left untouched.
    Replace,
    /// Set-union keyed by entity id for archives and routines, with the
    /// incoming copy winning on collision. An incoming contract replaces
    /// the active one (it is a singleton; last write wins).
    Merge,
}

/// What an import actually touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub mode: ImportMode,
    pub contract_applied: bool,
    /// Archive size after apply, when the section was present.
    pub history_len: Option<usize>,
    /// Routine count after apply, when the section was present.
    pub routines_len: Option<usize>,
}

/// Parse and apply a backup document from its JSON form.
///
/// Parsing and validation happen before any store mutation: a malformed
/// document returns an error and leaves all state untouched.
pub fn import_json(
    storage: &dyn HabitStorage,
    json: &str,
    mode: ImportMode,
) -> BackupResult<ImportSummary> {
    let document: ExportDocument = serde_json::from_str(json)?;
    import_document(storage, document, mode)
}

/// Apply an already-parsed backup document.
pub fn import_document(
    storage: &dyn HabitStorage,
    document: ExportDocument,
    mode: ImportMode,
) -> BackupResult<ImportSummary> {
    if document.version == 0 || document.version > EXPORT_VERSION {
        return Err(BackupError::UnsupportedVersion(document.version));
    }

    let mut summary = ImportSummary {
        mode,
        contract_applied: false,
        history_len: None,
        routines_len: None,
    };

    match document.contract {
        None => {}
        Some(None) => match mode {
            ImportMode::Replace => {
                storage.clear_contract()?;
                summary.contract_applied = true;
            }
            // A merge adds state; an explicit null has nothing to add.
            ImportMode::Merge => {
                warn!("merge import ignores explicit null contract");
            }
        },
        Some(Some(contract)) => {
            storage.save_contract(&contract)?;
            summary.contract_applied = true;
        }
    }

    if let Some(incoming) = document.past_contracts {
        let merged = match mode {
            ImportMode::Replace => incoming,
            ImportMode::Merge => merge_history(storage.list_history()?, incoming),
        };
        summary.history_len = Some(merged.len());
        storage.replace_history(merged)?;
    }

    if let Some(incoming) = document.saved_routines {
        match mode {
            ImportMode::Replace => {
                summary.routines_len = Some(incoming.len());
                storage.replace_routines(incoming)?;
            }
            ImportMode::Merge => {
                for routine in &incoming {
                    storage.upsert_routine(routine)?;
                }
                summary.routines_len = Some(storage.list_routines()?.len());
            }
        }
    }

    info!(
        mode = ?mode,
        contract = summary.contract_applied,
        history = ?summary.history_len,
        routines = ?summary.routines_len,
        "backup import applied"
    );
    Ok(summary)
}

/// Union two archives by item id, incoming winning on collision, ordered
/// newest-first by end date.
fn merge_history(
    existing: Vec<ContractHistoryItem>,
    incoming: Vec<ContractHistoryItem>,
) -> Vec<ContractHistoryItem> {
    let incoming_ids: HashSet<_> = incoming.iter().map(|item| item.id.clone()).collect();

    let mut merged: Vec<ContractHistoryItem> = incoming;
    merged.extend(
        existing
            .into_iter()
            .filter(|item| !incoming_ids.contains(&item.id)),
    );
    merged.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use chronohabit_storage::{ContractStore, HistoryStore, InMemoryHabitStorage, RoutineStore};
    use chronohabit_types::{
        AllowedDays, CommitmentDraft, ContractOutcome, HistoryId, RoutineId, SavedRoutine,
    };

    use crate::export::export_json;

    fn history_item(offset_secs: i64) -> ContractHistoryItem {
        ContractHistoryItem {
            id: HistoryId::new(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::seconds(offset_secs),
            phase_duration: 3,
            status: ContractOutcome::Completed,
            commitments_snapshot: vec!["Read".into()],
            daily_history: vec![],
        }
    }

    fn routine(title: &str) -> SavedRoutine {
        SavedRoutine {
            id: RoutineId::new(),
            title: title.into(),
            commitments: vec![CommitmentDraft::new("Read")],
            allowed_days: AllowedDays::every_day(),
        }
    }

    #[test]
    fn malformed_json_leaves_state_untouched() {
        let storage = InMemoryHabitStorage::new();
        storage.upsert_routine(&routine("Keep me")).unwrap();

        let result = import_json(&storage, "{definitely not json", ImportMode::Replace);
        assert!(matches!(result, Err(BackupError::Malformed(_))));
        assert_eq!(storage.list_routines().unwrap().len(), 1);
    }

    #[test]
    fn future_version_is_rejected() {
        let storage = InMemoryHabitStorage::new();
        let result = import_json(
            &storage,
            r#"{"version": 99, "timestamp": 0}"#,
            ImportMode::Replace,
        );
        assert!(matches!(result, Err(BackupError::UnsupportedVersion(99))));
    }

    #[test]
    fn export_import_roundtrip_replace() {
        let source = InMemoryHabitStorage::new();
        source.push_history(history_item(0)).unwrap();
        source.upsert_routine(&routine("Morning")).unwrap();
        let json = export_json(&source, Utc::now()).unwrap();

        let target = InMemoryHabitStorage::new();
        target.upsert_routine(&routine("Will be replaced")).unwrap();

        let summary = import_json(&target, &json, ImportMode::Replace).unwrap();
        assert!(summary.contract_applied);
        assert_eq!(summary.history_len, Some(1));
        assert_eq!(summary.routines_len, Some(1));

        assert!(target.load_contract().unwrap().is_none());
        assert_eq!(
            target.list_history().unwrap(),
            source.list_history().unwrap()
        );
        assert_eq!(
            target.list_routines().unwrap()[0].title,
            "Morning".to_string()
        );
    }

    #[test]
    fn replace_leaves_absent_sections_untouched() {
        let storage = InMemoryHabitStorage::new();
        storage.upsert_routine(&routine("Survivor")).unwrap();

        let summary = import_json(
            &storage,
            r#"{"version": 1, "timestamp": 0, "pastContracts": []}"#,
            ImportMode::Replace,
        )
        .unwrap();

        assert!(!summary.contract_applied);
        assert_eq!(summary.history_len, Some(0));
        assert_eq!(summary.routines_len, None);
        assert_eq!(storage.list_routines().unwrap().len(), 1);
    }

    #[test]
    fn merge_unions_by_id_incoming_wins() {
        let storage = InMemoryHabitStorage::new();
        let shared = routine("Local title");
        storage.upsert_routine(&shared).unwrap();
        storage.upsert_routine(&routine("Local only")).unwrap();

        let old = history_item(0);
        storage.push_history(old.clone()).unwrap();

        let mut incoming_shared = shared.clone();
        incoming_shared.title = "Remote title".into();
        let newer = history_item(60);

        let doc = ExportDocument {
            version: 1,
            timestamp: Utc::now(),
            tasks: None,
            time_entries: None,
            subtasks: None,
            goals: None,
            contract: None,
            past_contracts: Some(vec![newer.clone(), old.clone()]),
            saved_routines: Some(vec![incoming_shared]),
        };

        let summary = import_document(&storage, doc, ImportMode::Merge).unwrap();
        assert_eq!(summary.history_len, Some(2));
        assert_eq!(summary.routines_len, Some(2));

        let history = storage.list_history().unwrap();
        assert_eq!(history[0].id, newer.id, "newest first after merge");

        let routines = storage.list_routines().unwrap();
        let merged = routines.iter().find(|r| r.id == shared.id).unwrap();
        assert_eq!(merged.title, "Remote title");
        assert!(routines.iter().any(|r| r.title == "Local only"));
    }
}
