use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use chronohabit_storage::HabitStorage;
use chronohabit_types::{ContractHistoryItem, DisciplineContract, SavedRoutine};

use crate::BackupResult;

/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;

/// The full-state backup document.
///
/// Sections absent from a document are left untouched on import, so every
/// section is optional. For the singleton contract the document further
/// distinguishes an explicit `null` (clear the active contract) from an
/// absent key (leave it alone) — hence the nested option.
///
/// The collaborator sections (`tasks`, `timeEntries`, `subtasks`, `goals`)
/// belong to stores outside this core. They are carried verbatim: a caller
/// that owns them fills the fields in before serializing, and gets them
/// back untouched after parsing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_entries: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Value>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_present",
        deserialize_with = "deserialize_present"
    )]
    pub contract: Option<Option<DisciplineContract>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_contracts: Option<Vec<ContractHistoryItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_routines: Option<Vec<SavedRoutine>>,
}

// Serialize the inner option when the key is present, so a cleared
// contract appears as an explicit JSON null.
fn serialize_present<S>(
    value: &Option<Option<DisciplineContract>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

fn deserialize_present<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DisciplineContract>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<DisciplineContract>::deserialize(
        deserializer,
    )?))
}

/// Snapshot the full core state into a backup document.
pub fn export_document(
    storage: &dyn HabitStorage,
    now: DateTime<Utc>,
) -> BackupResult<ExportDocument> {
    Ok(ExportDocument {
        version: EXPORT_VERSION,
        timestamp: now,
        tasks: None,
        time_entries: None,
        subtasks: None,
        goals: None,
        contract: Some(storage.load_contract()?),
        past_contracts: Some(storage.list_history()?),
        saved_routines: Some(storage.list_routines()?),
    })
}

/// Export as the user-download format: 2-space indented JSON.
pub fn export_json(storage: &dyn HabitStorage, now: DateTime<Utc>) -> BackupResult<String> {
    let document = export_document(storage, now)?;
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Filename offered for a user download of the export.
pub fn backup_filename(date: NaiveDate) -> String {
    format!("chronohabit_backup_{date}.json")
}
