use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::DailyHistoryEntry;
use crate::ids::HistoryId;

/// Terminal status of an archived contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractOutcome {
    /// Ended by the explicit completion ritual
    Completed,
    /// Ended by a reset — the user broke the streak
    Failed,
    /// Legacy terminal status accepted from older archives
    Finished,
}

/// An archived contract. Immutable once created: the snapshot fields are
/// deep copies detached from the live contract, and the history log is
/// append-only, newest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractHistoryItem {
    pub id: HistoryId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_date: DateTime<Utc>,
    /// Archival timestamp.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_date: DateTime<Utc>,
    pub phase_duration: u32,
    pub status: ContractOutcome,
    /// Commitment titles only, detached from the live commitment objects.
    pub commitments_snapshot: Vec<String>,
    pub daily_history: Vec<DailyHistoryEntry>,
}
