use serde::{Deserialize, Serialize};

use crate::ids::CommitmentId;

/// Daily status of a commitment. Reset to `Pending` at every rollover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    /// Not yet acted on today
    Pending,
    /// Done for today
    Completed,
    /// Explicitly marked as missed for today
    Failed,
}

/// A single trackable promise within an active contract.
///
/// The commitment set is fixed for the lifetime of a contract: titles and
/// times never change after the contract starts, only `status` does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub id: CommitmentId,
    pub title: String,
    /// Advisory "HH:MM" time of day. Never enforced or alerted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub status: CommitmentStatus,
}

impl Commitment {
    /// Materialize a draft into a live commitment with a fresh id.
    pub fn from_draft(draft: &CommitmentDraft) -> Self {
        Self {
            id: CommitmentId::new(),
            title: draft.title.clone(),
            time: draft.time.clone(),
            status: CommitmentStatus::Pending,
        }
    }
}

/// Editable fields of a commitment draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitmentField {
    Title,
    Time,
}

/// A commitment as authored in a form or stored in a routine template:
/// no id, no status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl CommitmentDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set one recognized field. An empty time value clears the time.
    pub fn set_field(&mut self, field: CommitmentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CommitmentField::Title => self.title = value,
            CommitmentField::Time => {
                self.time = if value.is_empty() { None } else { Some(value) };
            }
        }
    }

    /// Trim the title; `None` when nothing but whitespace remains.
    pub fn normalized(&self) -> Option<CommitmentDraft> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(CommitmentDraft {
            title: title.to_string(),
            time: self.time.clone(),
        })
    }
}
