use serde::{Deserialize, Serialize};

use crate::commitment::CommitmentDraft;
use crate::contract::AllowedDays;
use crate::ids::RoutineId;

/// A named, reusable commitment list, independent of any active contract.
/// Used to seed new contracts quickly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoutine {
    pub id: RoutineId,
    pub title: String,
    pub commitments: Vec<CommitmentDraft>,
    pub allowed_days: AllowedDays,
}
