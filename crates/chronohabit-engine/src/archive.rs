use chrono::{DateTime, Utc};

use chronohabit_types::{ContractHistoryItem, ContractOutcome, DisciplineContract, HistoryId};

/// Convert a terminated contract into an immutable archive item.
///
/// The snapshot is fully detached: commitment titles and the daily history
/// are deep copies, so later mutation of the live aggregate cannot reach
/// into the archive.
pub fn archive_contract(
    contract: &DisciplineContract,
    status: ContractOutcome,
    ended_at: DateTime<Utc>,
) -> ContractHistoryItem {
    ContractHistoryItem {
        id: HistoryId::new(),
        start_date: contract.start_date,
        end_date: ended_at,
        phase_duration: contract.current_phase,
        status,
        commitments_snapshot: contract.commitments.iter().map(|c| c.title.clone()).collect(),
        daily_history: contract.daily_history.clone(),
    }
}
