use chrono::{Datelike, NaiveDate};

use chronohabit_types::{CommitmentStatus, DisciplineContract};

/// What a rollover evaluation did to the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// Already evaluated for this date — nothing changed.
    Unchanged,
    /// A live day began: counter advanced, statuses reset.
    Advanced,
    /// A rest day began: only the check date moved.
    RestDay,
}

/// Evaluate the date boundary for `today`.
///
/// The inequality against `last_check_date` is the idempotence guard:
/// repeated calls on the same date are no-ops. A gap of several unseen
/// days advances `day_in_phase` by exactly one — skipped days are not
/// retroactively filled, and nothing here ever fails a contract.
pub fn apply_rollover(contract: &mut DisciplineContract, today: NaiveDate) -> RolloverOutcome {
    if contract.last_check_date == today {
        return RolloverOutcome::Unchanged;
    }

    contract.last_check_date = today;

    if !contract.allowed_days.contains(today.weekday()) {
        return RolloverOutcome::RestDay;
    }

    contract.day_in_phase = contract.day_in_phase.saturating_add(1);
    for commitment in &mut contract.commitments {
        commitment.status = CommitmentStatus::Pending;
    }
    contract.daily_completed = false;
    RolloverOutcome::Advanced
}
