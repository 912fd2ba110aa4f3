use chronohabit_types::{DailyHistoryEntry, DisciplineContract};

/// Round to one decimal place, the precision points are stored at.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Recompute today's score and upsert it into the daily history.
///
/// Points are `streak_level * completed/total`, rounded to one decimal;
/// a contract with no commitments scores zero. The history is keyed by
/// `last_check_date`, so repeated rescoring on one day overwrites that
/// day's entry instead of appending.
pub fn rescore_today(contract: &mut DisciplineContract) {
    let date = contract.last_check_date;
    let total = contract.commitments.len() as u32;
    let completed = contract.completed_count();
    let ratio = if total == 0 {
        0.0
    } else {
        f64::from(completed) / f64::from(total)
    };

    let entry = DailyHistoryEntry {
        date,
        points: round1(contract.current_streak_level * ratio),
        streak_level: contract.current_streak_level,
        total_commitments: total,
        completed_commitments: completed,
    };

    if let Some(existing) = contract.history_entry_mut(date) {
        *existing = entry;
    } else {
        contract.daily_history.push(entry);
    }
}
