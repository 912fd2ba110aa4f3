use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commitment::{Commitment, CommitmentStatus};
use crate::ids::{CommitmentId, ContractId};

/// Errors from constructing an [`AllowedDays`] set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllowedDaysError {
    #[error("allowed days must not be empty")]
    Empty,
    #[error("weekday number out of range 0-6: {0}")]
    OutOfRange(u8),
}

/// The weekdays on which a contract is live, 0 = Sunday .. 6 = Saturday.
///
/// Days outside the set are rest days: rollover does not advance the day
/// counter and commitments are not required. The set is validated on
/// construction and on deserialization — an empty set would describe a
/// contract that can never be live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct AllowedDays(BTreeSet<u8>);

impl AllowedDays {
    pub fn new(days: impl IntoIterator<Item = u8>) -> Result<Self, AllowedDaysError> {
        let mut set = BTreeSet::new();
        for day in days {
            if day > 6 {
                return Err(AllowedDaysError::OutOfRange(day));
            }
            set.insert(day);
        }
        if set.is_empty() {
            return Err(AllowedDaysError::Empty);
        }
        Ok(Self(set))
    }

    /// All seven weekdays.
    pub fn every_day() -> Self {
        Self((0..=6).collect())
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0.contains(&(weekday.num_days_from_sunday() as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for AllowedDays {
    type Error = AllowedDaysError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<AllowedDays> for Vec<u8> {
    fn from(days: AllowedDays) -> Self {
        days.0.into_iter().collect()
    }
}

/// Per-day scoring snapshot. At most one entry per calendar date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHistoryEntry {
    pub date: NaiveDate,
    pub points: f64,
    pub streak_level: f64,
    pub total_commitments: u32,
    pub completed_commitments: u32,
}

/// The active discipline contract: a fixed set of daily commitments held
/// for a target number of days.
///
/// At most one contract exists at a time; absence of the aggregate means
/// "no active contract". `day_in_phase` starts at 1 — the day the contract
/// starts counts as day 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineContract {
    pub id: ContractId,
    /// Target duration in days. Not constrained to the suggested
    /// 1, 3, 7, 10 escalation sequence.
    pub current_phase: u32,
    /// Live days elapsed since the start, counting the start day as 1.
    pub day_in_phase: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_date: DateTime<Utc>,
    /// Calendar date of the last rollover evaluation — the rollover guard key.
    pub last_check_date: NaiveDate,
    pub commitments: Vec<Commitment>,
    pub daily_history: Vec<DailyHistoryEntry>,
    pub current_streak_level: f64,
    /// Set when the contract is reset. Kept for persisted-layout
    /// compatibility; nothing reads it back.
    pub failed: bool,
    pub allowed_days: AllowedDays,
    /// True once today's "complete day" action has been taken.
    pub daily_completed: bool,
}

impl DisciplineContract {
    /// The day counter has reached the phase target.
    pub fn is_phase_done(&self) -> bool {
        self.day_in_phase >= self.current_phase
    }

    /// Every commitment is completed today.
    pub fn all_completed(&self) -> bool {
        !self.commitments.is_empty()
            && self
                .commitments
                .iter()
                .all(|c| c.status == CommitmentStatus::Completed)
    }

    pub fn completed_count(&self) -> u32 {
        self.commitments
            .iter()
            .filter(|c| c.status == CommitmentStatus::Completed)
            .count() as u32
    }

    pub fn commitment(&self, id: &CommitmentId) -> Option<&Commitment> {
        self.commitments.iter().find(|c| c.id == *id)
    }

    pub fn commitment_mut(&mut self, id: &CommitmentId) -> Option<&mut Commitment> {
        self.commitments.iter_mut().find(|c| c.id == *id)
    }

    pub fn history_entry(&self, date: NaiveDate) -> Option<&DailyHistoryEntry> {
        self.daily_history.iter().find(|e| e.date == date)
    }

    pub fn history_entry_mut(&mut self, date: NaiveDate) -> Option<&mut DailyHistoryEntry> {
        self.daily_history.iter_mut().find(|e| e.date == date)
    }
}
