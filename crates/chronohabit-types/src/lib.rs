//! Core type definitions for the ChronoHabit discipline engine.
//!
//! This crate provides the persisted data model shared by every ChronoHabit
//! crate. No business logic — just types, cheap predicates, and field-level
//! constructors. All persisted JSON uses camelCase field names to match the
//! stored-state layout.

pub mod commitment;
pub mod contract;
pub mod history;
pub mod ids;
pub mod routine;

// Re-export primary types at crate root for ergonomic use.
pub use commitment::{Commitment, CommitmentDraft, CommitmentField, CommitmentStatus};
pub use contract::{AllowedDays, AllowedDaysError, DailyHistoryEntry, DisciplineContract};
pub use history::{ContractHistoryItem, ContractOutcome};
pub use ids::{CommitmentId, ContractId, HistoryId, RoutineId};
pub use routine::SavedRoutine;
