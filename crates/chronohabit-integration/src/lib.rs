//! ChronoHabit end-to-end integration tests.
//!
//! Exercises the full stack — engine, storage, gateway — through the flows
//! a user actually drives: multi-day contracts with rest days, deliberate
//! completion, streak resets with cloud backup, and state restoration.

pub mod helpers;

#[cfg(test)]
mod backup_roundtrip;
#[cfg(test)]
mod contract_lifecycle;
#[cfg(test)]
mod persistence;
