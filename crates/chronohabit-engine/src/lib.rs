//! Discipline contract state machine.
//!
//! A contract is a fixed set of daily commitments held for a target number
//! of days. The engine owns the full lifecycle: no contract → active →
//! (completed | failed) → no contract.
//!
//! ## Lifecycle rules
//!
//! - **Rollover runs first.** Every public operation evaluates the calendar
//!   date before its own logic. Crossing into a new live day advances the
//!   day counter and resets every commitment to pending; crossing into a
//!   rest day only moves the check date. The check is idempotent — reading
//!   the contract twice on one day changes nothing.
//! - **Missed days are forgiven.** Rollover never fails a contract, no
//!   matter what yesterday looked like, and a gap of several unseen days
//!   advances the counter by exactly one. Failure is always a deliberate
//!   user act (`reset_contract`).
//! - **Termination is a ritual.** Reaching the phase target with everything
//!   completed only makes the completion affordance available; the machine
//!   never auto-completes.

pub mod archive;
pub mod clock;
pub mod engine;
pub mod error;
pub mod rollover;
pub mod scoring;

pub use archive::archive_contract;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{ContractEngine, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use rollover::{apply_rollover, RolloverOutcome};
pub use scoring::{rescore_today, round1};
