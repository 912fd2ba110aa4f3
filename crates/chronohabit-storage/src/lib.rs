//! Persistence traits and adapters for ChronoHabit state.
//!
//! Three store contracts cover the persisted layout: the singleton active
//! contract, the append-only archive of past contracts (newest first), and
//! the saved routine templates. `InMemoryHabitStorage` is the deterministic
//! reference adapter; `JsonKvStorage` persists each section as an
//! independently keyed JSON blob in any [`KeyValueStore`] backend, which is
//! how the host application stores state.
//!
//! All operations are synchronous. There is exactly one logical writer, so
//! adapters only need interior mutability, not coordination.

pub mod error;
pub mod json;
pub mod kv;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use json::{JsonKvStorage, CONTRACT_KEY, PAST_CONTRACTS_KEY, SAVED_ROUTINES_KEY};
pub use kv::{FileKv, InMemoryKv, KeyValueStore};
pub use memory::InMemoryHabitStorage;
pub use traits::{ContractStore, HabitStorage, HistoryStore, RoutineStore};
