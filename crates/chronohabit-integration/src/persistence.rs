//! Durable storage scenarios: restarts and corrupt blobs.

use std::sync::Arc;

use chronohabit_backup::NoopUploader;
use chronohabit_engine::{ContractEngine, EngineConfig, ManualClock};
use chronohabit_storage::{
    FileKv, InMemoryKv, JsonKvStorage, KeyValueStore, CONTRACT_KEY, PAST_CONTRACTS_KEY,
};
use chronohabit_types::{AllowedDays, CommitmentDraft, CommitmentStatus};

use crate::helpers::{init_tracing, monday};

fn engine_on(storage: Arc<dyn chronohabit_storage::HabitStorage>) -> ContractEngine {
    ContractEngine::new(
        storage,
        Arc::new(ManualClock::starting_at(monday())),
        Arc::new(NoopUploader),
        EngineConfig::default(),
    )
}

#[test]
fn contract_survives_an_app_restart() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    let started = {
        let storage =
            Arc::new(JsonKvStorage::open(FileKv::open(dir.path()).expect("kv")).expect("open"));
        let engine = engine_on(storage);
        let contract = engine
            .start_contract(
                &[CommitmentDraft::new("Read")],
                3,
                AllowedDays::every_day(),
            )
            .expect("start");
        engine
            .set_commitment_status(&contract.commitments[0].id, CommitmentStatus::Completed)
            .expect("set status");
        contract
    };

    // A fresh process over the same directory picks the state back up.
    let storage =
        Arc::new(JsonKvStorage::open(FileKv::open(dir.path()).expect("kv")).expect("open"));
    let engine = engine_on(storage);
    let restored = engine.contract().expect("load").expect("active");

    assert_eq!(restored.id, started.id);
    assert_eq!(restored.commitments[0].status, CommitmentStatus::Completed);
    assert_eq!(
        restored.history_entry(monday()).expect("today").points,
        1.0
    );
}

#[test]
fn archives_survive_restart_and_stay_ordered() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let storage =
            Arc::new(JsonKvStorage::open(FileKv::open(dir.path()).expect("kv")).expect("open"));
        let engine = engine_on(storage);
        engine
            .start_contract(&[CommitmentDraft::new("Read")], 1, AllowedDays::every_day())
            .expect("start");
        engine.reset_contract().expect("reset");
        engine
            .start_contract(&[CommitmentDraft::new("Write")], 1, AllowedDays::every_day())
            .expect("start");
        engine.complete_contract().expect("complete");
    }

    let storage =
        Arc::new(JsonKvStorage::open(FileKv::open(dir.path()).expect("kv")).expect("open"));
    let engine = engine_on(storage);

    let history = engine.history().expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].commitments_snapshot, vec!["Write"]);
    assert_eq!(history[1].commitments_snapshot, vec!["Read"]);
    assert!(engine.contract().expect("load").is_none());
}

#[test]
fn corrupt_blobs_reset_to_empty_instead_of_crashing() {
    init_tracing();

    let kv = InMemoryKv::new();
    kv.put(CONTRACT_KEY, "{\"dayInPhase\": \"not a number\"")
        .expect("put");
    kv.put(PAST_CONTRACTS_KEY, "plainly not json").expect("put");

    let storage = Arc::new(JsonKvStorage::open(kv).expect("open"));
    let engine = engine_on(storage);

    assert!(engine.contract().expect("load").is_none());
    assert!(engine.history().expect("history").is_empty());

    // The store works normally from then on.
    engine
        .start_contract(&[CommitmentDraft::new("Read")], 1, AllowedDays::every_day())
        .expect("start");
    assert!(engine.contract().expect("load").is_some());
}
