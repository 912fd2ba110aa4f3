//! Export/import gateway scenarios across two devices.

use chronohabit_backup::{export_json, import_json, ImportMode};
use chronohabit_engine::Clock;
use chronohabit_storage::{ContractStore, HistoryStore, RoutineStore};
use chronohabit_types::{AllowedDays, CommitmentDraft};

use crate::helpers::{monday, Harness};

#[test]
fn replace_import_reproduces_the_full_state() {
    let source = Harness::on_date(monday());
    source.start_default_contract(1);
    source.complete_all();
    source.engine.complete_contract().expect("complete");

    source.clock.advance_days(1);
    source.start_default_contract(7);
    let read_id = source
        .engine
        .contract()
        .expect("load")
        .expect("active")
        .commitments[0]
        .id
        .clone();
    source.engine.toggle_commitment(&read_id).expect("toggle");
    source
        .engine
        .save_routine(
            "Morning",
            &[CommitmentDraft::new("Read")],
            AllowedDays::every_day(),
        )
        .expect("save routine");

    let json = export_json(source.storage.as_ref(), source.clock.now()).expect("export");

    let target = Harness::on_date(monday());
    import_json(target.storage.as_ref(), &json, ImportMode::Replace).expect("import");

    assert_eq!(
        target.storage.load_contract().expect("load"),
        source.storage.load_contract().expect("load")
    );
    assert_eq!(
        target.storage.list_history().expect("history"),
        source.storage.list_history().expect("history")
    );
    assert_eq!(
        target.storage.list_routines().expect("routines"),
        source.storage.list_routines().expect("routines")
    );
}

#[test]
fn merge_import_combines_two_devices() {
    let phone = Harness::on_date(monday());
    phone.start_default_contract(1);
    phone.engine.reset_contract().expect("reset");
    phone
        .engine
        .save_routine(
            "Phone routine",
            &[CommitmentDraft::new("Read")],
            AllowedDays::every_day(),
        )
        .expect("save");

    let laptop = Harness::on_date(monday());
    laptop.start_default_contract(1);
    laptop.engine.reset_contract().expect("reset");
    laptop
        .engine
        .save_routine(
            "Laptop routine",
            &[CommitmentDraft::new("Write")],
            AllowedDays::every_day(),
        )
        .expect("save");

    let from_phone = export_json(phone.storage.as_ref(), phone.clock.now()).expect("export");
    let summary = import_json(laptop.storage.as_ref(), &from_phone, ImportMode::Merge)
        .expect("merge");

    assert_eq!(summary.history_len, Some(2));
    assert_eq!(summary.routines_len, Some(2));

    let titles: Vec<String> = laptop
        .storage
        .list_routines()
        .expect("routines")
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert!(titles.contains(&"Phone routine".to_string()));
    assert!(titles.contains(&"Laptop routine".to_string()));
}

#[test]
fn failed_import_never_touches_existing_state() {
    let h = Harness::on_date(monday());
    h.start_default_contract(3);

    let before = h.storage.load_contract().expect("load");
    let result = import_json(
        h.storage.as_ref(),
        r#"{"version": 1, "timestamp": 0, "pastContracts": [{"bogus": true}]}"#,
        ImportMode::Replace,
    );

    assert!(result.is_err());
    assert_eq!(h.storage.load_contract().expect("load"), before);
    assert!(h.storage.list_history().expect("history").is_empty());
}
