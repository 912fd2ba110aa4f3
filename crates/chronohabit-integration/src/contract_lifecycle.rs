//! Multi-day contract lifecycle scenarios.

use chronohabit_types::{AllowedDays, CommitmentDraft, CommitmentStatus, ContractOutcome};

use crate::helpers::{monday, Harness};

#[test]
fn week_long_contract_with_weekend_rest_days() {
    let h = Harness::on_date(monday());
    h.engine
        .start_contract(
            &[CommitmentDraft::new("Read")],
            5,
            AllowedDays::new([1, 2, 3, 4, 5]).expect("weekdays"),
        )
        .expect("start");

    // Walk a full calendar week, completing the commitment each live day.
    let mut live_days = Vec::new();
    for _ in 0..7 {
        let contract = h.engine.contract().expect("load").expect("active");
        if !contract.daily_completed {
            h.complete_all();
            h.engine.complete_day().expect("complete day");
        }
        live_days.push(contract.day_in_phase);
        h.clock.advance_days(1);
    }

    // Mon..Fri advance the counter; Sat/Sun leave it parked at 5.
    assert_eq!(live_days, vec![1, 2, 3, 4, 5, 5, 5]);

    // The following Monday advances again; passing the target never
    // terminates the contract on its own.
    let contract = h.engine.contract().expect("load").expect("active");
    assert_eq!(contract.day_in_phase, 6);
    assert!(contract.is_phase_done());
}

#[test]
fn completion_is_a_ritual_never_automatic() {
    let h = Harness::on_date(monday());
    h.start_default_contract(1);
    h.complete_all();

    let contract = h.engine.contract().expect("load").expect("active");
    assert!(contract.is_phase_done());
    assert!(contract.all_completed());

    // Both predicates hold, yet the aggregate survives further reads.
    assert!(h.engine.contract().expect("load").is_some());

    let item = h
        .engine
        .complete_contract()
        .expect("complete")
        .expect("archived");
    assert_eq!(item.status, ContractOutcome::Completed);
    assert!(h.engine.contract().expect("load").is_none());
}

#[test]
fn incomplete_days_are_forgiven_not_failed() {
    let h = Harness::on_date(monday());
    h.start_default_contract(7);

    // Do nothing for three days.
    h.clock.advance_days(3);

    let contract = h.engine.contract().expect("load").expect("active");
    assert!(!contract.failed);
    assert!(contract
        .commitments
        .iter()
        .all(|c| c.status == CommitmentStatus::Pending));
    // Unseen days collapse into a single advance.
    assert_eq!(contract.day_in_phase, 2);
    assert!(h.engine.history().expect("history").is_empty());
}

#[test]
fn reset_forfeits_today_and_archives_failed() {
    let h = Harness::on_date(monday());
    let contract = h.start_default_contract(7);

    // Two days of perfect completion, then a partial third day.
    h.complete_all();
    h.clock.advance_days(1);
    h.complete_all();
    h.clock.advance_days(1);
    let read_id = h.engine.contract().expect("load").expect("active").commitments[0]
        .id
        .clone();
    h.engine.toggle_commitment(&read_id).expect("toggle");

    let item = h.engine.reset_contract().expect("reset").expect("archived");
    assert_eq!(item.status, ContractOutcome::Failed);
    assert_eq!(item.start_date, contract.start_date);
    assert_eq!(item.daily_history.len(), 3);

    // The first two days keep their points; the reset day is forfeited.
    assert_eq!(item.daily_history[0].points, 1.0);
    assert_eq!(item.daily_history[1].points, 1.0);
    assert_eq!(item.daily_history[2].points, 0.0);
    assert_eq!(item.daily_history[2].completed_commitments, 1);

    // One best-effort backup fired after the local transition.
    assert_eq!(h.uploader.upload_count(), 1);
}

#[test]
fn archive_stays_newest_first_across_contracts() {
    let h = Harness::on_date(monday());

    h.start_default_contract(1);
    let first = h.engine.reset_contract().expect("reset").expect("archived");

    h.clock.advance_days(1);
    h.start_default_contract(1);
    h.complete_all();
    let second = h
        .engine
        .complete_contract()
        .expect("complete")
        .expect("archived");

    let history = h.engine.history().expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);
}
