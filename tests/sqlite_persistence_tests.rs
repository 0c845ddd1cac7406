#![cfg(feature = "sqlite")]

use makeup_calendar::{
    PersistenceError, SequenceStore, SimulationParams, SqliteSequenceStore, simulate,
};
use tempfile::NamedTempFile;

#[test]
fn sqlite_store_round_trip_both_calendars() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteSequenceStore::new(file.path()).unwrap();
    let simulation = simulate(&SimulationParams::default()).unwrap();

    store
        .save_sequence("original", &simulation.original)
        .expect("save original");
    store
        .save_sequence("rescheduled", &simulation.rescheduled)
        .expect("save rescheduled");

    let reopened = SqliteSequenceStore::new(file.path()).unwrap();
    assert_eq!(
        reopened.require_sequence("original").unwrap(),
        simulation.original
    );
    assert_eq!(
        reopened.require_sequence("rescheduled").unwrap(),
        simulation.rescheduled
    );
}

#[test]
fn saving_again_replaces_previous_rows() {
    let store = SqliteSequenceStore::in_memory().unwrap();
    let first = simulate(&SimulationParams::default()).unwrap();
    let second = simulate(&SimulationParams {
        vacation_offset: 40,
        ..SimulationParams::default()
    })
    .unwrap();

    store.save_sequence("original", &first.original).unwrap();
    store.save_sequence("original", &second.original).unwrap();
    let loaded = store.load_sequence("original").unwrap().unwrap();
    assert_eq!(loaded, second.original);
}

#[test]
fn missing_sequence_is_reported() {
    let store = SqliteSequenceStore::in_memory().unwrap();
    assert!(store.load_sequence("nothing").unwrap().is_none());
    assert!(matches!(
        store.require_sequence("nothing"),
        Err(PersistenceError::NotFound)
    ));
}
