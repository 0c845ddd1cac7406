use makeup_calendar::{
    DayCategory, SimulationError, SimulationParams, load_sequence_from_csv, save_sequence_to_csv,
    simulate, simulate_sequence,
};
use tempfile::NamedTempFile;

#[test]
fn default_params_reschedule_once_per_strike_day() {
    let simulation = simulate(&SimulationParams::default()).unwrap();
    assert_eq!(simulation.strike_days(), 45);
    assert_eq!(simulation.reschedule_count, 45);
    assert_eq!(simulation.report.rounds, 45);
    assert_eq!(simulation.original.len(), simulation.rescheduled.len());
    assert!(simulation.changed_days() > 0);
    assert_eq!(simulation.rescheduled_strike_days(), 45);
}

#[test]
fn reschedule_count_adds_offset_to_makeup_days() {
    let params = SimulationParams {
        vacation_offset: 0,
        reschedule_offset: 5,
        makeup_days: Some(10),
    };
    assert_eq!(params.reschedule_count(45), 15);

    let defaulted = SimulationParams {
        reschedule_offset: 3,
        ..SimulationParams::default()
    };
    assert_eq!(defaulted.reschedule_count(45), 48);

    let simulation = simulate(&params).unwrap();
    assert_eq!(simulation.reschedule_count, 15);
    assert_eq!(simulation.report.rounds, 15);
}

#[test]
fn out_of_range_params_are_rejected() {
    let cases = [
        (
            SimulationParams {
                vacation_offset: 61,
                ..SimulationParams::default()
            },
            "vacation_offset",
            60,
        ),
        (
            SimulationParams {
                reschedule_offset: 31,
                ..SimulationParams::default()
            },
            "reschedule_offset",
            30,
        ),
        (
            SimulationParams {
                makeup_days: Some(61),
                ..SimulationParams::default()
            },
            "makeup_days",
            60,
        ),
    ];
    for (params, name, max) in cases {
        match simulate(&params) {
            Err(SimulationError::InputRange(err)) => {
                assert_eq!(err.name, name);
                assert_eq!(err.max, max);
                assert!(err.to_string().contains(name));
            }
            other => panic!("expected range error for {name}, got {other:?}"),
        }
    }
}

#[test]
fn range_limits_are_inclusive() {
    let params = SimulationParams {
        vacation_offset: 60,
        reschedule_offset: 30,
        makeup_days: Some(60),
    };
    assert!(params.validate().is_ok());
    let simulation = simulate(&params).unwrap();
    assert_eq!(simulation.reschedule_count, 90);
}

#[test]
fn zero_rounds_keep_the_original_calendar() {
    let params = SimulationParams {
        makeup_days: Some(0),
        ..SimulationParams::default()
    };
    let simulation = simulate(&params).unwrap();
    assert_eq!(simulation.changed_days(), 0);
    assert_eq!(simulation.original, simulation.rescheduled);
}

#[test]
fn vacation_offset_changes_the_2025_calendar() {
    let base = simulate(&SimulationParams::default()).unwrap();
    let shifted = simulate(&SimulationParams {
        vacation_offset: 29,
        ..SimulationParams::default()
    })
    .unwrap();
    assert_ne!(base.original, shifted.original);
    assert_eq!(base.strike_days(), shifted.strike_days());
}

#[test]
fn params_json_defaults_missing_fields() {
    let params: SimulationParams = serde_json::from_str(r#"{"vacation_offset": 12}"#).unwrap();
    assert_eq!(params.vacation_offset, 12);
    assert_eq!(params.reschedule_offset, 0);
    assert_eq!(params.makeup_days, None);
    assert!(serde_json::from_str::<SimulationParams>(r#"{"bogus": 1}"#).is_err());
}

#[test]
fn loaded_sequence_is_rescheduled_like_the_built_one() {
    let built = simulate(&SimulationParams::default()).unwrap();
    let file = NamedTempFile::new().unwrap();
    save_sequence_to_csv(&built.original, file.path()).unwrap();

    let loaded = load_sequence_from_csv(file.path()).unwrap();
    let replayed = simulate_sequence(&SimulationParams::default(), loaded).unwrap();
    assert!(replayed.build.boundaries.is_empty());
    assert_eq!(replayed.strike_days(), 45);
    assert_eq!(replayed.rescheduled, built.rescheduled);
    assert_eq!(replayed.rescheduled.count(DayCategory::Strike), 45);
}
