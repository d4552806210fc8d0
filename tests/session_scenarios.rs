// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end workout logging scenarios against the controller.
//!
//! IMPORTANT: the pace/speed formulas and the validation asymmetry checked
//! here are what users' recorded numbers depend on. Do not "fix" them
//! without migrating those numbers.

use chrono::{DateTime, TimeZone, Utc};
use workout_tracker::error::AppError;
use workout_tracker::models::{
    Coordinate, FormInput, ListMetrics, Workout, WorkoutDraft, WorkoutIdGenerator, WorkoutKind,
    WorkoutMetrics,
};
use workout_tracker::services::{SessionController, SessionSettings, SessionState};
use workout_tracker::ui::{RecordingUi, UiEffect};

fn april_14() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 14, 7, 15, 0).unwrap()
}

fn click() -> Coordinate {
    Coordinate::new(40.0, -73.9).unwrap()
}

fn ready_session() -> SessionController<RecordingUi> {
    let mut session = SessionController::new(RecordingUi::new(), SessionSettings::default())
        .with_clock(april_14);
    session
        .on_position_resolved(Ok(Coordinate::new(40.0, -74.0).unwrap()))
        .expect("map should initialize");
    session.ui_mut().drain();
    session
}

fn build(draft: WorkoutDraft) -> Result<Workout, AppError> {
    let mut ids = WorkoutIdGenerator::default();
    Workout::new(ids.next_id(april_14()), april_14(), click(), draft)
}

#[test]
fn test_running_pace_for_positive_inputs() {
    let cases = [(5.0, 25.0, 150.0), (0.5, 3.3, 0.0), (42.195, 180.0, 172.0)];
    for (distance, duration, cadence) in cases {
        let workout = build(WorkoutDraft::running(distance, duration, cadence)).unwrap();
        match workout.metrics() {
            WorkoutMetrics::Running {
                pace_min_per_km, ..
            } => assert!((pace_min_per_km - duration / distance).abs() < 1e-12),
            other => panic!("unexpected metrics {:?}", other),
        }
        assert!(workout.description().contains("April"));
        assert!(workout.description().contains("14"));
    }
}

#[test]
fn test_cycling_speed_accepts_any_finite_elevation() {
    for elevation in [-250.0, -5.0, 0.0, 1200.0] {
        let workout = build(WorkoutDraft::cycling(20.0, 60.0, elevation)).unwrap();
        match workout.metrics() {
            WorkoutMetrics::Cycling {
                speed_km_per_h,
                elevation_gain_m,
            } => {
                assert_eq!(*speed_km_per_h, 20.0 / 60.0 / 60.0);
                assert_eq!(*elevation_gain_m, elevation);
            }
            other => panic!("unexpected metrics {:?}", other),
        }
    }
}

#[test]
fn test_non_finite_inputs_rejected_for_every_field() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(build(WorkoutDraft::running(bad, 25.0, 150.0)).is_err());
        assert!(build(WorkoutDraft::running(5.0, bad, 150.0)).is_err());
        assert!(build(WorkoutDraft::running(5.0, 25.0, bad)).is_err());
        assert!(build(WorkoutDraft::cycling(bad, 60.0, 10.0)).is_err());
        assert!(build(WorkoutDraft::cycling(20.0, bad, 10.0)).is_err());
        assert!(build(WorkoutDraft::cycling(20.0, 60.0, bad)).is_err());
    }
}

#[test]
fn test_negative_values_rejected_except_elevation() {
    assert!(build(WorkoutDraft::running(-5.0, 25.0, 150.0)).is_err());
    assert!(build(WorkoutDraft::running(5.0, -25.0, 150.0)).is_err());
    assert!(build(WorkoutDraft::running(5.0, 25.0, -150.0)).is_err());
    assert!(build(WorkoutDraft::cycling(-20.0, 60.0, 10.0)).is_err());
    assert!(build(WorkoutDraft::cycling(20.0, -60.0, 10.0)).is_err());
    assert!(build(WorkoutDraft::cycling(20.0, 60.0, -10.0)).is_ok());
}

#[test]
fn test_same_form_twice_creates_two_workouts() {
    let mut session = ready_session();
    let form = FormInput::running("5", "25", "150");

    session.on_map_click(click()).unwrap();
    let first = session.on_submit(&form).unwrap();
    session.on_map_click(click()).unwrap();
    let second = session.on_submit(&form).unwrap();

    assert_ne!(first, second);
    let ids: Vec<_> = session.workouts().iter().map(|w| w.id()).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn test_scenario_running() {
    let mut session = ready_session();
    session.on_map_click(click()).unwrap();
    session
        .on_submit(&FormInput::running("5", "25", "150"))
        .unwrap();

    assert_eq!(session.workouts().len(), 1);
    let workout = &session.workouts()[0];
    assert_eq!(workout.kind(), WorkoutKind::Running);
    assert_eq!(workout.location(), click());
    assert!(matches!(
        workout.metrics(),
        WorkoutMetrics::Running { pace_min_per_km, .. } if *pace_min_per_km == 5.0
    ));

    let effects = session.ui().effects();
    let marker = effects
        .iter()
        .find_map(|e| match e {
            UiEffect::MarkerPlaced { request, .. } => Some(request),
            _ => None,
        })
        .expect("marker placed");
    assert_eq!(marker.location, click());
    assert!(marker.popup_text.contains("🏃‍♂️"));

    let entry = effects
        .iter()
        .find_map(|e| match e {
            UiEffect::ListEntryAppended { entry } => Some(entry),
            _ => None,
        })
        .expect("list entry appended");
    assert_eq!(entry.distance, "5");
    assert_eq!(entry.duration, "25");
    assert_eq!(
        entry.metrics,
        ListMetrics::Running {
            pace: "5.0".to_string(),
            cadence: "150".to_string()
        }
    );
}

#[test]
fn test_scenario_cycling_with_negative_elevation() {
    let mut session = ready_session();
    session.on_map_click(click()).unwrap();
    session
        .on_submit(&FormInput::cycling("20", "60", "-5"))
        .unwrap();

    let workout = &session.workouts()[0];
    assert_eq!(workout.kind(), WorkoutKind::Cycling);
    assert_eq!(workout.description(), "Cycling on April 14");
    match workout.metrics() {
        WorkoutMetrics::Cycling {
            speed_km_per_h,
            elevation_gain_m,
        } => {
            assert_eq!(*speed_km_per_h, 20.0 / 60.0 / 60.0);
            assert_eq!(*elevation_gain_m, -5.0);
        }
        other => panic!("unexpected metrics {:?}", other),
    }
}

#[test]
fn test_scenario_non_numeric_distance() {
    let mut session = ready_session();
    session.on_map_click(click()).unwrap();
    session.ui_mut().drain();

    let result = session.on_submit(&FormInput::running("abc", "25", "150"));

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(session.workouts().is_empty());
    assert_eq!(session.ui().notices(), vec!["Expected numerical values"]);
    assert!(!session
        .ui()
        .effects()
        .iter()
        .any(|e| matches!(e, UiEffect::FormHidden)));
    assert_eq!(
        session.state(),
        SessionState::AwaitingInput { location: click() }
    );

    // The form is still open, so a corrected submit goes through.
    session
        .on_submit(&FormInput::running("5", "25", "150"))
        .unwrap();
    assert_eq!(session.workouts().len(), 1);
}

#[test]
fn test_blank_cadence_and_elevation_log_as_zero() {
    let mut session = ready_session();

    session.on_map_click(click()).unwrap();
    session
        .on_submit(&FormInput::running("5", "25", ""))
        .unwrap();
    session.on_map_click(click()).unwrap();
    session
        .on_submit(&FormInput::cycling("20", "60", " "))
        .unwrap();

    assert_eq!(session.workouts().len(), 2);
    assert!(matches!(
        session.workouts()[0].metrics(),
        WorkoutMetrics::Running { cadence_spm, .. } if *cadence_spm == 0.0
    ));
    assert!(matches!(
        session.workouts()[1].metrics(),
        WorkoutMetrics::Cycling { elevation_gain_m, .. } if *elevation_gain_m == 0.0
    ));
    assert!(session.ui().notices().is_empty());
}
