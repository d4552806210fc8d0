// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session runtime tests.
//!
//! Time is paused so the form-transition timer can be stepped exactly.

use std::time::Duration;
use workout_tracker::error::AppError;
use workout_tracker::models::{Coordinate, FormInput};
use workout_tracker::services::{SessionController, SessionHandle, SessionSettings, SessionState};
use workout_tracker::ui::{FixedPosition, RecordingUi, ReportedPosition, UiEffect, Unsupported};

fn here() -> Coordinate {
    Coordinate::new(40.0, -73.9).unwrap()
}

fn spawn_ready() -> SessionHandle {
    let controller = SessionController::new(RecordingUi::new(), SessionSettings::default());
    SessionHandle::spawn(controller, FixedPosition(here()))
}

#[tokio::test(start_paused = true)]
async fn test_transition_restored_after_delay() {
    let session = spawn_ready();
    session.drain_effects().await.unwrap();

    session.map_click(here()).await.unwrap().result.unwrap();
    let reply = session
        .submit(FormInput::running("5", "25", "150"))
        .await
        .unwrap();
    assert!(reply.result.is_ok());
    assert_eq!(reply.effects.last(), Some(&UiEffect::FormHidden));

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(session.drain_effects().await.unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(
        session.drain_effects().await.unwrap(),
        vec![UiEffect::FormTransitionRestored]
    );
}

#[tokio::test(start_paused = true)]
async fn test_click_before_timer_restores_immediately() {
    let session = spawn_ready();
    session.drain_effects().await.unwrap();

    session.map_click(here()).await.unwrap().result.unwrap();
    session
        .submit(FormInput::cycling("20", "60", "-5"))
        .await
        .unwrap()
        .result
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    let reply = session.map_click(here()).await.unwrap();
    assert_eq!(
        reply.effects,
        vec![
            UiEffect::FormTransitionRestored,
            UiEffect::FormShown,
            UiEffect::DistanceFocused
        ]
    );

    // The cancelled timer never fires later.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(session.drain_effects().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_geolocation_leaves_session_without_map() {
    let controller = SessionController::new(RecordingUi::new(), SessionSettings::default());
    let session = SessionHandle::spawn(controller, Unsupported);

    let reply = session.map_click(here()).await.unwrap();
    assert!(matches!(
        reply.result,
        Err(AppError::InvalidStateTransition { .. })
    ));
    assert_eq!(
        reply.effects,
        vec![UiEffect::Notice {
            message: "Your browser doesn't support the Geolocation API".to_string()
        }]
    );

    let snapshot = session.snapshot().await.unwrap();
    assert!(snapshot.map_unavailable);
    assert_eq!(snapshot.state, SessionState::Idle);
}

#[tokio::test]
async fn test_events_wait_for_reported_position() {
    let controller = SessionController::new(RecordingUi::new(), SessionSettings::default());
    let (reporter, position) = ReportedPosition::channel();
    let session = SessionHandle::spawn(controller, position);

    let reply = session.map_click(here()).await.unwrap();
    assert!(reply.result.is_err());
    assert!(reply.effects.is_empty());

    assert!(reporter.report(Ok(here())));
    let effects = session.drain_effects().await.unwrap();
    assert!(matches!(effects[0], UiEffect::MapInitialized { .. }));

    session.map_click(here()).await.unwrap().result.unwrap();
}

#[tokio::test]
async fn test_repeated_submits_are_appended_in_order() {
    let session = spawn_ready();

    let mut ids = Vec::new();
    for _ in 0..3 {
        session.map_click(here()).await.unwrap().result.unwrap();
        let id = session
            .submit(FormInput::running("5", "25", "150"))
            .await
            .unwrap()
            .result
            .unwrap();
        ids.push(id);
    }

    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);

    let snapshot = session.snapshot().await.unwrap();
    let listed: Vec<_> = snapshot.workouts.iter().map(|w| w.id).collect();
    assert_eq!(listed, ids);
}
