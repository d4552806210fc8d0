// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_tracker::error::AppError;

#[test]
fn test_validation_is_recoverable_with_generic_notice() {
    let err = AppError::Validation("distance=NaN".to_string());
    assert!(err.is_recoverable());
    assert_eq!(err.notice(), Some(AppError::INVALID_INPUT_NOTICE));
    assert_eq!(AppError::INVALID_INPUT_NOTICE, "Expected numerical values");
}

#[test]
fn test_invalid_transition_has_no_notice() {
    let err = AppError::InvalidStateTransition {
        action: "submit a workout",
        state: "idle",
    };
    assert!(!err.is_recoverable());
    assert_eq!(err.notice(), None);
    assert_eq!(err.to_string(), "Cannot submit a workout while idle");
}

#[test]
fn test_geolocation_is_not_recoverable() {
    let err = AppError::GeolocationUnavailable("denied".to_string());
    assert!(!err.is_recoverable());
    assert_eq!(err.notice(), Some("Couldn't get your position"));
}

#[test]
fn test_status_codes() {
    let cases = [
        (
            AppError::InvalidStateTransition {
                action: "x",
                state: "y",
            },
            StatusCode::CONFLICT,
        ),
        (
            AppError::Validation("bad".to_string()),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (AppError::SessionClosed, StatusCode::SERVICE_UNAVAILABLE),
        (
            AppError::BadRequest("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}
