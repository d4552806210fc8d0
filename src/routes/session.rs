// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session event routes.
//!
//! The browser owns the real map, form and list. It forwards each user
//! event here and replays the returned effects.

use crate::error::{AppError, Result, GEOLOCATION_NOTICE};
use crate::models::{Coordinate, FormInput, WorkoutId};
use crate::services::{EventReply, SessionSnapshot};
use crate::ui::{GeolocationError, UiEffect};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Session routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/position", post(report_position))
        .route("/api/map/click", post(map_click))
        .route("/api/form/toggle", post(toggle_type))
        .route("/api/form/submit", post(submit_workout))
        .route("/api/form/cancel", post(cancel_form))
        .route("/api/effects", get(drain_effects))
        .route("/api/session", get(get_session))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum EventStatus {
    Ok,
    /// The user was told why (see `notice`) and can try again.
    Rejected,
}

/// Response to a session event.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EventResponse {
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub workout_id: Option<WorkoutId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub effects: Vec<UiEffect>,
}

impl EventResponse {
    /// Recoverable errors become a `rejected` response; the rest are
    /// returned as HTTP errors.
    fn from_reply<T>(
        reply: EventReply<T>,
        workout_id: impl FnOnce(&T) -> Option<WorkoutId>,
    ) -> Result<Self> {
        let EventReply { result, effects } = reply;
        match result {
            Ok(value) => Ok(Self {
                status: EventStatus::Ok,
                workout_id: workout_id(&value),
                notice: None,
                effects,
            }),
            Err(err) if err.is_recoverable() => Ok(Self {
                status: EventStatus::Rejected,
                workout_id: None,
                notice: err.notice().map(str::to_string),
                effects,
            }),
            Err(err) => Err(err),
        }
    }
}

#[derive(Serialize)]
pub struct EffectsResponse {
    pub effects: Vec<UiEffect>,
}

// ─── Geolocation ─────────────────────────────────────────────

/// Body of `/api/position`: either a position or why there is none.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositionReport {
    Located(Coordinate),
    Failed { error: String },
}

/// Deliver the one-shot geolocation result.
async fn report_position(
    State(state): State<Arc<AppState>>,
    report: std::result::Result<Json<PositionReport>, JsonRejection>,
) -> Result<Json<EventResponse>> {
    let Json(report) = report?;
    let reporter = state.position_reporter.lock().await.take().ok_or(
        AppError::InvalidStateTransition {
            action: "report a position",
            state: "the position is already known",
        },
    )?;

    let (result, located) = match report {
        PositionReport::Located(location) => (Ok(location), true),
        PositionReport::Failed { error } => {
            tracing::info!(error = %error, "Browser could not get a position");
            (Err(GeolocationError::Denied(error)), false)
        }
    };

    if !reporter.report(result) {
        return Err(AppError::SessionClosed);
    }

    // The runtime handles the position before this drain.
    let effects = state.session.drain_effects().await?;

    Ok(Json(EventResponse {
        status: if located {
            EventStatus::Ok
        } else {
            EventStatus::Rejected
        },
        workout_id: None,
        notice: (!located).then(|| GEOLOCATION_NOTICE.to_string()),
        effects,
    }))
}

// ─── Map and form events ─────────────────────────────────────

async fn map_click(
    State(state): State<Arc<AppState>>,
    location: std::result::Result<Json<Coordinate>, JsonRejection>,
) -> Result<Json<EventResponse>> {
    let Json(location) = location?;
    let reply = state.session.map_click(location).await?;
    EventResponse::from_reply(reply, |_| None).map(Json)
}

async fn toggle_type(State(state): State<Arc<AppState>>) -> Result<Json<EventResponse>> {
    let reply = state.session.toggle_type().await?;
    EventResponse::from_reply(reply, |_| None).map(Json)
}

async fn submit_workout(
    State(state): State<Arc<AppState>>,
    input: std::result::Result<Json<FormInput>, JsonRejection>,
) -> Result<Json<EventResponse>> {
    let Json(input) = input?;
    let reply = state.session.submit(input).await?;
    EventResponse::from_reply(reply, |id| Some(*id)).map(Json)
}

async fn cancel_form(State(state): State<Arc<AppState>>) -> Result<Json<EventResponse>> {
    let reply = state.session.cancel().await?;
    EventResponse::from_reply(reply, |_| None).map(Json)
}

// ─── Reads ───────────────────────────────────────────────────

/// Effects produced between events (map setup, transition restores).
async fn drain_effects(State(state): State<Arc<AppState>>) -> Result<Json<EffectsResponse>> {
    let effects = state.session.drain_effects().await?;
    Ok(Json(EffectsResponse { effects }))
}

async fn get_session(State(state): State<Arc<AppState>>) -> Result<Json<SessionSnapshot>> {
    Ok(Json(state.session.snapshot().await?))
}
