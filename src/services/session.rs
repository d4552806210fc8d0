// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Sequences one logging session:
//! 1. Resolve the user's position and initialize the map
//! 2. Capture a map click and show the form
//! 3. Validate the submitted form and build a workout
//! 4. Store it and render it as a marker and a list entry
//! 5. Clear and hide the form
//!
//! Every method runs to completion before the next event is handled, so
//! the collection needs no locking.

use crate::error::{AppError, Result};
use crate::models::{
    Coordinate, FormInput, ListEntry, MarkerRequest, Workout, WorkoutId, WorkoutIdGenerator,
    WorkoutKind,
};
use crate::services::{render, validation};
use crate::ui::{GeolocationError, GeolocationProvider, MapHandle, Ui};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const DEFAULT_ZOOM: u8 = 14;
pub const DEFAULT_FORM_TRANSITION_DELAY: Duration = Duration::from_millis(1000);

/// Map and form settings for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub zoom: u8,
    pub tile_url_template: String,
    pub tile_attribution: String,
    /// How long after a no-transition hide the form transition comes back.
    pub form_transition_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url_template: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            form_transition_delay: DEFAULT_FORM_TRANSITION_DELAY,
        }
    }
}

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SessionState {
    /// No pending map click.
    Idle,
    /// Map clicked, form visible, location captured.
    AwaitingInput {
        #[cfg_attr(feature = "binding-generation", ts(as = "crate::models::LatLng"))]
        location: Coordinate,
    },
}

impl SessionState {
    fn describe(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::AwaitingInput { .. } => "awaiting input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MapStatus {
    /// Waiting for the position.
    Pending,
    Ready(MapHandle),
    /// Position failed; the session stays without a map.
    Unavailable,
}

/// Everything a client needs to rebuild its view.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub map: Option<MapHandle>,
    pub map_unavailable: bool,
    /// Which kind-specific field the form currently shows.
    pub form_kind: WorkoutKind,
    /// In creation order.
    pub workouts: Vec<ListEntry>,
    pub markers: Vec<MarkerRequest>,
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send>;

/// Owns the workouts of one session and drives its UI.
pub struct SessionController<U: Ui> {
    ui: U,
    settings: SessionSettings,
    clock: Clock,
    ids: WorkoutIdGenerator,
    map: MapStatus,
    state: SessionState,
    form_kind: WorkoutKind,
    workouts: Vec<Workout>,
    transition_restore_at: Option<Instant>,
}

impl<U: Ui> SessionController<U> {
    pub fn new(ui: U, settings: SessionSettings) -> Self {
        Self {
            ui,
            settings,
            clock: Box::new(Utc::now),
            ids: WorkoutIdGenerator::default(),
            map: MapStatus::Pending,
            state: SessionState::Idle,
            form_kind: WorkoutKind::Running,
            workouts: Vec::new(),
            transition_restore_at: None,
        }
    }

    /// Replace the wall clock used for `created_at`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ─── Map ─────────────────────────────────────────────────────

    /// Resolve the position with `geo` and initialize the map.
    pub async fn locate<G: GeolocationProvider>(&mut self, geo: G) -> Result<MapHandle> {
        if !geo.is_available() {
            return self.on_position_resolved(Err(GeolocationError::Unsupported));
        }
        let result = geo.current_position().await;
        self.on_position_resolved(result)
    }

    /// Handle the one-shot geolocation result.
    ///
    /// On failure the user is told once and the map is never initialized.
    pub fn on_position_resolved(
        &mut self,
        result: std::result::Result<Coordinate, GeolocationError>,
    ) -> Result<MapHandle> {
        if self.map != MapStatus::Pending {
            tracing::warn!("Position resolved more than once; ignoring");
            return Err(AppError::InvalidStateTransition {
                action: "resolve the position",
                state: "the position is already resolved",
            });
        }

        match result {
            Ok(center) => {
                let map = self.ui.initialize_map(center, self.settings.zoom);
                self.ui.add_tile_layer(
                    map,
                    &self.settings.tile_url_template,
                    &self.settings.tile_attribution,
                );
                self.ui.listen_for_clicks(map);
                self.map = MapStatus::Ready(map);
                tracing::info!(
                    lat = center.lat(),
                    lng = center.lng(),
                    zoom = self.settings.zoom,
                    "Map initialized"
                );
                Ok(map)
            }
            Err(err) => {
                self.map = MapStatus::Unavailable;
                self.ui.notify(err.notice());
                tracing::warn!(error = %err, "Geolocation failed; map disabled");
                Err(err.into())
            }
        }
    }

    /// Capture a map click and open the form.
    ///
    /// A second click before submitting moves the pending location.
    pub fn on_map_click(&mut self, location: Coordinate) -> Result<()> {
        if !matches!(self.map, MapStatus::Ready(_)) {
            tracing::warn!("Map click before the map is initialized");
            return Err(AppError::InvalidStateTransition {
                action: "handle a map click",
                state: "the map is not initialized",
            });
        }

        // A pending restore would leave the form without its transition.
        if self.transition_restore_at.take().is_some() {
            self.ui.restore_form_transition();
        }

        self.state = SessionState::AwaitingInput { location };
        self.ui.show_form();
        self.ui.focus_distance();
        tracing::debug!(lat = location.lat(), lng = location.lng(), "Form opened");
        Ok(())
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Swap the visible kind-specific field.
    pub fn on_type_toggle(&mut self) -> Result<()> {
        self.require_awaiting_input("toggle the workout type")?;
        self.ui.toggle_kind_fields();
        self.form_kind = self.form_kind.toggled();
        Ok(())
    }

    /// Validate the form and log a workout at the pending location.
    ///
    /// On invalid input the user gets a notice and the form stays open.
    pub fn on_submit(&mut self, input: &FormInput) -> Result<WorkoutId> {
        let location = self.require_awaiting_input("submit a workout")?;
        let map = match self.map {
            MapStatus::Ready(map) => map,
            _ => {
                return Err(AppError::InvalidStateTransition {
                    action: "submit a workout",
                    state: "the map is not initialized",
                })
            }
        };

        let draft = match validation::parse_form(input) {
            Ok(draft) => draft,
            Err(err) => return Err(self.reject(err)),
        };

        // Workout::new applies the per-kind policy.
        let now = (self.clock)();
        let workout = match Workout::new(self.ids.next_id(now), now, location, draft) {
            Ok(workout) => workout,
            Err(err) => return Err(self.reject(err)),
        };
        let id = workout.id();

        self.ui.place_marker(map, &render::marker_request(&workout));
        self.ui.append_entry(&render::list_entry(&workout));

        tracing::info!(
            workout_id = %id,
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "Workout logged"
        );
        self.workouts.push(workout);

        self.ui.clear_fields();
        self.hide_form();
        self.state = SessionState::Idle;
        Ok(id)
    }

    /// Close the form without logging anything.
    pub fn on_cancel(&mut self) -> Result<()> {
        self.require_awaiting_input("cancel the form")?;
        self.hide_form();
        self.state = SessionState::Idle;
        tracing::debug!("Form cancelled");
        Ok(())
    }

    fn require_awaiting_input(&self, action: &'static str) -> Result<Coordinate> {
        match self.state {
            SessionState::AwaitingInput { location } => Ok(location),
            SessionState::Idle => {
                tracing::warn!(action, "Ignoring form event with no pending map click");
                Err(AppError::InvalidStateTransition {
                    action,
                    state: self.state.describe(),
                })
            }
        }
    }

    fn reject(&mut self, err: AppError) -> AppError {
        self.ui.notify(AppError::INVALID_INPUT_NOTICE);
        tracing::debug!(error = %err, "Workout form rejected");
        err
    }

    fn hide_form(&mut self) {
        self.ui.hide_form_immediately();
        self.transition_restore_at = Some(Instant::now() + self.settings.form_transition_delay);
    }

    // ─── Deferred transition restore ─────────────────────────────

    /// When the form transition should be restored, if a restore is pending.
    pub fn transition_restore_at(&self) -> Option<Instant> {
        self.transition_restore_at
    }

    /// Restore the form transition if its deadline has passed.
    ///
    /// Returns whether anything was restored.
    pub fn fire_transition_restore(&mut self, now: Instant) -> bool {
        match self.transition_restore_at {
            Some(deadline) if deadline <= now => {
                self.transition_restore_at = None;
                self.ui.restore_form_transition();
                true
            }
            _ => false,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn form_kind(&self) -> WorkoutKind {
        self.form_kind
    }

    /// Workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn map(&self) -> Option<MapHandle> {
        match self.map {
            MapStatus::Ready(map) => Some(map),
            _ => None,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            map: self.map(),
            map_unavailable: self.map == MapStatus::Unavailable,
            form_kind: self.form_kind,
            workouts: self.workouts.iter().map(render::list_entry).collect(),
            markers: self.workouts.iter().map(render::marker_request).collect(),
        }
    }
}
