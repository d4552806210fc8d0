// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interfaces to the collaborators a session drives: the map widget, the
//! workout form, the rendered list, user notices, and geolocation.
//!
//! The session never implements any of these itself. `RecordingUi`
//! records every call as a [`UiEffect`] so a browser front end (or a test)
//! can replay them.

pub mod geolocation;
pub mod recording;

pub use geolocation::{
    FixedPosition, GeolocationError, GeolocationProvider, PositionReporter, ReportedPosition,
    Unsupported,
};
pub use recording::{RecordingUi, UiEffect};

use crate::models::{Coordinate, ListEntry, MarkerRequest};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Handle to an initialized map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapHandle(pub u32);

/// Handle to a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerHandle(pub u32);

/// The interactive map. Panning, zooming and tiles belong to the widget.
pub trait MapWidget {
    fn initialize_map(&mut self, center: Coordinate, zoom: u8) -> MapHandle;
    fn add_tile_layer(&mut self, map: MapHandle, url_template: &str, attribution: &str);
    /// Start delivering clicks on `map` to the session.
    fn listen_for_clicks(&mut self, map: MapHandle);
    fn place_marker(&mut self, map: MapHandle, marker: &MarkerRequest) -> MarkerHandle;
}

/// The workout entry form.
pub trait FormView {
    fn show_form(&mut self);
    fn focus_distance(&mut self);
    /// Swap which of cadence/elevation is visible.
    fn toggle_kind_fields(&mut self);
    fn clear_fields(&mut self);
    /// Hide without the slide-out transition.
    fn hide_form_immediately(&mut self);
    /// Re-enable the transition after a no-transition hide.
    fn restore_form_transition(&mut self);
}

/// The rendered workout list.
pub trait WorkoutListView {
    fn append_entry(&mut self, entry: &ListEntry);
}

/// User-visible messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Everything a session renders to.
pub trait Ui: MapWidget + FormView + WorkoutListView + Notifier {}

impl<T: MapWidget + FormView + WorkoutListView + Notifier> Ui for T {}
