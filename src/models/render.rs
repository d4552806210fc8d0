// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render payloads for the map marker and the workout list.

use crate::models::{Coordinate, WorkoutId, WorkoutKind};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Popup settings attached to a workout marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    /// CSS class, e.g. "running-popup"
    pub class_name: String,
}

/// A request to place a marker with an open popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerRequest {
    #[cfg_attr(feature = "binding-generation", ts(as = "crate::models::LatLng"))]
    pub location: Coordinate,
    pub icon: String,
    /// "{icon} {description}"
    pub popup_text: String,
    pub popup: PopupOptions,
}

/// One entry in the workout list.
///
/// Numeric values are pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListEntry {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub icon: String,
    pub distance: String,
    pub duration: String,
    pub metrics: ListMetrics,
}

/// Kind-specific list values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ListMetrics {
    /// Pace in min/km (one decimal) and cadence in spm.
    Running { pace: String, cadence: String },
    /// Speed in km/h (one decimal) and elevation gain in m.
    Cycling {
        speed: String,
        elevation_gain: String,
    },
}
