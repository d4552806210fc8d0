// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod coordinate;
pub mod form;
pub mod render;
pub mod workout;

pub use coordinate::{Coordinate, CoordinateError, LatLng};
pub use form::FormInput;
pub use render::{ListEntry, ListMetrics, MarkerRequest, PopupOptions};
pub use workout::{
    Workout, WorkoutDetails, WorkoutDraft, WorkoutId, WorkoutIdGenerator, WorkoutKind,
    WorkoutMetrics,
};
