// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map coordinates.

use geo::Point;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A finite (latitude, longitude) pair.
///
/// Stored as a `geo::Point` with x = longitude and y = latitude, matching
/// the GeoJSON axis order. Serialized as `{ "lat": .., "lng": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "LatLng", try_from = "LatLng")]
pub struct Coordinate(Point<f64>);

impl Coordinate {
    /// Build a coordinate, rejecting NaN and infinite components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NotFinite { lat, lng });
        }
        Ok(Self(Point::new(lng, lat)))
    }

    pub fn lat(&self) -> f64 {
        self.0.y()
    }

    pub fn lng(&self) -> f64 {
        self.0.x()
    }

    /// The underlying point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        self.0
    }
}

/// Wire form of a coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for LatLng {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lng: c.lng(),
        }
    }
}

impl TryFrom<LatLng> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: LatLng) -> Result<Self, Self::Error> {
        Coordinate::new(value.lat, value.lng)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoordinateError {
    #[error("Coordinate components must be finite (lat={lat}, lng={lng})")]
    NotFinite { lat: f64, lng: f64 },
}
