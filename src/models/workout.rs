// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout records and their derived metrics.

use crate::error::{AppError, Result};
use crate::models::Coordinate;
use crate::services::validation;
use crate::time_utils::month_day_label;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of decimal digits kept when displaying a workout id.
const ID_DIGITS: u64 = 10_000_000_000;

/// Opaque workout identifier, unique within a session.
///
/// Displayed as the last ten digits of the millisecond timestamp it was
/// minted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkoutId(u64);

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0 % ID_DIGITS)
    }
}

impl Serialize for WorkoutId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mints timestamp-derived ids that never repeat within one session, even
/// when two workouts are created in the same millisecond.
#[derive(Debug, Default)]
pub struct WorkoutIdGenerator {
    last: Option<u64>,
}

impl WorkoutIdGenerator {
    pub fn next_id(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let value = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(value);
        WorkoutId(value)
    }
}

/// Workout variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Form/wire value ("running", "cycling").
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized label used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    /// The other variant (used when the form swaps its kind-specific field).
    pub fn toggled(&self) -> Self {
        match self {
            WorkoutKind::Running => WorkoutKind::Cycling,
            WorkoutKind::Cycling => WorkoutKind::Running,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(AppError::Validation(format!(
                "unknown workout type {:?}",
                other
            ))),
        }
    }
}

/// Kind-specific input measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

/// Parsed but not yet validated workout numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    pub distance_km: f64,
    pub duration_min: f64,
    pub details: WorkoutDetails,
}

impl WorkoutDraft {
    pub fn running(distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self {
            distance_km,
            duration_min,
            details: WorkoutDetails::Running { cadence_spm },
        }
    }

    pub fn cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Self {
        Self {
            distance_km,
            duration_min,
            details: WorkoutDetails::Cycling { elevation_gain_m },
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Kind-specific fields of a stored workout, including the derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutMetrics {
    Running {
        cadence_spm: f64,
        /// `duration_min / distance_km`
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        /// `distance_km / duration_min / 60`, evaluated left to right.
        speed_km_per_h: f64,
    },
}

/// A validated, immutable workout record.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    location: Coordinate,
    distance_km: f64,
    duration_min: f64,
    description: String,
    metrics: WorkoutMetrics,
}

impl Workout {
    /// Validate `draft` and build the record, computing the derived metric
    /// and description exactly once.
    pub fn new(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        location: Coordinate,
        draft: WorkoutDraft,
    ) -> Result<Self> {
        validation::validate_draft(&draft)?;

        let WorkoutDraft {
            distance_km,
            duration_min,
            details,
        } = draft;

        let metrics = match details {
            WorkoutDetails::Running { cadence_spm } => WorkoutMetrics::Running {
                cadence_spm,
                pace_min_per_km: duration_min / distance_km,
            },
            WorkoutDetails::Cycling { elevation_gain_m } => WorkoutMetrics::Cycling {
                elevation_gain_m,
                speed_km_per_h: distance_km / duration_min / 60.0,
            },
        };

        let description = format!(
            "{} on {}",
            draft.kind().label(),
            month_day_label(created_at)
        );

        Ok(Self {
            id,
            created_at,
            location,
            distance_km,
            duration_min,
            description,
            metrics,
        })
    }

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metrics(&self) -> &WorkoutMetrics {
        &self.metrics
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.metrics {
            WorkoutMetrics::Running { .. } => WorkoutKind::Running,
            WorkoutMetrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}
