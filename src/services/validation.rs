// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form validation.
//!
//! Raw form strings are parsed explicitly. A blank field reads as 0;
//! anything else that does not parse becomes NaN and therefore fails the
//! finiteness check.
//!
//! Cycling elevation is only checked for being finite. Its sign is never
//! checked, unlike running cadence.

use crate::error::{AppError, Result};
use crate::models::{FormInput, WorkoutDetails, WorkoutDraft, WorkoutKind};

/// True iff every value is a finite number.
pub fn is_numerically_valid(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// True iff every value is `>= 0`.
pub fn are_non_negative(values: &[f64]) -> bool {
    values.iter().all(|v| *v >= 0.0)
}

fn are_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

/// Parse one form field. Blank input yields 0, unparseable input NaN.
pub fn parse_field(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Turn raw form values into a draft, reading only the field that belongs
/// to the selected kind. Does not validate the numbers.
pub fn parse_form(input: &FormInput) -> Result<WorkoutDraft> {
    let kind: WorkoutKind = input.kind.parse()?;
    let distance = parse_field(&input.distance);
    let duration = parse_field(&input.duration);

    Ok(match kind {
        WorkoutKind::Running => WorkoutDraft::running(distance, duration, parse_field(&input.cadence)),
        WorkoutKind::Cycling => {
            WorkoutDraft::cycling(distance, duration, parse_field(&input.elevation))
        }
    })
}

/// Apply the per-kind policy to a draft.
pub fn validate_draft(draft: &WorkoutDraft) -> Result<()> {
    let distance = draft.distance_km;
    let duration = draft.duration_min;

    match draft.details {
        WorkoutDetails::Running { cadence_spm } => {
            let values = [distance, duration, cadence_spm];
            if !is_numerically_valid(&values) || !are_non_negative(&values) {
                return Err(AppError::Validation(format!(
                    "running needs non-negative numbers (distance={}, duration={}, cadence={})",
                    distance, duration, cadence_spm
                )));
            }
        }
        WorkoutDetails::Cycling { elevation_gain_m } => {
            if !is_numerically_valid(&[distance, duration, elevation_gain_m])
                || !are_non_negative(&[distance, duration])
            {
                return Err(AppError::Validation(format!(
                    "cycling needs numbers and non-negative distance/duration (distance={}, duration={}, elevation={})",
                    distance, duration, elevation_gain_m
                )));
            }
        }
    }

    // Derived metrics divide by these.
    if !are_positive(&[distance, duration]) {
        return Err(AppError::Validation(format!(
            "distance and duration must be greater than zero (distance={}, duration={})",
            distance, duration
        )));
    }

    Ok(())
}
