// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Translate workouts into marker requests and list entries.

use crate::models::{
    ListEntry, ListMetrics, MarkerRequest, PopupOptions, Workout, WorkoutMetrics,
};

const POPUP_MAX_WIDTH: u32 = 250;
const POPUP_MIN_WIDTH: u32 = 100;

/// Build the marker + popup for a workout.
pub fn marker_request(workout: &Workout) -> MarkerRequest {
    let kind = workout.kind();
    MarkerRequest {
        location: workout.location(),
        icon: kind.icon().to_string(),
        popup_text: format!("{} {}", kind.icon(), workout.description()),
        popup: PopupOptions {
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind.as_str()),
        },
    }
}

/// Build the list entry for a workout.
pub fn list_entry(workout: &Workout) -> ListEntry {
    let kind = workout.kind();
    let metrics = match *workout.metrics() {
        WorkoutMetrics::Running {
            cadence_spm,
            pace_min_per_km,
        } => ListMetrics::Running {
            pace: format_one_decimal(pace_min_per_km),
            cadence: format_number(cadence_spm),
        },
        WorkoutMetrics::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => ListMetrics::Cycling {
            speed: format_one_decimal(speed_km_per_h),
            elevation_gain: format_number(elevation_gain_m),
        },
    };

    ListEntry {
        id: workout.id(),
        kind,
        title: workout.description().to_string(),
        icon: kind.icon().to_string(),
        distance: format_number(workout.distance_km()),
        duration: format_number(workout.duration_min()),
        metrics,
    }
}

/// Shortest round-trip form: `5.0` renders as "5", `2.5` as "2.5".
///
/// Magnitudes of at least 1e21 or below 1e-6 switch to exponent form with
/// a signed exponent ("1e+21", "1.5e-7").
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Collapse -0 to "0".
        return "0".to_string();
    }
    let magnitude = value.abs();
    if value.is_finite() && !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    value.to_string()
}

/// One decimal place, rounding exact ties away from zero.
///
/// `format!("{:.1}")` rounds exact binary ties (0.25, 1.75, ...) to even;
/// those are detected and rounded away from zero instead. Values that only
/// look like ties in decimal (0.35) are not exact ties and format normally.
pub fn format_one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let scaled = value * 10.0;
    let exact = value.mul_add(10.0, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        return format!("{:.1}", scaled.round() / 10.0);
    }
    format!("{:.1}", value)
}
