// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Utc};

/// Format a UTC timestamp as "{Month} {day}", e.g. "April 14".
pub fn month_day_label(date: DateTime<Utc>) -> String {
    date.format("%B %-d").to_string()
}
