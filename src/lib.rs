// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: log runs and rides by clicking on a map
//!
//! This crate provides the workout model, the session state machine that
//! turns map clicks and form input into workouts, and an HTTP bridge for
//! the browser front end that renders them.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod ui;

use config::Config;
use services::SessionHandle;
use tokio::sync::Mutex;
use ui::PositionReporter;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: SessionHandle,
    /// Present until the browser reports its position (unused when a home
    /// position is configured).
    pub position_reporter: Mutex<Option<PositionReporter>>,
}
