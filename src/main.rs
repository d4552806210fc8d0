// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Runs one logging session and bridges its events to the browser front
//! end that owns the map and the workout form.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    services::{SessionController, SessionHandle},
    ui::{FixedPosition, RecordingUi, ReportedPosition},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    let controller = SessionController::new(RecordingUi::new(), config.session_settings());

    // Either a configured home position or whatever the browser reports
    let (session, position_reporter) = match config.home_position {
        Some(home) => {
            tracing::info!(
                lat = home.lat(),
                lng = home.lng(),
                "Using configured home position"
            );
            (SessionHandle::spawn(controller, FixedPosition(home)), None)
        }
        None => {
            let (reporter, position) = ReportedPosition::channel();
            tracing::info!("Waiting for the browser to report a position");
            (SessionHandle::spawn(controller, position), Some(reporter))
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        session,
        position_reporter: Mutex::new(position_reporter),
    });

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
