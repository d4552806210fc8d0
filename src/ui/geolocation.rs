// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot geolocation providers.

use crate::error::{AppError, GEOLOCATION_NOTICE};
use crate::models::Coordinate;
use std::future::Future;
use tokio::sync::oneshot;

/// Notice shown when the capability is missing entirely.
pub const UNSUPPORTED_NOTICE: &str = "Your browser doesn't support the Geolocation API";

/// Resolves the user's position once. There is no retry.
pub trait GeolocationProvider: Send + 'static {
    /// Whether the capability exists at all.
    fn is_available(&self) -> bool {
        true
    }

    fn current_position(self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Errors from geolocation acquisition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Position request denied: {0}")]
    Denied(String),

    #[error("Position reporter dropped without reporting")]
    Abandoned,
}

impl GeolocationError {
    pub fn notice(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => UNSUPPORTED_NOTICE,
            GeolocationError::Denied(_) | GeolocationError::Abandoned => GEOLOCATION_NOTICE,
        }
    }
}

impl From<GeolocationError> for AppError {
    fn from(err: GeolocationError) -> Self {
        AppError::GeolocationUnavailable(err.to_string())
    }
}

/// A position known up front (configured home location, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

impl GeolocationProvider for FixedPosition {
    fn current_position(self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send {
        async move { Ok(self.0) }
    }
}

/// No geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl GeolocationProvider for Unsupported {
    fn is_available(&self) -> bool {
        false
    }

    fn current_position(self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send {
        async { Err(GeolocationError::Unsupported) }
    }
}

/// A position reported later by someone else (the browser, via HTTP).
#[derive(Debug)]
pub struct ReportedPosition {
    rx: oneshot::Receiver<Result<Coordinate, GeolocationError>>,
}

/// Sending half of a [`ReportedPosition`]. Consumed by the single report.
#[derive(Debug)]
pub struct PositionReporter {
    tx: oneshot::Sender<Result<Coordinate, GeolocationError>>,
}

impl ReportedPosition {
    pub fn channel() -> (PositionReporter, ReportedPosition) {
        let (tx, rx) = oneshot::channel();
        (PositionReporter { tx }, ReportedPosition { rx })
    }
}

impl PositionReporter {
    /// Deliver the result. Returns false if nobody is waiting any more.
    pub fn report(self, result: Result<Coordinate, GeolocationError>) -> bool {
        self.tx.send(result).is_ok()
    }
}

impl GeolocationProvider for ReportedPosition {
    fn current_position(self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send {
        async move {
            match self.rx.await {
                Ok(result) => result,
                Err(_) => Err(GeolocationError::Abandoned),
            }
        }
    }
}
