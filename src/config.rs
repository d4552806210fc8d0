// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::models::Coordinate;
use crate::services::session::{
    SessionSettings, DEFAULT_FORM_TRANSITION_DELAY, DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL,
    DEFAULT_ZOOM,
};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Tile URL template handed to the map widget
    pub tile_url_template: String,
    /// Tile attribution HTML
    pub tile_attribution: String,
    /// Initial map zoom
    pub map_zoom: u8,
    /// Delay before the form transition is restored after a hide
    pub form_transition_delay: Duration,
    /// Fixed start position; when unset the browser reports one
    pub home_position: Option<Coordinate>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            tile_url_template: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            map_zoom: DEFAULT_ZOOM,
            form_transition_delay: DEFAULT_FORM_TRANSITION_DELAY,
            home_position: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; see `Config::default` for the fallbacks.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            tile_url_template: env::var("MAP_TILE_URL").unwrap_or(defaults.tile_url_template),
            tile_attribution: env::var("MAP_TILE_ATTRIBUTION")
                .unwrap_or(defaults.tile_attribution),
            map_zoom: parse_var("MAP_ZOOM")?.unwrap_or(defaults.map_zoom),
            form_transition_delay: parse_var::<u64>("FORM_TRANSITION_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.form_transition_delay),
            home_position: home_position()?,
        })
    }

    /// Map/form settings for a new session.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            zoom: self.map_zoom,
            tile_url_template: self.tile_url_template.clone(),
            tile_attribution: self.tile_attribution.clone(),
            form_transition_delay: self.form_transition_delay,
        }
    }
}

/// Parse an optional variable; present-but-malformed is an error.
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

/// HOME_LATITUDE and HOME_LONGITUDE must be set together.
fn home_position() -> Result<Option<Coordinate>, ConfigError> {
    let lat: Option<f64> = parse_var("HOME_LATITUDE")?;
    let lng: Option<f64> = parse_var("HOME_LONGITUDE")?;

    match (lat, lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng)
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                name: "HOME_LATITUDE/HOME_LONGITUDE",
                value: e.to_string(),
            }),
        (Some(_), None) => Err(ConfigError::Missing("HOME_LONGITUDE")),
        (None, Some(_)) => Err(ConfigError::Missing("HOME_LATITUDE")),
        (None, None) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
