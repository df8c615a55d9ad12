// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first if present.

use std::env;
use std::time::Duration;

use crate::models::annotation::Coordinate;

const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: -6.2088,
    lng: 106.8456,
};
const DEFAULT_ZOOM: f64 = 11.0;
/// Zoom used when the view starts on the user's own location.
pub const HOME_ZOOM: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Delay before an open polygon finishes itself
    pub auto_finish: Duration,
    /// Initial view center
    pub start_center: Coordinate,
    /// Initial zoom level
    pub start_zoom: f64,
    /// Optional user location; overrides the start view when set
    pub home: Option<Coordinate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_finish: crate::session::DEFAULT_AUTO_FINISH,
            start_center: DEFAULT_CENTER,
            start_zoom: DEFAULT_ZOOM,
            home: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &'static str| -> Result<Option<f64>, ConfigError> {
            lookup(key)
                .map(|raw| {
                    raw.trim().parse::<f64>().map_err(|_| ConfigError::Invalid {
                        key,
                        value: raw.clone(),
                    })
                })
                .transpose()
        };

        let auto_finish = match number("AREA_MARKER_AUTO_FINISH_SECS")? {
            Some(secs) if secs > 0.0 && secs.is_finite() => Duration::from_secs_f64(secs),
            Some(secs) => {
                return Err(ConfigError::Invalid {
                    key: "AREA_MARKER_AUTO_FINISH_SECS",
                    value: secs.to_string(),
                })
            }
            None => defaults.auto_finish,
        };

        let start_center = Coordinate::new(
            number("AREA_MARKER_START_LAT")?.unwrap_or(defaults.start_center.lat),
            number("AREA_MARKER_START_LNG")?.unwrap_or(defaults.start_center.lng),
        );

        let home = match (
            number("AREA_MARKER_HOME_LAT")?,
            number("AREA_MARKER_HOME_LNG")?,
        ) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            (None, None) => None,
            _ => {
                log::warn!("Only one of AREA_MARKER_HOME_LAT/LNG is set, ignoring home location");
                None
            }
        };

        Ok(Self {
            auto_finish,
            start_center,
            start_zoom: number("AREA_MARKER_START_ZOOM")?.unwrap_or(defaults.start_zoom),
            home,
        })
    }

    /// Center and zoom for the first frame.
    pub fn initial_view(&self) -> (Coordinate, f64) {
        match self.home {
            Some(home) => (home, HOME_ZOOM),
            None => (self.start_center, self.start_zoom),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).expect("Config should load");
        assert_eq!(config, Config::default());
        assert_eq!(config.auto_finish, Duration::from_secs(15));
        assert_eq!(config.initial_view(), (DEFAULT_CENTER, DEFAULT_ZOOM));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("AREA_MARKER_AUTO_FINISH_SECS", "30"),
            ("AREA_MARKER_START_ZOOM", "8"),
            ("AREA_MARKER_HOME_LAT", "51.5"),
            ("AREA_MARKER_HOME_LNG", "-0.12"),
        ]))
        .expect("Config should load");

        assert_eq!(config.auto_finish, Duration::from_secs(30));
        assert_eq!(config.start_zoom, 8.0);
        assert_eq!(
            config.initial_view(),
            (Coordinate::new(51.5, -0.12), HOME_ZOOM)
        );
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = Config::from_lookup(lookup(&[("AREA_MARKER_START_LAT", "north")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "AREA_MARKER_START_LAT", .. }));

        assert!(Config::from_lookup(lookup(&[("AREA_MARKER_AUTO_FINISH_SECS", "0")])).is_err());
    }

    #[test]
    fn test_half_home_location_is_ignored() {
        let config =
            Config::from_lookup(lookup(&[("AREA_MARKER_HOME_LAT", "1.0")])).expect("Config should load");
        assert!(config.home.is_none());
    }
}
