// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Display formatting for measurements.

use crate::models::annotation::Coordinate;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;
const METERS_PER_KILOMETER: f64 = 1_000.0;

/// Square meters below one hectare, hectares from there on.
pub fn format_area(square_meters: f64) -> String {
    if square_meters >= SQUARE_METERS_PER_HECTARE {
        format!("{:.2} ha", square_meters / SQUARE_METERS_PER_HECTARE)
    } else {
        format!("{:.0} m²", square_meters)
    }
}

/// Meters below one kilometer, kilometers from there on.
pub fn format_distance(meters: f64) -> String {
    if meters >= METERS_PER_KILOMETER {
        format!("{:.2} km", meters / METERS_PER_KILOMETER)
    } else {
        format!("{:.0} m", meters)
    }
}

pub fn format_coordinate(c: &Coordinate) -> String {
    format!("{:.6}, {:.6}", c.lat, c.lng)
}
