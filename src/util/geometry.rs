// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Spherical-earth measurements over latitude/longitude pairs in degrees,
//! plus a planar convex hull. Everything here is pure arithmetic: degenerate
//! input yields degenerate output (zero area, repeated hull points), never an
//! error, and out-of-range coordinates are not clamped.

use crate::models::annotation::Coordinate;
use std::cmp::Ordering;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters (haversine).
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Approximate area in square meters of the closed ring `vertices`.
///
/// Uses the spherical excess approximation summed over every edge including
/// the closing one. Winding order does not matter. Fewer than three vertices
/// have no area.
pub fn polygon_area(vertices: &[Coordinate]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let sum: f64 = ring_edges(vertices)
        .map(|(p, q)| {
            (q.lng - p.lng).to_radians()
                * (2.0 + p.lat.to_radians().sin() + q.lat.to_radians().sin())
        })
        .sum();

    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Length in meters of the closed ring, last vertex back to first included.
pub fn polygon_perimeter(vertices: &[Coordinate]) -> f64 {
    ring_edges(vertices).map(|(p, q)| distance(p, q)).sum()
}

/// Unweighted mean of the vertices.
///
/// This is not the area centroid; for irregular shapes the two differ. An
/// empty slice yields NaN coordinates.
pub fn polygon_centroid(vertices: &[Coordinate]) -> Coordinate {
    let n = vertices.len() as f64;
    let (lat, lng) = vertices
        .iter()
        .fold((0.0, 0.0), |(lat, lng), c| (lat + c.lat, lng + c.lng));
    Coordinate::new(lat / n, lng / n)
}

/// Planar convex hull (monotone chain) treating (lat, lng) as Cartesian.
///
/// Collinear points are dropped. With fewer than three points the input is
/// returned unchanged. The ring is implicitly closed and its orientation is
/// not part of the contract.
pub fn convex_hull(points: &[Coordinate]) -> Vec<Coordinate> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.lat
            .partial_cmp(&b.lat)
            .unwrap_or(Ordering::Equal)
            .then(a.lng.partial_cmp(&b.lng).unwrap_or(Ordering::Equal))
    });

    let mut lower = half_hull(sorted.iter());
    let mut upper = half_hull(sorted.iter().rev());

    // Each half ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn half_hull<'a>(points: impl Iterator<Item = &'a Coordinate>) -> Vec<Coordinate> {
    let mut hull: Vec<Coordinate> = Vec::new();
    for p in points {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    hull
}

/// Z component of (a - o) x (b - o); positive for a left turn.
fn cross(o: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    (a.lat - o.lat) * (b.lng - o.lng) - (a.lng - o.lng) * (b.lat - o.lat)
}

/// Consecutive vertex pairs of a closed ring, ending with (last, first).
pub fn ring_edges<'a>(
    vertices: &'a [Coordinate],
) -> impl Iterator<Item = (&'a Coordinate, &'a Coordinate)> + 'a {
    let n = vertices.len();
    (0..n).map(move |i| (&vertices[i], &vertices[(i + 1) % n]))
}
