// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Connection and aggregation engine.
//!
//! Links every pair of features and wraps all of their vertices in one convex
//! boundary. The snapshot is always rebuilt from scratch from the current
//! feature list and only ever reads coordinates.

use crate::models::annotation::{Coordinate, Feature, Segment};
use crate::models::store;
use crate::util::geometry;

/// Convex hull around every vertex of every feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub hull: Vec<Coordinate>,
    /// Square meters.
    pub area: f64,
    /// Where the boundary label goes.
    pub anchor: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectionSnapshot {
    /// One link per unordered pair of features, between representative points.
    pub links: Vec<Segment>,
    pub boundary: Option<Boundary>,
    /// Sum of the features' own areas, not the boundary's.
    pub total_area: f64,
    pub feature_count: usize,
}

impl ConnectionSnapshot {
    /// Build the snapshot for `features`. Fewer than two features give an
    /// empty snapshot.
    pub fn compute(features: &[Feature]) -> Self {
        if features.len() < 2 {
            return Self::default();
        }

        let representatives: Vec<Coordinate> = features
            .iter()
            .map(|f| f.geometry().representative_point())
            .collect();

        let mut links = Vec::with_capacity(features.len() * (features.len() - 1) / 2);
        for (i, a) in representatives.iter().enumerate() {
            for b in &representatives[i + 1..] {
                links.push(Segment::new(*a, *b));
            }
        }

        let all_points: Vec<Coordinate> = features
            .iter()
            .flat_map(|f| f.geometry().vertices().iter().copied())
            .collect();

        Self {
            links,
            boundary: boundary_of(&all_points),
            total_area: store::total_area(features),
            feature_count: features.len(),
        }
    }

    pub fn boundary_area(&self) -> Option<f64> {
        self.boundary.as_ref().map(|b| b.area)
    }
}

fn boundary_of(points: &[Coordinate]) -> Option<Boundary> {
    if points.len() < 3 {
        return None;
    }
    let hull = geometry::convex_hull(points);
    if hull.len() < 3 {
        return None;
    }
    Some(Boundary {
        area: geometry::polygon_area(&hull),
        anchor: geometry::polygon_centroid(&hull),
        hull,
    })
}

/// Holds the snapshot while connections are shown.
#[derive(Debug, Default)]
pub struct ConnectionEngine {
    snapshot: Option<ConnectionSnapshot>,
}

impl ConnectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&ConnectionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Switch connections on (computing a fresh snapshot) or off (discarding it).
    pub fn toggle(&mut self, features: &[Feature]) -> Option<&ConnectionSnapshot> {
        if self.snapshot.take().is_some() {
            log::info!("Connections hidden");
            return None;
        }
        self.snapshot = Some(ConnectionSnapshot::compute(features));
        log::info!("Connections shown for {} features", features.len());
        self.snapshot.as_ref()
    }

    /// Recompute after the feature set changed. Does nothing while disabled.
    pub fn refresh(&mut self, features: &[Feature]) {
        if let Some(snapshot) = self.snapshot.as_mut() {
            *snapshot = ConnectionSnapshot::compute(features);
            log::debug!(
                "Connections recomputed: {} links, boundary {:?}",
                snapshot.links.len(),
                snapshot.boundary_area()
            );
        }
    }
}
