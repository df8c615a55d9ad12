// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structures for representing
//! map markers, polygons, and their derived measurements.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnnotationError, CommitRejection, Result};
use crate::util::geometry;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar midpoint, used for placing segment labels.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }
}

/// Two coordinates and the great-circle distance between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Meters.
    pub distance: f64,
}

impl Segment {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self {
            from,
            to,
            distance: geometry::distance(&from, &to),
        }
    }

    pub fn midpoint(&self) -> Coordinate {
        self.from.midpoint(&self.to)
    }
}

/// Store-assigned feature identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation tag attached to a feature. Not used by any geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: [u8; 3],
}

impl Style {
    pub const MARKER: Style = Style { color: [0xef, 0x44, 0x44] };
    pub const POLYGON: Style = Style { color: [0x3b, 0x82, 0xf6] };
    pub const CONNECTION: Style = Style { color: [0xff, 0x6b, 0x6b] };
    pub const BOUNDARY: Style = Style { color: [0x10, 0xb9, 0x81] };

    /// CSS-style hex representation, e.g. `#3b82f6`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Feature geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    /// Implicitly closed ring; the last vertex connects back to the first.
    Polygon(Vec<Coordinate>),
}

impl Geometry {
    /// Every vertex of the geometry (a point has exactly one).
    pub fn vertices(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(c) => std::slice::from_ref(c),
            Geometry::Polygon(v) => v,
        }
    }

    /// The point used when linking this geometry to another one.
    pub fn representative_point(&self) -> Coordinate {
        match self {
            Geometry::Point(c) => *c,
            Geometry::Polygon(v) => geometry::polygon_centroid(v),
        }
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, Geometry::Polygon(_))
    }
}

/// Minimum vertex count of a polygon feature.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Area and perimeter stamped on a polygon when it is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Square meters.
    pub area: f64,
    /// Meters.
    pub perimeter: f64,
}

impl Metrics {
    pub fn of_polygon(vertices: &[Coordinate]) -> Self {
        Self {
            area: geometry::polygon_area(vertices),
            perimeter: geometry::polygon_perimeter(vertices),
        }
    }
}

/// A feature ready to be stored, before it has been given an id.
///
/// Only built through `point` and `polygon`, which trim and require the name
/// and stamp polygon metrics from the vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeature {
    name: String,
    description: String,
    geometry: Geometry,
    metrics: Option<Metrics>,
    style: Style,
}

impl NewFeature {
    pub fn point(name: &str, description: &str, at: Coordinate) -> Result<Self> {
        Ok(Self {
            name: required_name(name)?,
            description: description.trim().to_string(),
            geometry: Geometry::Point(at),
            metrics: None,
            style: Style::MARKER,
        })
    }

    pub fn polygon(name: &str, description: &str, vertices: Vec<Coordinate>) -> Result<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(AnnotationError::PrematureFinish {
                vertices: vertices.len(),
            });
        }
        Ok(Self {
            name: required_name(name)?,
            description: description.trim().to_string(),
            metrics: Some(Metrics::of_polygon(&vertices)),
            geometry: Geometry::Polygon(vertices),
            style: Style::POLYGON,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AnnotationError::InvalidCommit(CommitRejection::EmptyName));
    }
    Ok(name.to_string())
}

/// A committed map annotation.
///
/// Fields are private so a stored feature can never drift from its metrics;
/// changing one means removing it and adding a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: FeatureId,
    name: String,
    description: String,
    geometry: Geometry,
    metrics: Option<Metrics>,
    style: Style,
}

impl Feature {
    pub(crate) fn from_new(id: FeatureId, new: NewFeature) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            geometry: new.geometry,
            metrics: new.metrics,
            style: new.style,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Area in square meters; points contribute nothing.
    pub fn area(&self) -> f64 {
        self.metrics.map(|m| m.area).unwrap_or(0.0)
    }

    /// Where the map should move to show this feature.
    pub fn zoom_target(&self) -> ZoomTarget {
        match &self.geometry {
            Geometry::Point(c) => ZoomTarget::Point(*c),
            Geometry::Polygon(v) => match BoundingBox::of(v) {
                Some(bounds) => ZoomTarget::Bounds(bounds),
                None => ZoomTarget::Point(geometry::polygon_centroid(v)),
            },
        }
    }
}

/// Axis-aligned extent in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Smallest box containing all coordinates, or `None` when empty.
    pub fn of(coords: &[Coordinate]) -> Option<Self> {
        let first = coords.first()?;
        let init = BoundingBox {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        Some(coords.iter().skip(1).fold(init, |b, c| BoundingBox {
            south: b.south.min(c.lat),
            west: b.west.min(c.lng),
            north: b.north.max(c.lat),
            east: b.east.max(c.lng),
        }))
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn contains(&self, c: &Coordinate) -> bool {
        c.lat >= self.south && c.lat <= self.north && c.lng >= self.west && c.lng <= self.east
    }
}

/// Pan/zoom request handed to the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomTarget {
    Point(Coordinate),
    Bounds(BoundingBox),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_point_geometry_has_single_vertex() {
        let g = Geometry::Point(Coordinate::new(10.0, 20.0));
        assert_eq!(g.vertices(), &[Coordinate::new(10.0, 20.0)]);
        assert_eq!(g.representative_point(), Coordinate::new(10.0, 20.0));
        assert!(!g.is_polygon());
    }

    #[test]
    fn test_polygon_representative_point_is_vertex_mean() {
        let g = Geometry::Polygon(square());
        assert_eq!(g.representative_point(), Coordinate::new(0.5, 0.5));
    }

    #[test]
    fn test_bounding_box() {
        let b = BoundingBox::of(&square()).unwrap();
        assert_eq!(b.south, 0.0);
        assert_eq!(b.north, 1.0);
        assert_eq!(b.west, 0.0);
        assert_eq!(b.east, 1.0);
        assert_eq!(b.center(), Coordinate::new(0.5, 0.5));
        assert!(b.contains(&Coordinate::new(0.25, 0.75)));
        assert!(!b.contains(&Coordinate::new(1.5, 0.5)));
        assert!(BoundingBox::of(&[]).is_none());
    }

    #[test]
    fn test_zoom_target() {
        let marker = Feature::from_new(
            FeatureId(1),
            NewFeature::point("well", "", Coordinate::new(-6.2, 106.8)).unwrap(),
        );
        assert_eq!(marker.zoom_target(), ZoomTarget::Point(Coordinate::new(-6.2, 106.8)));
        assert_eq!(marker.area(), 0.0);

        let field = Feature::from_new(
            FeatureId(2),
            NewFeature::polygon("field", "", square()).unwrap(),
        );
        match field.zoom_target() {
            ZoomTarget::Bounds(b) => assert_eq!(b.center(), Coordinate::new(0.5, 0.5)),
            other => panic!("expected bounds, got {:?}", other),
        }
        assert!(field.area() > 0.0);
    }

    #[test]
    fn test_new_polygon_stamps_metrics_from_vertices() {
        let field = NewFeature::polygon(" field ", " rice ", square()).unwrap();
        assert_eq!(field.name(), "field");
        assert_eq!(field.description(), "rice");
        assert_eq!(field.metrics(), Some(&Metrics::of_polygon(&square())));
        assert_eq!(field.style(), Style::POLYGON);
    }

    #[test]
    fn test_new_polygon_needs_three_vertices() {
        let two = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)];
        assert_eq!(
            NewFeature::polygon("sliver", "", two),
            Err(AnnotationError::PrematureFinish { vertices: 2 })
        );
        assert_eq!(
            NewFeature::polygon("dot", "", vec![Coordinate::new(0.0, 0.0)]),
            Err(AnnotationError::PrematureFinish { vertices: 1 })
        );
    }

    #[test]
    fn test_new_point_has_no_area() {
        let well = NewFeature::point("well", "", Coordinate::new(1.0, 2.0)).unwrap();
        assert!(well.metrics().is_none());
        assert_eq!(Feature::from_new(FeatureId(1), well).area(), 0.0);
    }

    #[test]
    fn test_new_feature_rejects_blank_name() {
        let rejected = Err(AnnotationError::InvalidCommit(CommitRejection::EmptyName));
        assert_eq!(NewFeature::point("  ", "", Coordinate::new(1.0, 2.0)), rejected);
        assert_eq!(NewFeature::polygon("", "", square()), rejected);
    }

    #[test]
    fn test_style_hex() {
        assert_eq!(Style::POLYGON.to_hex(), "#3b82f6");
        assert_eq!(Style::MARKER.to_hex(), "#ef4444");
    }
}
