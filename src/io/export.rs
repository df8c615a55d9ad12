// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! GeoJSON export.
//!
//! Serializes the committed features, and the connection boundary when one is
//! shown, as a GeoJSON `FeatureCollection`. This is a one-way export for
//! pasting into other tools; nothing reads it back.

use anyhow::Result;
use geojson::{Feature as GeoJsonFeature, FeatureCollection, Geometry as GeoJsonGeometry, JsonObject, Value};
use serde_json::json;

use crate::connections::ConnectionSnapshot;
use crate::models::annotation::{Coordinate, Feature, Geometry, Style};

/// GeoJSON positions are longitude first.
fn position(c: &Coordinate) -> Vec<f64> {
    vec![c.lng, c.lat]
}

/// Closed linear ring as GeoJSON requires.
fn ring(vertices: &[Coordinate]) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = vertices.iter().map(position).collect();
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    ring
}

fn geojson_feature(value: Value, properties: JsonObject) -> GeoJsonFeature {
    GeoJsonFeature {
        bbox: None,
        geometry: Some(GeoJsonGeometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn feature_json(feature: &Feature) -> GeoJsonFeature {
    let value = match feature.geometry() {
        Geometry::Point(c) => Value::Point(position(c)),
        Geometry::Polygon(v) => Value::Polygon(vec![ring(v)]),
    };

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(feature.id().0));
    properties.insert("name".to_string(), json!(feature.name()));
    if !feature.description().is_empty() {
        properties.insert("description".to_string(), json!(feature.description()));
    }
    if let Some(m) = feature.metrics() {
        properties.insert("area_m2".to_string(), json!(m.area));
        properties.insert("perimeter_m".to_string(), json!(m.perimeter));
    }
    properties.insert("color".to_string(), json!(feature.style().to_hex()));

    geojson_feature(value, properties)
}

/// Export `features` (plus the connection boundary, if any) as pretty GeoJSON.
pub fn to_geojson(features: &[Feature], connections: Option<&ConnectionSnapshot>) -> Result<String> {
    let mut out: Vec<GeoJsonFeature> = features.iter().map(feature_json).collect();

    if let Some(boundary) = connections.and_then(|s| s.boundary.as_ref()) {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!("Connected region"));
        properties.insert("area_m2".to_string(), json!(boundary.area));
        properties.insert("color".to_string(), json!(Style::BOUNDARY.to_hex()));
        out.push(geojson_feature(Value::Polygon(vec![ring(&boundary.hull)]), properties));
    }

    let collection = FeatureCollection {
        bbox: None,
        features: out,
        foreign_members: None,
    };
    Ok(serde_json::to_string_pretty(&collection)?)
}
