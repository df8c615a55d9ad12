// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation store.
//!
//! Owns every committed feature in insertion order. Features are never
//! mutated once added; ids come from a counter that is not reset by
//! `clear`, so an id is never handed out twice by the same store.

use super::annotation::{Feature, FeatureId, NewFeature};

#[derive(Debug, Default, Clone)]
pub struct AnnotationStore {
    features: Vec<Feature>,
    next_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an id to `feature`, append it, and return the stored copy.
    pub fn add(&mut self, feature: NewFeature) -> &Feature {
        self.next_id += 1;
        let id = FeatureId(self.next_id);
        self.features.push(Feature::from_new(id, feature));
        log::info!("Added feature {}, total: {}", id, self.features.len());
        &self.features[self.features.len() - 1]
    }

    /// Remove the feature with `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let idx = self.features.iter().position(|f| f.id() == id)?;
        let removed = self.features.remove(idx);
        log::info!("Removed feature {}, total: {}", id, self.features.len());
        Some(removed)
    }

    pub fn clear(&mut self) {
        log::info!("Cleared {} features", self.features.len());
        self.features.clear();
    }

    /// All features in insertion order.
    pub fn all(&self) -> &[Feature] {
        &self.features
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Sum of polygon areas in square meters.
    pub fn total_area(&self) -> f64 {
        total_area(&self.features)
    }

    pub fn marker_count(&self) -> usize {
        self.features.iter().filter(|f| !f.geometry().is_polygon()).count()
    }

    pub fn polygon_count(&self) -> usize {
        self.features.iter().filter(|f| f.geometry().is_polygon()).count()
    }
}

/// Sum of the stamped areas of `features`; points contribute zero.
pub fn total_area(features: &[Feature]) -> f64 {
    features.iter().map(Feature::area).sum()
}
