// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation workspace.
//!
//! The single entry point used by the map surface: it routes click, finish,
//! commit and cancel events to the drawing session, owns the annotation
//! store, and keeps the connection snapshot current after every change to the
//! feature set.

use std::time::{Duration, Instant};

use crate::connections::{ConnectionEngine, ConnectionSnapshot};
use crate::error::{AnnotationError, Result};
use crate::models::annotation::{Coordinate, Feature, FeatureId, ZoomTarget};
use crate::models::store::AnnotationStore;
use crate::session::{ClickOutcome, DrawingSession, Tool};

#[derive(Debug, Default)]
pub struct Workspace {
    store: AnnotationStore,
    session: DrawingSession,
    connections: ConnectionEngine,
}

impl Workspace {
    pub fn new(auto_finish: Duration) -> Self {
        Self {
            store: AnnotationStore::new(),
            session: DrawingSession::new(auto_finish),
            connections: ConnectionEngine::new(),
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn select_tool(&mut self, tool: Tool) -> Result<()> {
        self.session.select_tool(tool)
    }

    pub fn on_click(&mut self, at: Coordinate, now: Instant) -> ClickOutcome {
        self.session.on_click(at, now)
    }

    pub fn on_finish_polygon(&mut self) -> Result<()> {
        self.session.finish()
    }

    /// Drive the auto-finish timer; call on every frame or timer wake-up.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.tick(now)
    }

    /// Commit the awaiting draft under `name` and store it.
    pub fn commit_draft(&mut self, name: &str, description: &str) -> Result<&Feature> {
        let feature = self.session.commit(name, description)?;
        let id = self.store.add(feature).id();
        self.connections.refresh(self.store.all());
        self.store.get(id).ok_or(AnnotationError::UnknownFeatureId(id))
    }

    pub fn cancel_draft(&mut self) {
        self.session.cancel();
    }

    pub fn list_features(&self) -> &[Feature] {
        self.store.all()
    }

    pub fn delete_feature(&mut self, id: FeatureId) -> Result<Feature> {
        let removed = self
            .store
            .remove(id)
            .ok_or(AnnotationError::UnknownFeatureId(id))?;
        self.connections.refresh(self.store.all());
        Ok(removed)
    }

    pub fn clear_all(&mut self) {
        self.store.clear();
        self.connections.refresh(self.store.all());
    }

    pub fn toggle_connections(&mut self) -> Option<&ConnectionSnapshot> {
        self.connections.toggle(self.store.all())
    }

    pub fn connections(&self) -> Option<&ConnectionSnapshot> {
        self.connections.snapshot()
    }

    pub fn zoom_target(&self, id: FeatureId) -> Result<ZoomTarget> {
        self.store
            .get(id)
            .map(Feature::zoom_target)
            .ok_or(AnnotationError::UnknownFeatureId(id))
    }

    /// Total area of the committed polygons in square meters.
    pub fn total_area(&self) -> f64 {
        self.store.total_area()
    }
}
