// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the annotation workspace and the map view,
//! feeds canvas and panel events into the workspace, and hands the resulting
//! render commands back to the canvas.

use std::time::Instant;

use crate::config::{Config, HOME_ZOOM};
use crate::io::export;
use crate::render;
use crate::ui::{canvas, map_view::MapView, properties, toolbar};
use crate::workspace::Workspace;

/// Main application state.
pub struct AreaMarkerApp {
    /// Features, drawing session and connections
    workspace: Workspace,

    /// Current map center and zoom
    view: MapView,

    /// Name and description being typed for the pending draft
    form: properties::DraftForm,

    /// Last canvas size, used to fit zoom targets
    canvas_size: egui::Vec2,

    config: Config,
}

impl AreaMarkerApp {
    /// Create a new application instance.
    pub fn new(config: Config) -> Self {
        let (center, zoom) = config.initial_view();
        Self {
            workspace: Workspace::new(config.auto_finish),
            view: MapView::new(center, zoom),
            form: properties::DraftForm::default(),
            canvas_size: egui::vec2(800.0, 600.0),
            config,
        }
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction) {
        match action {
            toolbar::ToolbarAction::SelectTool(tool) => {
                if let Err(e) = self.workspace.select_tool(tool) {
                    log::debug!("{}", e);
                }
            }
            toolbar::ToolbarAction::ToggleConnections => {
                self.workspace.toggle_connections();
            }
            toolbar::ToolbarAction::CenterOnHome => {
                if let Some(home) = self.config.home {
                    self.view = MapView::new(home, HOME_ZOOM);
                }
            }
            toolbar::ToolbarAction::ClearAll => self.workspace.clear_all(),
            toolbar::ToolbarAction::None => {}
        }
    }

    fn handle_properties(&mut self, action: properties::PropertiesAction, ctx: &egui::Context) {
        match action {
            properties::PropertiesAction::CommitDraft => {
                match self.workspace.commit_draft(&self.form.name, &self.form.description) {
                    Ok(feature) => {
                        log::info!("Saved \"{}\" as {}", feature.name(), feature.id());
                        self.form.reset();
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
            properties::PropertiesAction::CancelDraft => {
                self.workspace.cancel_draft();
                self.form.reset();
            }
            properties::PropertiesAction::ZoomTo(id) => match self.workspace.zoom_target(id) {
                Ok(target) => self.view.show(target, self.canvas_size),
                Err(e) => log::debug!("{}", e),
            },
            properties::PropertiesAction::Delete(id) => {
                if let Err(e) = self.workspace.delete_feature(id) {
                    log::debug!("{}", e);
                }
            }
            properties::PropertiesAction::ExportGeoJson => {
                match export::to_geojson(self.workspace.list_features(), self.workspace.connections()) {
                    Ok(json) => {
                        ctx.output_mut(|o| o.copied_text = json);
                        log::info!("Copied {} features as GeoJSON", self.workspace.list_features().len());
                    }
                    Err(e) => log::error!("Failed to export GeoJSON: {}", e),
                }
            }
            properties::PropertiesAction::None => {}
        }
    }

    fn handle_canvas(&mut self, action: canvas::CanvasAction) {
        match action {
            canvas::CanvasAction::Click(at) => {
                let outcome = self.workspace.on_click(at, Instant::now());
                log::debug!("Map click at ({:.6}, {:.6}): {:?}", at.lat, at.lng, outcome);
            }
            canvas::CanvasAction::FinishPolygon => {
                if let Err(e) = self.workspace.on_finish_polygon() {
                    log::debug!("{}", e);
                }
            }
            canvas::CanvasAction::None => {}
        }
    }
}

impl eframe::App for AreaMarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-finish an open polygon once its timer is due
        self.workspace.tick(Instant::now());
        if let Some(deadline) = self.workspace.session().auto_finish_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        // Toolbar
        let session = self.workspace.session();
        let toolbar_state = toolbar::ToolbarState {
            tool: session.tool(),
            has_draft: session.has_draft(),
            drawing: session.is_drawing(),
            connections_shown: self.workspace.connections().is_some(),
            feature_count: self.workspace.list_features().len(),
            has_home: self.config.home.is_some(),
            auto_finish_secs: self.config.auto_finish.as_secs_f64(),
        };
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &toolbar_state))
            .inner;
        self.handle_toolbar(toolbar_action);

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| properties::show(ui, &self.workspace, &mut self.form))
            .inner;
        self.handle_properties(properties_action, ctx);

        // Handle keyboard events
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.workspace.cancel_draft();
            self.form.reset();
        }

        // Main canvas (center)
        let commands = render::scene(&self.workspace);
        let drawing = self.workspace.session().is_drawing();
        let canvas_action = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.canvas_size = ui.available_size();
                canvas::show(ui, &mut self.view, &commands, drawing)
            })
            .inner;
        self.handle_canvas(canvas_action);
    }
}
