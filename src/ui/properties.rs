// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation properties panel.
//!
//! This module provides the side panel with area statistics, the name and
//! description form for a pending draft, and the list of saved features.

use crate::models::annotation::{FeatureId, Geometry};
use crate::session::Draft;
use crate::util::format::{format_area, format_coordinate, format_distance};
use crate::workspace::Workspace;

/// Text being typed into the draft form.
#[derive(Debug, Default)]
pub struct DraftForm {
    pub name: String,
    pub description: String,
}

impl DraftForm {
    pub fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    CommitDraft,
    CancelDraft,
    ZoomTo(FeatureId),
    Delete(FeatureId),
    ExportGeoJson,
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, workspace: &Workspace, form: &mut DraftForm) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    if let Some(draft) = workspace.session().draft() {
        draft_form(ui, draft, form, &mut action);
        ui.separator();
    } else if workspace.session().is_drawing() {
        ui.heading("Drawing polygon");
        ui.label(format!("{} vertices placed", workspace.session().vertices().len()));
        if ui.button("Cancel").clicked() {
            action = PropertiesAction::CancelDraft;
        }
        ui.separator();
    }

    statistics(ui, workspace);
    ui.separator();

    let features = workspace.list_features();
    ui.horizontal(|ui| {
        ui.heading(format!("Marked areas ({})", features.len()));
        if ui
            .add_enabled(!features.is_empty(), egui::Button::new("Copy GeoJSON"))
            .clicked()
        {
            action = PropertiesAction::ExportGeoJson;
        }
    });

    if features.is_empty() {
        ui.label(egui::RichText::new("Nothing marked yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for feature in features {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    if ui
                        .link(egui::RichText::new(feature.name()).strong())
                        .on_hover_text("Zoom to area")
                        .clicked()
                    {
                        action = PropertiesAction::ZoomTo(feature.id());
                    }
                    let kind = if feature.geometry().is_polygon() { "Polygon" } else { "Marker" };
                    ui.label(egui::RichText::new(kind).small());
                    if let Some(m) = feature.metrics() {
                        ui.label(egui::RichText::new(format_area(m.area)).small().strong());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text("Delete area").clicked() {
                            action = PropertiesAction::Delete(feature.id());
                        }
                    });
                });

                if !feature.description().is_empty() {
                    ui.label(egui::RichText::new(feature.description()).weak());
                }

                match feature.geometry() {
                    Geometry::Point(c) => {
                        ui.label(egui::RichText::new(format_coordinate(c)).small().monospace());
                    }
                    Geometry::Polygon(v) => {
                        ui.label(egui::RichText::new(format!("{} points", v.len())).small());
                        if let Some(m) = feature.metrics() {
                            ui.label(
                                egui::RichText::new(format!("Perimeter: {}", format_distance(m.perimeter)))
                                    .small(),
                            );
                        }
                    }
                }
            });
        }
    });

    action
}

fn draft_form(ui: &mut egui::Ui, draft: &Draft, form: &mut DraftForm, action: &mut PropertiesAction) {
    ui.heading("Add area information");
    let subject = match draft.metrics() {
        Some(m) => format!("area polygon ({})", format_area(m.area)),
        None => "marker".to_string(),
    };
    ui.label(format!("Give a name and description for the {}", subject));

    ui.label("Name");
    ui.add(egui::TextEdit::singleline(&mut form.name).hint_text("Area name..."));
    ui.label("Description");
    ui.add(
        egui::TextEdit::multiline(&mut form.description)
            .hint_text("Area description...")
            .desired_rows(3),
    );

    ui.horizontal(|ui| {
        let can_save = !form.name.trim().is_empty();
        if ui.add_enabled(can_save, egui::Button::new("Save Area")).clicked() {
            *action = PropertiesAction::CommitDraft;
        }
        if ui.button("Cancel").clicked() {
            *action = PropertiesAction::CancelDraft;
        }
    });
}

fn statistics(ui: &mut egui::Ui, workspace: &Workspace) {
    let store = workspace.store();
    ui.label(egui::RichText::new("📊 Area statistics").strong());
    ui.label(format!(
        "Locations: {} marker, {} polygon",
        store.marker_count(),
        store.polygon_count()
    ));
    let total = workspace.total_area();
    if total > 0.0 {
        ui.label(format!("Individual area: {}", format_area(total)));
    }

    if let Some(snapshot) = workspace.connections() {
        ui.add_space(4.0);
        ui.label(egui::RichText::new("🌍 Connected region").strong());
        ui.label(format!("{} locations connected", snapshot.feature_count));
        if snapshot.total_area > 0.0 {
            ui.label(format!("Total area: {}", format_area(snapshot.total_area)));
        }
        if let Some(area) = snapshot.boundary_area() {
            ui.label(format!("Boundary region: {}", format_area(area)));
        }
    }
}
