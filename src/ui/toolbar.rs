// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! Tool switching and the global actions are disabled while a draft exists,
//! so only one draft can ever be in progress.

use crate::session::Tool;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SelectTool(Tool),
    ToggleConnections,
    CenterOnHome,
    ClearAll,
}

/// What the toolbar needs to know to enable its buttons.
pub struct ToolbarState {
    pub tool: Tool,
    pub has_draft: bool,
    pub drawing: bool,
    pub connections_shown: bool,
    pub feature_count: usize,
    pub has_home: bool,
    pub auto_finish_secs: f64,
}

/// Display the toolbar with tool selection buttons.
pub fn show(ui: &mut egui::Ui, state: &ToolbarState) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let idle = !state.has_draft;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        // Marker tool
        if ui
            .add_enabled(idle, egui::SelectableLabel::new(state.tool == Tool::Marker, "📍 Marker"))
            .clicked()
        {
            action = ToolbarAction::SelectTool(Tool::Marker);
        }

        // Polygon tool
        if ui
            .add_enabled(idle, egui::SelectableLabel::new(state.tool == Tool::Polygon, "▱ Area Polygon"))
            .clicked()
        {
            action = ToolbarAction::SelectTool(Tool::Polygon);
        }

        // Connections
        if ui
            .add_enabled(
                idle && (state.connections_shown || state.feature_count >= 2),
                egui::SelectableLabel::new(state.connections_shown, "🔗 Connect Areas"),
            )
            .clicked()
        {
            action = ToolbarAction::ToggleConnections;
        }

        ui.separator();

        if state.has_home && ui.add_enabled(idle, egui::Button::new("⌖ My Location")).clicked() {
            action = ToolbarAction::CenterOnHome;
        }

        if ui
            .add_enabled(idle && state.feature_count > 0, egui::Button::new("🗑 Clear All"))
            .clicked()
        {
            action = ToolbarAction::ClearAll;
        }

        ui.separator();

        // Tool description
        let tool_text = if state.drawing {
            format!(
                "Click to add vertices, double-click or wait {:.0} seconds to finish",
                state.auto_finish_secs
            )
        } else {
            match state.tool {
                Tool::Marker => "Click the map to place a marker".to_string(),
                Tool::Polygon => "Click the map to start drawing an area".to_string(),
            }
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });

    action
}
