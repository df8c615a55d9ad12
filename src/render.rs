// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Render commands.
//!
//! The workspace never touches a drawing surface. Instead `scene` describes
//! what should be on the map as a flat list of commands in paint order, and
//! whichever map adapter is in use turns them into pixels.

use crate::connections::ConnectionSnapshot;
use crate::models::annotation::{Coordinate, Feature, Geometry, Style};
use crate::session::DrawingSession;
use crate::util::format::{format_area, format_distance};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    /// Drawing previews and connections.
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Marker {
        at: Coordinate,
        style: Style,
    },
    Polygon {
        vertices: Vec<Coordinate>,
        style: Style,
        line: LineKind,
        filled: bool,
    },
    Line {
        from: Coordinate,
        to: Coordinate,
        style: Style,
        line: LineKind,
    },
    /// Numbered vertex of a polygon being drawn (1-based).
    Vertex {
        at: Coordinate,
        number: usize,
        style: Style,
    },
    Label {
        at: Coordinate,
        text: String,
        style: Style,
        emphasis: bool,
    },
}

/// Everything to draw for the current workspace, back to front.
pub fn scene(workspace: &Workspace) -> Vec<RenderCommand> {
    let mut commands = Vec::new();
    for feature in workspace.list_features() {
        feature_commands(feature, &mut commands);
    }
    if let Some(snapshot) = workspace.connections() {
        connection_commands(snapshot, &mut commands);
    }
    draft_commands(workspace.session(), &mut commands);
    commands
}

fn feature_commands(feature: &Feature, out: &mut Vec<RenderCommand>) {
    geometry_commands(feature.geometry(), feature.style(), out);
    if let (Geometry::Polygon(_), Some(metrics)) = (feature.geometry(), feature.metrics()) {
        out.push(RenderCommand::Label {
            at: feature.geometry().representative_point(),
            text: format!(
                "{}\n{}\nPerimeter: {}",
                feature.name(),
                format_area(metrics.area),
                format_distance(metrics.perimeter)
            ),
            style: feature.style(),
            emphasis: false,
        });
    }
}

fn geometry_commands(geometry: &Geometry, style: Style, out: &mut Vec<RenderCommand>) {
    match geometry {
        Geometry::Point(at) => out.push(RenderCommand::Marker { at: *at, style }),
        Geometry::Polygon(vertices) => out.push(RenderCommand::Polygon {
            vertices: vertices.clone(),
            style,
            line: LineKind::Solid,
            filled: true,
        }),
    }
}

fn connection_commands(snapshot: &ConnectionSnapshot, out: &mut Vec<RenderCommand>) {
    for link in &snapshot.links {
        out.push(RenderCommand::Line {
            from: link.from,
            to: link.to,
            style: Style::CONNECTION,
            line: LineKind::Dashed,
        });
        out.push(RenderCommand::Label {
            at: link.midpoint(),
            text: format_distance(link.distance),
            style: Style::CONNECTION,
            emphasis: false,
        });
    }

    if let Some(boundary) = &snapshot.boundary {
        out.push(RenderCommand::Polygon {
            vertices: boundary.hull.clone(),
            style: Style::BOUNDARY,
            line: LineKind::Dashed,
            filled: true,
        });
        out.push(RenderCommand::Label {
            at: boundary.anchor,
            text: format!(
                "Connected region\n{}\nIndividual area: {}\n{} locations connected",
                format_area(boundary.area),
                format_area(snapshot.total_area),
                snapshot.feature_count
            ),
            style: Style::BOUNDARY,
            emphasis: true,
        });
    }
}

fn draft_commands(session: &DrawingSession, out: &mut Vec<RenderCommand>) {
    if let Some(draft) = session.draft() {
        geometry_commands(draft.geometry(), draft.style(), out);
        if let Some(metrics) = draft.metrics() {
            out.push(RenderCommand::Label {
                at: draft.geometry().representative_point(),
                text: format!(
                    "{}\nPerimeter: {}",
                    format_area(metrics.area),
                    format_distance(metrics.perimeter)
                ),
                style: draft.style(),
                emphasis: false,
            });
        }
        return;
    }

    let style = Style::POLYGON;
    for edge in session.preview_edges() {
        out.push(RenderCommand::Line {
            from: edge.from,
            to: edge.to,
            style,
            line: LineKind::Dashed,
        });
        out.push(RenderCommand::Label {
            at: edge.midpoint(),
            text: format!("{:.0}m", edge.distance),
            style,
            emphasis: false,
        });
    }
    if let Some(closing) = session.closing_edge() {
        out.push(RenderCommand::Line {
            from: closing.from,
            to: closing.to,
            style,
            line: LineKind::Dashed,
        });
    }
    for (i, at) in session.vertices().iter().enumerate() {
        out.push(RenderCommand::Vertex {
            at: *at,
            number: i + 1,
            style,
        });
    }
}
