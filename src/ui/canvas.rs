// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map canvas.
//!
//! Paints render commands over a plain graticule and turns pointer input into
//! map events: drag pans, scroll zooms, click places, double-click finishes.

use crate::models::annotation::{Coordinate, Style};
use crate::render::{LineKind, RenderCommand};
use crate::ui::map_view::MapView;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Click(Coordinate),
    FinishPolygon,
}

/// Display the map canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    view: &mut MapView,
    commands: &[RenderCommand],
    drawing: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());

    if response.dragged() {
        view.pan(response.drag_delta());
    }

    if let Some(hover) = response.hover_pos() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            view.zoom_at(hover, rect, (scroll / 120.0) as f64);
        }
    }

    // The second click of a double-click only finishes; it must not add a
    // duplicate vertex.
    if response.double_clicked() {
        action = CanvasAction::FinishPolygon;
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            action = CanvasAction::Click(view.unproject(pos, rect));
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(235));
    draw_graticule(&painter, view, rect);

    for command in commands {
        draw_command(&painter, view, rect, command);
    }

    if drawing {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }

    if let Some(hover) = response.hover_pos() {
        let c = view.unproject(hover, rect);
        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            format!("{:.6}, {:.6}  z{:.1}", c.lat, c.lng, view.zoom),
            egui::FontId::monospace(11.0),
            egui::Color32::from_gray(60),
        );
    }

    action
}

fn color(style: Style) -> egui::Color32 {
    let [r, g, b] = style.color;
    egui::Color32::from_rgb(r, g, b)
}

fn draw_command(painter: &egui::Painter, view: &MapView, rect: egui::Rect, command: &RenderCommand) {
    let to_screen = |c: &Coordinate| view.project(c, rect);

    match command {
        RenderCommand::Marker { at, style } => {
            let p = to_screen(at);
            painter.circle_filled(p, 8.0, color(*style));
            painter.circle_stroke(p, 8.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
        }
        RenderCommand::Polygon {
            vertices,
            style,
            line,
            filled,
        } => {
            let points: Vec<egui::Pos2> = vertices.iter().map(to_screen).collect();
            let stroke = egui::Stroke::new(3.0, color(*style));
            if *filled && points.len() >= 3 {
                // Convex fill is exact for hulls and close enough for the
                // small hand-drawn polygons this is used for.
                painter.add(egui::Shape::convex_polygon(
                    points.clone(),
                    color(*style).gamma_multiply(0.2),
                    egui::Stroke::NONE,
                ));
            }
            let mut ring = points;
            if let Some(first) = ring.first().copied() {
                ring.push(first);
            }
            draw_path(painter, &ring, stroke, *line);
        }
        RenderCommand::Line {
            from,
            to,
            style,
            line,
        } => {
            let stroke = egui::Stroke::new(2.0, color(*style));
            draw_path(painter, &[to_screen(from), to_screen(to)], stroke, *line);
        }
        RenderCommand::Vertex { at, number, style } => {
            let p = to_screen(at);
            painter.circle_filled(p, 9.0, egui::Color32::WHITE);
            painter.circle_stroke(p, 9.0, egui::Stroke::new(2.0, color(*style)));
            painter.text(
                p,
                egui::Align2::CENTER_CENTER,
                number.to_string(),
                egui::FontId::proportional(11.0),
                color(*style),
            );
        }
        RenderCommand::Label {
            at,
            text,
            style,
            emphasis,
        } => {
            let size = if *emphasis { 14.0 } else { 11.0 };
            let galley = painter.layout(
                text.clone(),
                egui::FontId::proportional(size),
                egui::Color32::WHITE,
                f32::INFINITY,
            );
            let label_rect = egui::Rect::from_center_size(to_screen(at), galley.size())
                .expand2(egui::vec2(6.0, 3.0));
            painter.rect_filled(label_rect, 4.0, color(*style).gamma_multiply(0.9));
            if *emphasis {
                painter.rect_stroke(label_rect, 4.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }
            painter.galley(
                label_rect.min + egui::vec2(6.0, 3.0),
                galley,
                egui::Color32::WHITE,
            );
        }
    }
}

fn draw_path(painter: &egui::Painter, points: &[egui::Pos2], stroke: egui::Stroke, line: LineKind) {
    match line {
        LineKind::Solid => {
            painter.add(egui::Shape::line(points.to_vec(), stroke));
        }
        LineKind::Dashed => {
            painter.extend(egui::Shape::dashed_line(points, stroke, 10.0, 6.0));
        }
    }
}

/// Latitude/longitude grid at a spacing suited to the zoom level.
fn draw_graticule(painter: &egui::Painter, view: &MapView, rect: egui::Rect) {
    let top_left = view.unproject(rect.left_top(), rect);
    let bottom_right = view.unproject(rect.right_bottom(), rect);
    let span = (bottom_right.lng - top_left.lng).abs().max(1e-9);

    let step = [
        45.0, 10.0, 5.0, 1.0, 0.5, 0.1, 0.05, 0.01, 0.005, 0.001, 0.0005, 0.0001,
    ]
    .into_iter()
    .find(|s| span / s >= 4.0)
    .unwrap_or(0.0001);

    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(210));

    let mut lng = (top_left.lng / step).floor() * step;
    while lng <= bottom_right.lng {
        let x = view.project(&Coordinate::new(view.center.lat, lng), rect).x;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
        lng += step;
    }

    let mut lat = (bottom_right.lat / step).floor() * step;
    while lat <= top_left.lat {
        let y = view.project(&Coordinate::new(lat, view.center.lng), rect).y;
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
        lat += step;
    }
}
