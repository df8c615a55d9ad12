// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Web Mercator view transform for the map canvas.
//!
//! Converts between geographic coordinates and screen positions for a given
//! center and zoom level, using the same 256-pixel tile world as slippy maps.

use std::f64::consts::PI;

use crate::models::annotation::{BoundingBox, Coordinate, ZoomTarget};

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_78;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;
/// Zoom used when jumping to a single point.
pub const POINT_ZOOM: f64 = 16.0;
/// Screen padding kept around fitted bounds.
pub const FIT_PADDING: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    /// Mercator world position in pixels at the current zoom.
    fn to_world(&self, c: &Coordinate) -> (f64, f64) {
        let size = self.world_size();
        let lat = c.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (c.lng + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> Coordinate {
        let size = self.world_size();
        let lng = x / size * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
        Coordinate::new(lat, lng)
    }

    /// Screen position of `c` inside `rect`.
    pub fn project(&self, c: &Coordinate, rect: egui::Rect) -> egui::Pos2 {
        let (cx, cy) = self.to_world(&self.center);
        let (x, y) = self.to_world(c);
        rect.center() + egui::vec2((x - cx) as f32, (y - cy) as f32)
    }

    /// Coordinate under screen position `pos` inside `rect`.
    pub fn unproject(&self, pos: egui::Pos2, rect: egui::Rect) -> Coordinate {
        let (cx, cy) = self.to_world(&self.center);
        let offset = pos - rect.center();
        self.from_world(cx + offset.x as f64, cy + offset.y as f64)
    }

    /// Move the view by a screen-space drag.
    pub fn pan(&mut self, delta: egui::Vec2) {
        let (cx, cy) = self.to_world(&self.center);
        self.center = self.from_world(cx - delta.x as f64, cy - delta.y as f64);
    }

    /// Change zoom while keeping the coordinate under `anchor` fixed on screen.
    pub fn zoom_at(&mut self, anchor: egui::Pos2, rect: egui::Rect, steps: f64) {
        let fixed = self.unproject(anchor, rect);
        self.zoom = (self.zoom + steps).clamp(MIN_ZOOM, MAX_ZOOM);
        let (fx, fy) = self.to_world(&fixed);
        let offset = anchor - rect.center();
        self.center = self.from_world(fx - offset.x as f64, fy - offset.y as f64);
    }

    /// Pan/zoom to show `target` inside a viewport of `size` pixels.
    pub fn show(&mut self, target: ZoomTarget, size: egui::Vec2) {
        match target {
            ZoomTarget::Point(c) => {
                self.center = c;
                self.zoom = POINT_ZOOM;
            }
            ZoomTarget::Bounds(bounds) => self.fit_bounds(&bounds, size),
        }
    }

    fn fit_bounds(&mut self, bounds: &BoundingBox, size: egui::Vec2) {
        let unit = MapView {
            center: bounds.center(),
            zoom: 0.0,
        };
        let (x0, y0) = unit.to_world(&Coordinate::new(bounds.north, bounds.west));
        let (x1, y1) = unit.to_world(&Coordinate::new(bounds.south, bounds.east));
        let span_x = (x1 - x0).abs().max(f64::EPSILON);
        let span_y = (y1 - y0).abs().max(f64::EPSILON);

        let avail_x = (size.x - 2.0 * FIT_PADDING).max(1.0) as f64;
        let avail_y = (size.y - 2.0 * FIT_PADDING).max(1.0) as f64;
        let zoom = (avail_x / span_x).min(avail_y / span_y).log2();

        // Mercator midpoint so the box is centered on screen.
        let mid = unit.from_world((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        self.center = mid;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_center_projects_to_rect_center() {
        let view = MapView::new(Coordinate::new(-6.2088, 106.8456), 11.0);
        let pos = view.project(&view.center, rect());
        assert!((pos - rect().center()).length() < 1e-3);
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let view = MapView::new(Coordinate::new(45.0, 7.0), 12.0);
        let c = Coordinate::new(45.01, 7.02);
        let back = view.unproject(view.project(&c, rect()), rect());
        assert!((back.lat - c.lat).abs() < 1e-4);
        assert!((back.lng - c.lng).abs() < 1e-4);
    }

    #[test]
    fn test_north_is_up() {
        let view = MapView::new(Coordinate::new(0.0, 0.0), 5.0);
        let north = view.project(&Coordinate::new(1.0, 0.0), rect());
        let east = view.project(&Coordinate::new(0.0, 1.0), rect());
        assert!(north.y < rect().center().y);
        assert!(east.x > rect().center().x);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut view = MapView::new(Coordinate::new(10.0, 10.0), 8.0);
        let anchor = egui::pos2(600.0, 150.0);
        let before = view.unproject(anchor, rect());
        view.zoom_at(anchor, rect(), 2.0);
        let after = view.unproject(anchor, rect());
        assert_eq!(view.zoom, 10.0);
        assert!((before.lat - after.lat).abs() < 1e-4);
        assert!((before.lng - after.lng).abs() < 1e-4);
    }

    #[test]
    fn test_fit_bounds_contains_corners() {
        let bounds = BoundingBox {
            south: -6.25,
            west: 106.80,
            north: -6.20,
            east: 106.90,
        };
        let mut view = MapView::new(Coordinate::new(0.0, 0.0), 3.0);
        view.show(ZoomTarget::Bounds(bounds), rect().size());

        for corner in [
            Coordinate::new(bounds.south, bounds.west),
            Coordinate::new(bounds.north, bounds.east),
        ] {
            assert!(rect().contains(view.project(&corner, rect())));
        }
    }

    #[test]
    fn test_show_point_uses_point_zoom() {
        let mut view = MapView::new(Coordinate::new(0.0, 0.0), 3.0);
        view.show(ZoomTarget::Point(Coordinate::new(1.0, 2.0)), rect().size());
        assert_eq!(view.center, Coordinate::new(1.0, 2.0));
        assert_eq!(view.zoom, POINT_ZOOM);
    }
}
