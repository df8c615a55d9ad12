// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map Area Marker
//!
//! A desktop tool for marking locations and drawing areas on a map, with
//! area, perimeter and distance measurements.

use anyhow::Result;
use area_marker::{app::AreaMarkerApp, config::Config};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "Starting with view {:?}, auto-finish after {:?}",
        config.initial_view(),
        config.auto_finish
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Map Area Marker"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Map Area Marker",
        options,
        Box::new(|_cc| Ok(Box::new(AreaMarkerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
