// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map Area Marker
//!
//! Place markers and draw polygons on a map, then measure them: spherical
//! area and perimeter per polygon, great-circle distances between features,
//! and a convex boundary around everything marked.
//!
//! The measuring core (`util`, `models`, `session`, `connections`,
//! `workspace`) knows nothing about drawing. `render` turns its state into
//! commands, and the egui front end in `ui`/`app` paints them.

pub mod app;
pub mod config;
pub mod connections;
pub mod error;
pub mod io;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
pub mod util;
pub mod workspace;
