// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the map area marker.

pub mod canvas;
pub mod map_view;
pub mod properties;
pub mod toolbar;
