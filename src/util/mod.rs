// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Measurement and formatting helpers.

pub mod format;
pub mod geometry;
