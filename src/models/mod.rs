// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation model and the store that owns committed features.

pub mod annotation;
pub mod store;
