// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Surfaces paint by `(z_index, key)`, so these only need to be coarse.

/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Line series.
pub const SERIES_STROKE: i32 = 10;
/// Scatter points and icons, drawn above lines.
pub const SERIES_POINTS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis titles.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart title.
pub const TITLES: i32 = 80;

/// Cursor guide and markers; always on top.
pub const CURSOR: i32 = 90;
