// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line charts: one path per y series.

use peniko::Color;
use planar_core::{Mark, MarkDiff, MarkKey, Shape, Surface};

use crate::chart::Renderable;
use crate::curve::Interpolation;
use crate::cursor::{CURSOR_SCOPE, CursorTracker};
use crate::data::Record;
use crate::error::ChartResult;
use crate::options::ChartOptions;
use crate::plane::CartesianPlane;
use crate::series::SeriesConfig;
use crate::z_order;

/// Join scope of line series paths.
pub const LINE_SCOPE: &str = "line-series";

const LINE_WIDTH: f64 = 1.5;

/// A line chart.
///
/// First draws reveal each path by animating its dash offset; later draws morph the path
/// geometry and color. Static charts skip both.
#[derive(Debug)]
pub struct LineChart {
    plane: CartesianPlane,
    cursor: CursorTracker,
}

impl LineChart {
    /// Validates the inputs and derives scales from the surface size.
    pub fn new(
        surface: &Surface,
        data: &[Record],
        series: SeriesConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        let plane = CartesianPlane::new(surface, data, series, options)?;
        let cursor = CursorTracker::new(&plane);
        Ok(Self { plane, cursor })
    }

    /// Attaches the pointer-following cursor.
    ///
    /// A no-op for static charts: no listener is registered and nothing is drawn. Once attached
    /// the cursor follows [`Renderable::replace_data`]; calling this again replaces the listener.
    pub fn render_cursor(&self, surface: &mut Surface) {
        render_cursor(&self.plane, &self.cursor, surface);
    }

    pub(crate) fn series_marks(plane: &CartesianPlane) -> Vec<Mark> {
        let interpolation = Interpolation::from_curve_flag(plane.options().curve);
        let transition = plane.options().transition();
        let root = MarkKey::new("line");
        plane
            .y_series()
            .iter()
            .enumerate()
            .filter_map(|(i, y)| {
                let points: Vec<_> = plane.points(y).into_iter().map(|(_, p)| p).collect();
                if points.is_empty() {
                    return None;
                }
                Some(
                    Mark::new(
                        root.with(&y.label),
                        "line-series",
                        Shape::Path(interpolation.path(&points)),
                    )
                    .with_label(y.label.clone())
                    .with_fill(Color::TRANSPARENT)
                    .with_stroke(y.color_or_default(i), LINE_WIDTH)
                    .with_z_index(z_order::SERIES_STROKE)
                    .with_transition(transition)
                    .with_reveal(true),
                )
            })
            .collect()
    }
}

pub(crate) fn render_cursor(
    plane: &CartesianPlane,
    cursor: &CursorTracker,
    surface: &mut Surface,
) {
    if plane.options().is_chart_static {
        return;
    }
    cursor.refresh(plane);
    surface.on_pointer_move(CURSOR_SCOPE, cursor.clone());
}

impl Renderable for LineChart {
    fn plane(&self) -> &CartesianPlane {
        &self.plane
    }

    fn plane_mut(&mut self) -> &mut CartesianPlane {
        &mut self.plane
    }

    fn render_series(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        surface.join(LINE_SCOPE, Self::series_marks(&self.plane))
    }

    fn replace_data(&mut self, data: &[Record]) {
        self.plane.replace_data(data);
        self.cursor.refresh(&self.plane);
    }
}
