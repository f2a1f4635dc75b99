// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter charts: one circle per (series, record).

use kurbo::Circle;
use planar_core::{Mark, MarkDiff, MarkKey, Shape, Surface};

use crate::chart::Renderable;
use crate::data::Record;
use crate::error::ChartResult;
use crate::options::ChartOptions;
use crate::plane::CartesianPlane;
use crate::series::{SeriesConfig, SeriesDescriptor};
use crate::z_order;

/// Join scope of scatter points.
pub const SCATTER_SCOPE: &str = "scatter-series";

/// Radius used when neither the record nor the descriptor provides one.
pub const DEFAULT_RADIUS: f64 = 4.0;

/// Radius for one record: the per-record override if it yields a positive finite number, else
/// the descriptor radius, else [`DEFAULT_RADIUS`].
pub(crate) fn radius_for(y: &SeriesDescriptor, record: &Record) -> f64 {
    y.radius_override
        .as_ref()
        .and_then(|f| f(record))
        .filter(|r| r.is_finite() && *r > 0.0)
        .or(y.radius)
        .unwrap_or(DEFAULT_RADIUS)
}

/// A scatter chart.
#[derive(Debug)]
pub struct ScatterChart {
    plane: CartesianPlane,
}

impl ScatterChart {
    /// Validates the inputs and derives scales from the surface size.
    pub fn new(
        surface: &Surface,
        data: &[Record],
        series: SeriesConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        Ok(Self {
            plane: CartesianPlane::new(surface, data, series, options)?,
        })
    }
}

impl Renderable for ScatterChart {
    fn plane(&self) -> &CartesianPlane {
        &self.plane
    }

    fn plane_mut(&mut self) -> &mut CartesianPlane {
        &mut self.plane
    }

    fn render_series(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        let transition = self.plane.options().transition();
        let root = MarkKey::new("point");
        let mut marks = Vec::new();
        for (i, y) in self.plane.y_series().iter().enumerate() {
            let color = y.color_or_default(i);
            for (index, p) in self.plane.points(y) {
                let record = &self.plane.data()[index];
                marks.push(
                    Mark::new(
                        root.with(&y.label).with(index),
                        "scatter-point",
                        Shape::Circle(Circle::new(p, radius_for(y, record))),
                    )
                    .with_label(y.label.clone())
                    .with_fill(color)
                    .with_z_index(z_order::SERIES_POINTS)
                    .with_transition(transition),
                );
            }
        }
        surface.join(SCATTER_SCOPE, marks)
    }
}
