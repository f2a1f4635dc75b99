// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render surface every chart variant exposes.

use planar_core::{MarkDiff, Surface};

use crate::data::Record;
use crate::error::ChartResult;
use crate::plane::{CartesianPlane, LegendPosition};

/// Rendering operations of a chart.
///
/// Variants supply [`Renderable::render_series`]; everything else is shared behavior of the
/// [`CartesianPlane`] and rarely needs overriding. Every operation is a keyed join under its own
/// scope, so calls may come in any order and any number of times.
pub trait Renderable {
    /// The shared plane.
    fn plane(&self) -> &CartesianPlane;

    /// The shared plane, mutably.
    fn plane_mut(&mut self) -> &mut CartesianPlane;

    /// Draws (or updates) the data series.
    fn render_series(&self, surface: &mut Surface) -> Vec<MarkDiff>;

    /// Draws the x axis with an optional format code.
    fn render_x_axis(
        &self,
        surface: &mut Surface,
        format: Option<&str>,
    ) -> ChartResult<Vec<MarkDiff>> {
        self.plane().render_x_axis(surface, format)
    }

    /// Draws the y axis with an optional numeric format code.
    fn render_y_axis(
        &self,
        surface: &mut Surface,
        format: Option<&str>,
    ) -> ChartResult<Vec<MarkDiff>> {
        self.plane().render_y_axis(surface, format)
    }

    /// Draws the x gridlines: horizontal lines at the y ticks.
    fn render_x_grid_lines(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        self.plane().render_x_grid_lines(surface)
    }

    /// Draws the y gridlines: vertical lines at the x ticks.
    fn render_y_grid_lines(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        self.plane().render_y_grid_lines(surface)
    }

    /// Draws the legend.
    fn render_legend(
        &self,
        surface: &mut Surface,
        item_height: Option<f64>,
        position: LegendPosition,
    ) -> Vec<MarkDiff> {
        self.plane().render_legend(surface, item_height, position)
    }

    /// Draws the chart title.
    fn render_chart_title(&self, surface: &mut Surface, title: &str) -> Vec<MarkDiff> {
        self.plane().render_chart_title(surface, title)
    }

    /// Draws the x axis label.
    fn render_x_axis_label(&self, surface: &mut Surface, label: &str) -> Vec<MarkDiff> {
        self.plane().render_x_axis_label(surface, label)
    }

    /// Draws the y axis label.
    fn render_y_axis_label(&self, surface: &mut Surface, label: &str) -> Vec<MarkDiff> {
        self.plane().render_y_axis_label(surface, label)
    }

    /// Swaps the dataset without re-deriving scales; see [`CartesianPlane::replace_data`].
    fn replace_data(&mut self, data: &[Record]) {
        self.plane_mut().replace_data(data);
    }
}
