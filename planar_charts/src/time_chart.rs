// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-series line charts.

use planar_core::{MarkDiff, Surface};

use crate::chart::Renderable;
use crate::cursor::CursorTracker;
use crate::data::Record;
use crate::error::ChartResult;
use crate::line_chart::{self, LINE_SCOPE, LineChart};
use crate::options::ChartOptions;
use crate::plane::CartesianPlane;
use crate::series::SeriesConfig;
use crate::time::{TimeFormat, default_time_label};

/// A line chart whose x axis labels are dates.
///
/// The x-axis format code is a strftime pattern (e.g. `"%b %d"`) instead of a numeric one.
/// Numeric x values are read as UTC epoch milliseconds when labeled.
#[derive(Debug)]
pub struct TimeChart {
    plane: CartesianPlane,
    cursor: CursorTracker,
}

impl TimeChart {
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

    /// Attaches the pointer-following cursor; see [`LineChart::render_cursor`].
    pub fn render_cursor(&self, surface: &mut Surface) {
        line_chart::render_cursor(&self.plane, &self.cursor, surface);
    }
}

impl Renderable for TimeChart {
    fn plane(&self) -> &CartesianPlane {
        &self.plane
    }

    fn plane_mut(&mut self) -> &mut CartesianPlane {
        &mut self.plane
    }

    fn render_series(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        surface.join(LINE_SCOPE, LineChart::series_marks(&self.plane))
    }

    fn replace_data(&mut self, data: &[Record]) {
        self.plane.replace_data(data);
        self.cursor.refresh(&self.plane);
    }

    fn render_x_axis(
        &self,
        surface: &mut Surface,
        format: Option<&str>,
    ) -> ChartResult<Vec<MarkDiff>> {
        match format {
            Some(code) => {
                let f = TimeFormat::parse(code)?;
                Ok(self.plane.render_x_axis_with(surface, &|t| f.format(t)))
            }
            None => Ok(self.plane.render_x_axis_with(surface, &default_time_label)),
        }
    }
}
