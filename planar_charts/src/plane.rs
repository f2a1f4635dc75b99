// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Cartesian plane shared by every chart variant.
//!
//! A [`CartesianPlane`] owns a copy of the dataset, the series descriptors, the options and the
//! scales derived from all of them. Scales are derived once, at construction, from the surface
//! size at that moment. [`CartesianPlane::replace_data`] deliberately does not re-derive them:
//! points outside the construction-time domain are drawn outside the plot until the chart is
//! rebuilt.

use core::fmt;

use kurbo::{Point, Rect, Size};
use planar_core::{MarkDiff, Surface};
use tracing::warn;

use crate::axis::{AxisOrient, AxisSpec, GridSpec};
use crate::cursor;
use crate::data::Record;
use crate::error::{ChartError, ChartResult};
use crate::format::NumberFormat;
use crate::legend::{LEGEND_SCOPE, LegendItem, LegendSpec};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::options::ChartOptions;
use crate::scale::{ScaleContinuous, ScaleKind};
use crate::scale_builder::{ScalePair, derive_scales, x_position};
use crate::series::{SeriesConfig, SeriesDescriptor};
use crate::time::default_time_label;
use crate::title::{TitleKind, TitleSpec};

/// Optional legend origin overrides; missing coordinates use the default placement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegendPosition {
    /// Left edge of the legend.
    pub x: Option<f64>,
    /// Top edge of the legend.
    pub y: Option<f64>,
}

impl LegendPosition {
    /// Both coordinates given.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Scales, options, data and series shared by all chart variants.
pub struct CartesianPlane {
    data: Vec<Record>,
    x: SeriesDescriptor,
    y: Vec<SeriesDescriptor>,
    options: ChartOptions,
    scales: ScalePair,
    size: Size,
    measurer: Box<dyn TextMeasurer>,
}

impl fmt::Debug for CartesianPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartesianPlane")
            .field("records", &self.data.len())
            .field("x", &self.x)
            .field("y", &self.y)
            .field("options", &self.options)
            .field("scales", &self.scales)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl CartesianPlane {
    /// Validates the inputs, copies the dataset and derives the scales from the surface size.
    pub fn new(
        surface: &Surface,
        data: &[Record],
        series: SeriesConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        let size = surface.size();
        let scales = derive_scales(data, &series, size, &options.margin, options.tick_count)?;
        let SeriesConfig { x, y } = series;
        let x = x.ok_or(ChartError::MissingXSeries)?;
        Ok(Self {
            data: data.to_vec(),
            x,
            y,
            options,
            scales,
            size,
            measurer: Box::new(HeuristicTextMeasurer),
        })
    }

    /// Replaces the text measurer used for legend placement.
    #[must_use]
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    /// The dataset copy.
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    /// Swaps in a new dataset without re-deriving scales.
    pub fn replace_data(&mut self, data: &[Record]) {
        self.data = data.to_vec();
    }

    /// The x descriptor.
    pub fn x_series(&self) -> &SeriesDescriptor {
        &self.x
    }

    /// The y descriptors.
    pub fn y_series(&self) -> &[SeriesDescriptor] {
        &self.y
    }

    /// The options.
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Both scales.
    pub fn scales(&self) -> &ScalePair {
        &self.scales
    }

    /// The x scale.
    pub fn x_scale(&self) -> &ScaleContinuous {
        &self.scales.x
    }

    /// The y scale.
    pub fn y_scale(&self) -> &ScaleContinuous {
        &self.scales.y
    }

    /// Surface size captured at construction.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The plot area: the surface minus margins.
    pub fn plot_rect(&self) -> Rect {
        let (x0, x1) = self.scales.x.range();
        let (y1, y0) = self.scales.y.range();
        Rect::new(x0, y0, x1, y1)
    }

    /// Pixel x of a record, if its x value is defined for the scale kind.
    pub fn x_pixel(&self, record: &Record) -> Option<f64> {
        x_position(&self.x.extract(record), self.scales.x_kind).map(|v| self.scales.x.map(v))
    }

    /// Pixel position of `record` for descriptor `y`, if both coordinates are defined.
    pub fn point(&self, record: &Record, y: &SeriesDescriptor) -> Option<Point> {
        let px = self.x_pixel(record)?;
        let py = y.extract(record).as_f64()?;
        Some(Point::new(px, self.scales.y.map(py)))
    }

    /// Every drawable `(record index, pixel)` pair for descriptor `y`.
    pub fn points(&self, y: &SeriesDescriptor) -> Vec<(usize, Point)> {
        let out: Vec<(usize, Point)> = self
            .data
            .iter()
            .enumerate()
            .filter_map(|(i, r)| self.point(r, y).map(|p| (i, p)))
            .collect();
        let skipped = self.data.len() - out.len();
        if skipped > 0 {
            warn!(series = %y.label, skipped, "records without a numeric x/y were skipped");
        }
        out
    }

    /// Index of the record whose x pixel is nearest `px`. Ties go to the earlier record.
    pub fn nearest_index(&self, px: f64) -> Option<usize> {
        cursor::nearest_by_x(
            self.data
                .iter()
                .enumerate()
                .filter_map(|(i, r)| self.x_pixel(r).map(|x| (i, x))),
            px,
        )
    }

    /// Renders the x axis. `format` is a numeric format code; without one, linear scales get
    /// step-precision labels and time scales get calendar labels.
    pub fn render_x_axis(
        &self,
        surface: &mut Surface,
        format: Option<&str>,
    ) -> ChartResult<Vec<MarkDiff>> {
        match format {
            Some(code) => {
                let f = NumberFormat::parse(code)?;
                Ok(self.render_x_axis_with(surface, &|v| f.format(v)))
            }
            None if self.scales.x_kind == ScaleKind::Time => {
                Ok(self.render_x_axis_with(surface, &default_time_label))
            }
            None => {
                let f = NumberFormat::for_step(self.scales.x.tick_step(self.options.tick_count));
                Ok(self.render_x_axis_with(surface, &|v| f.format(v)))
            }
        }
    }

    /// Renders the x axis with a custom tick label function.
    pub fn render_x_axis_with(
        &self,
        surface: &mut Surface,
        label: &dyn Fn(f64) -> String,
    ) -> Vec<MarkDiff> {
        let axis = self.axis(AxisOrient::Bottom);
        let marks = axis.marks(&self.scales.x, self.scales.y.range().0, label);
        surface.join(axis.scope(), marks)
    }

    /// Renders the y axis. `format` is a numeric format code.
    pub fn render_y_axis(
        &self,
        surface: &mut Surface,
        format: Option<&str>,
    ) -> ChartResult<Vec<MarkDiff>> {
        let f = match format {
            Some(code) => NumberFormat::parse(code)?,
            None => NumberFormat::for_step(self.scales.y.tick_step(self.options.tick_count)),
        };
        let axis = self.axis(AxisOrient::Left);
        let marks = axis.marks(&self.scales.y, self.scales.x.range().0, &|v| f.format(v));
        Ok(surface.join(axis.scope(), marks))
    }

    /// Renders the x gridlines: one horizontal line per y tick, spanning the x range.
    pub fn render_x_grid_lines(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        let grid = self.grid(AxisOrient::Bottom);
        let marks = grid.marks(&self.scales.y, self.scales.x.range());
        surface.join(grid.scope(), marks)
    }

    /// Renders the y gridlines: one vertical line per x tick, spanning the y range.
    pub fn render_y_grid_lines(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        let grid = self.grid(AxisOrient::Left);
        let marks = grid.marks(&self.scales.x, self.scales.y.range());
        surface.join(grid.scope(), marks)
    }

    /// Renders one swatch + label row per y series.
    ///
    /// By default the legend hugs the right margin and starts at the top margin.
    pub fn render_legend(
        &self,
        surface: &mut Surface,
        item_height: Option<f64>,
        position: LegendPosition,
    ) -> Vec<MarkDiff> {
        let items = self
            .y
            .iter()
            .enumerate()
            .map(|(i, y)| LegendItem::new(y.label.clone(), y.color_or_default(i)))
            .collect();
        let mut legend = LegendSpec::new(items).with_transition(self.options.transition());
        if let Some(h) = item_height {
            legend = legend.with_item_height(h);
        }
        let margin = &self.options.margin;
        let width = legend.measure(&*self.measurer).width;
        let origin = Point::new(
            position
                .x
                .unwrap_or(self.size.width - margin.right - width),
            position.y.unwrap_or(margin.top),
        );
        surface.join(LEGEND_SCOPE, legend.marks(origin))
    }

    /// Renders the chart title.
    pub fn render_chart_title(&self, surface: &mut Surface, title: &str) -> Vec<MarkDiff> {
        self.render_title(surface, TitleKind::Chart, title)
    }

    /// Renders the x axis label.
    pub fn render_x_axis_label(&self, surface: &mut Surface, label: &str) -> Vec<MarkDiff> {
        self.render_title(surface, TitleKind::XAxis, label)
    }

    /// Renders the y axis label.
    pub fn render_y_axis_label(&self, surface: &mut Surface, label: &str) -> Vec<MarkDiff> {
        self.render_title(surface, TitleKind::YAxis, label)
    }

    fn render_title(&self, surface: &mut Surface, kind: TitleKind, text: &str) -> Vec<MarkDiff> {
        let mark = TitleSpec::new(kind, text)
            .with_transition(self.options.transition())
            .mark(self.size, &self.options.margin);
        surface.join(kind.scope(), [mark])
    }

    fn axis(&self, orient: AxisOrient) -> AxisSpec {
        AxisSpec::new(orient)
            .with_tick_count(self.options.tick_count)
            .with_tick_size(self.options.tick_size)
            .with_tick_padding(self.options.tick_padding)
            .with_transition(self.options.transition())
    }

    fn grid(&self, orient: AxisOrient) -> GridSpec {
        GridSpec::new(orient)
            .with_tick_count(self.options.tick_count)
            .with_transition(self.options.transition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(data: &[Record]) -> CartesianPlane {
        let surface = Surface::new(400.0, 300.0);
        CartesianPlane::new(
            &surface,
            data,
            SeriesConfig::new(
                SeriesDescriptor::field("x", "X"),
                [SeriesDescriptor::field("y", "Y")],
            ),
            ChartOptions::default().with_static(true),
        )
        .unwrap()
    }

    fn rec(x: f64, y: f64) -> Record {
        Record::new().with("x", x).with("y", y)
    }

    #[test]
    fn replace_data_keeps_derived_scales() {
        let mut p = plane(&[rec(0.0, 0.0), rec(10.0, 10.0)]);
        let before = *p.scales();
        p.replace_data(&[rec(0.0, 0.0), rec(100.0, 100.0)]);
        assert_eq!(*p.scales(), before);
        assert_eq!(p.data().len(), 2);
        // Out-of-domain values map outside the plot.
        let pt = p.point(&p.data()[1], &p.y_series()[0]).unwrap();
        assert!(pt.x > p.plot_rect().x1);
    }

    #[test]
    fn nearest_index_prefers_first_on_ties() {
        let p = plane(&[rec(0.0, 0.0), rec(10.0, 1.0), rec(10.0, 2.0), rec(20.0, 3.0)]);
        let px = p.x_scale().map(10.0);
        assert_eq!(p.nearest_index(px), Some(1));
        assert_eq!(p.nearest_index(p.x_scale().map(16.0)), Some(3));
    }

    #[test]
    fn default_legend_hugs_the_right_margin() {
        let p = plane(&[rec(0.0, 0.0), rec(10.0, 10.0)]);
        let mut surface = Surface::new(400.0, 300.0);
        p.render_legend(&mut surface, None, LegendPosition::default());
        let swatch = surface.get(&planar_core::MarkKey::new("legend/Y/swatch")).unwrap();
        // Swatch 12 + gap 6 + "Y" at 7.2px: the legend is 25.2px wide.
        let b = swatch.mark.bounds();
        assert!((b.x0 - (400.0 - 30.0 - 25.2)).abs() < 1e-9);
        assert!((b.y0 - (30.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn bad_format_code_is_an_error() {
        let p = plane(&[rec(0.0, 0.0), rec(10.0, 10.0)]);
        let mut surface = Surface::new(400.0, 300.0);
        assert!(matches!(
            p.render_y_axis(&mut surface, Some("q")),
            Err(ChartError::InvalidFormat { .. })
        ));
        assert!(surface.is_empty(), "failed render must not touch the surface");
    }
}
