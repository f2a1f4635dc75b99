// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartesian charts for `planar_core`.
//!
//! A chart is built from a dataset of [`Record`]s, a [`SeriesConfig`] (one x descriptor and one
//! or more y descriptors) and [`ChartOptions`]. Construction validates the inputs and derives a
//! [`ScalePair`] from the data and the [`Surface`](planar_core::Surface) size; afterwards the
//! [`Renderable`] methods may be called in any order, any number of times:
//! - **Series** are drawn by the variant: [`LineChart`], [`TimeChart`], [`ScatterChart`],
//!   [`CustomScatterChart`].
//! - **Guides** (axes, grid lines, legend, titles) are shared [`CartesianPlane`] behavior.
//! - **Cursor** tracking ([`CursorTracker`]) is available on line and time charts.
//!
//! Every operation is a keyed join under its own scope, so repeated calls only apply what
//! changed and never touch other children of the surface.
//!
//! Scales are derived once. [`Renderable::replace_data`] swaps the dataset but keeps the old
//! scales; rebuild the chart to re-fit them.

mod axis;
mod chart;
#[cfg(test)]
mod chart_tests;
mod cursor;
mod curve;
mod custom_scatter_chart;
mod data;
mod error;
mod format;
mod legend;
mod line_chart;
mod measure;
mod options;
mod plane;
mod rule_mark;
mod scale;
mod scale_builder;
mod scatter_chart;
mod series;
mod symbol;
pub mod telemetry;
mod text_mark;
mod time;
mod time_chart;
mod title;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridSpec, GridStyle, StrokeStyle};
pub use chart::Renderable;
pub use cursor::{CURSOR_SCOPE, CursorTracker};
pub use curve::Interpolation;
pub use custom_scatter_chart::{CustomScatterChart, ICON_SCOPE};
pub use data::{Record, Value};
pub use error::{ChartError, ChartResult};
pub use format::{NumberFormat, NumberKind};
pub use legend::{LEGEND_SCOPE, LegendItem, LegendSpec};
pub use line_chart::{LINE_SCOPE, LineChart};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use options::{ChartOptions, Margin};
pub use plane::{CartesianPlane, LegendPosition};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleContinuous, ScaleKind, ScaleLinear, ScaleTime, infer_domain};
pub use scale_builder::{ScalePair, derive_scales};
pub use scatter_chart::{DEFAULT_RADIUS, SCATTER_SCOPE, ScatterChart};
pub use series::{
    CATEGORY10, Extractor, NumberOverride, SeriesConfig, SeriesDescriptor, TextOverride,
};
pub use text_mark::TextMarkSpec;
pub use time::{TimeFormat, default_time_label, nice_time_domain, time_ticks};
pub use time_chart::TimeChart;
pub use title::{TitleKind, TitleSpec};
pub use z_order::*;
