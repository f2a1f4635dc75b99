// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation: one swatch + label row per series, stacked vertically.

use core::time::Duration;

use kurbo::{Point, Size};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use planar_core::{Mark, MarkKey, Shape, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::symbol::square_path;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Join scope for legend marks.
pub const LEGEND_SCOPE: &str = "legend";

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series label.
    pub label: String,
    /// Swatch color.
    pub color: Color,
}

impl LegendItem {
    /// Creates a legend row.
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// An unpositioned legend: measure it, then generate marks at an origin.
#[derive(Clone, Debug)]
pub struct LegendSpec {
    /// Row height.
    pub item_height: f64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label paint.
    pub text_fill: Brush,
    /// Rows in display order.
    pub items: Vec<LegendItem>,
    /// Transition applied to changed rows.
    pub transition: Option<Duration>,
}

impl LegendSpec {
    /// Creates a legend with default styling.
    pub fn new(items: Vec<LegendItem>) -> Self {
        Self {
            item_height: 20.0,
            swatch_size: 12.0,
            label_dx: 6.0,
            font_size: 12.0,
            text_fill: css::BLACK.into(),
            items,
            transition: None,
        }
    }

    /// Sets the row height.
    #[must_use]
    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height;
        self
    }

    /// Sets the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Option<Duration>) -> Self {
        self.transition = transition;
        self
    }

    /// Estimates the legend size.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        let label_width = self
            .items
            .iter()
            .map(|item| measurer.measure(&item.label, self.font_size).0)
            .fold(0.0, f64::max);
        Size::new(
            self.swatch_size + self.label_dx + label_width,
            self.item_height * self.items.len() as f64,
        )
    }

    /// Generates the legend marks with the top-left corner at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let root = MarkKey::new(LEGEND_SCOPE);
        let mut out = Vec::with_capacity(self.items.len() * 2);
        for (i, item) in self.items.iter().enumerate() {
            let cy = origin.y + self.item_height * (i as f64 + 0.5);
            let swatch = square_path(
                Point::new(origin.x + 0.5 * self.swatch_size, cy),
                self.swatch_size,
            );
            out.push(
                Mark::new(
                    root.with(&item.label).with("swatch"),
                    "legend-swatch",
                    Shape::Path(swatch),
                )
                .with_label(item.label.clone())
                .with_fill(item.color)
                .with_z_index(z_order::LEGEND_SWATCHES)
                .with_transition(self.transition),
            );
            out.push(
                TextMarkSpec::new(
                    root.with(&item.label).with("label"),
                    "legend-label",
                    (origin.x + self.swatch_size + self.label_dx, cy),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Middle)
                .with_label(item.label.clone())
                .with_z_index(z_order::LEGEND_LABELS)
                .with_transition(self.transition)
                .mark(),
            );
        }
        out
    }
}
