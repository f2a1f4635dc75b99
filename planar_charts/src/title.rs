// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart title and axis labels.
//!
//! Each is a single text element with a fixed key, joined under its own scope, so rendering it
//! again updates the text in place.

use core::time::Duration;

use kurbo::Size;
use peniko::Brush;
use peniko::color::palette::css;
use planar_core::{Mark, MarkKey, TextAnchor, TextBaseline};

use crate::options::Margin;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Which title a [`TitleSpec`] produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TitleKind {
    /// Centered above the plot.
    Chart,
    /// Centered below the x axis.
    XAxis,
    /// Rotated, centered left of the y axis.
    YAxis,
}

impl TitleKind {
    /// Join scope, key and CSS class for this title.
    pub fn scope(self) -> &'static str {
        match self {
            Self::Chart => "chart-title",
            Self::XAxis => "x-axis-label",
            Self::YAxis => "y-axis-label",
        }
    }
}

/// A chart title or axis label.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Which title this is.
    pub kind: TitleKind,
    /// Text (unshaped).
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Transition applied on change.
    pub transition: Option<Duration>,
}

impl TitleSpec {
    /// Creates a title with default styling for its kind.
    pub fn new(kind: TitleKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            font_size: match kind {
                TitleKind::Chart => 16.0,
                TitleKind::XAxis | TitleKind::YAxis => 12.0,
            },
            fill: css::BLACK.into(),
            transition: None,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Option<Duration>) -> Self {
        self.transition = transition;
        self
    }

    /// Generates the title mark for a surface of `size` with plot `margin`.
    pub fn mark(&self, size: Size, margin: &Margin) -> Mark {
        let scope = self.kind.scope();
        let plot_cx = margin.left + 0.5 * (size.width - margin.left - margin.right);
        let plot_cy = margin.top + 0.5 * (size.height - margin.top - margin.bottom);
        let (pos, baseline, angle, z_index) = match self.kind {
            TitleKind::Chart => (
                (0.5 * size.width, 0.5 * margin.top),
                TextBaseline::Middle,
                0.0,
                z_order::TITLES,
            ),
            TitleKind::XAxis => (
                (plot_cx, size.height - 2.0),
                TextBaseline::Alphabetic,
                0.0,
                z_order::AXIS_TITLES,
            ),
            TitleKind::YAxis => (
                (2.0, plot_cy),
                TextBaseline::Hanging,
                -90.0,
                z_order::AXIS_TITLES,
            ),
        };
        TextMarkSpec::new(MarkKey::new(scope), scope, pos, &*self.text)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(baseline)
            .with_angle(angle)
            .with_font_size(self.font_size)
            .with_fill(self.fill.clone())
            .with_z_index(z_index)
            .with_transition(self.transition)
            .mark()
    }
}
