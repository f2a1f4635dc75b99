// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a straight stroked segment: axis domains, tick lines, gridlines, the cursor guide.

use core::time::Duration;

use kurbo::Line;
use peniko::Brush;
use peniko::color::palette::css;
use planar_core::{Mark, MarkKey, Shape};

use crate::z_order;

/// A rule mark spec.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable key.
    pub key: MarkKey,
    /// CSS class.
    pub class: String,
    /// Start point x.
    pub x0: f64,
    /// Start point y.
    pub y0: f64,
    /// End point x.
    pub x1: f64,
    /// End point y.
    pub y1: f64,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
    /// Transition applied on change.
    pub transition: Option<Duration>,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(key: MarkKey, class: impl Into<String>, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            key,
            class: class.into(),
            x0,
            y0,
            x1,
            y1,
            stroke: Brush::Solid(css::BLACK),
            stroke_width: 1.0,
            z_index: z_order::AXIS_RULES,
            transition: None,
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(key: MarkKey, class: impl Into<String>, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(key, class, x0, y, x1, y)
    }

    /// Creates a vertical rule.
    pub fn vertical(key: MarkKey, class: impl Into<String>, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(key, class, x, y0, x, y1)
    }

    /// Sets stroke paint and width.
    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Option<Duration>) -> Self {
        self.transition = transition;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        Mark::new(
            self.key.clone(),
            self.class.clone(),
            Shape::Line(Line::new((self.x0, self.y0), (self.x1, self.y1))),
        )
        .with_z_index(self.z_index)
        .with_stroke(self.stroke.clone(), self.stroke_width)
        .with_transition(self.transition)
    }
}
