// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

use core::time::Duration;

use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;
use planar_core::{Mark, MarkKey, Shape, TextAnchor, TextBaseline, TextShape};

/// A text mark spec.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable key.
    pub key: MarkKey,
    /// CSS class.
    pub class: String,
    /// Anchor position.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Rotation angle in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Series label carried as a data attribute.
    pub label: Option<String>,
    /// Rendering order hint.
    pub z_index: i32,
    /// Transition applied on change.
    pub transition: Option<Duration>,
}

impl TextMarkSpec {
    /// Creates a new text mark spec with default styling.
    pub fn new(
        key: MarkKey,
        class: impl Into<String>,
        pos: impl Into<Point>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            key,
            class: class.into(),
            pos: pos.into(),
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::Solid(css::BLACK),
            label: None,
            z_index: crate::z_order::TITLES,
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

    /// Sets the text anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation angle (degrees).
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the series label data attribute.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
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

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut shape = TextShape::new(self.pos, self.text.clone());
        shape.font_size = self.font_size;
        shape.anchor = self.anchor;
        shape.baseline = self.baseline;
        shape.angle = self.angle;
        let mark = Mark::new(self.key.clone(), self.class.clone(), Shape::Text(shape))
            .with_z_index(self.z_index)
            .with_fill(self.fill.clone())
            .with_transition(self.transition);
        match &self.label {
            Some(label) => mark.with_label(label.clone()),
            None => mark,
        }
    }
}
