// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the unit of drawing placed on a [`crate::Surface`].
//!
//! A mark is a fully resolved shape (scene coordinates, paint, class names) identified by a
//! stable [`MarkKey`]. Chart code regenerates marks on every render call; the surface compares
//! them by key against what it already holds.

use core::fmt;
use core::time::Duration;

use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Shape as _};
use peniko::{Brush, Color};

/// A stable, ordered identity for a mark.
///
/// Keys are slash-separated paths, e.g. `point/Revenue/3`. Two marks with the same key are the
/// same element across renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkKey(String);

impl MarkKey {
    /// Creates a key with a single root segment.
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    /// Returns a child key with `part` appended as a new segment.
    #[must_use]
    pub fn with(&self, part: impl fmt::Display) -> Self {
        Self(format!("{}/{part}", self.0))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor point is the vertical middle of the text.
    #[default]
    Middle,
    /// The anchor point is the alphabetic baseline.
    Alphabetic,
    /// The anchor point is the top of the text.
    Hanging,
}

/// Unshaped text placed at a point.
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
}

impl TextShape {
    /// Creates a text shape with a 12px font, start anchor and middle baseline.
    pub fn new(pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            pos: pos.into(),
            text: text.into(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            angle: 0.0,
        }
    }

    fn bounds(&self) -> Rect {
        // ~0.6em average glyph width.
        let w = 0.6 * self.font_size * self.text.chars().count() as f64;
        let h = self.font_size;
        let (x0, x1) = match self.anchor {
            TextAnchor::Start => (self.pos.x, self.pos.x + w),
            TextAnchor::Middle => (self.pos.x - 0.5 * w, self.pos.x + 0.5 * w),
            TextAnchor::End => (self.pos.x - w, self.pos.x),
        };
        let (y0, y1) = match self.baseline {
            TextBaseline::Middle => (self.pos.y - 0.5 * h, self.pos.y + 0.5 * h),
            TextBaseline::Alphabetic => (self.pos.y - h, self.pos.y),
            TextBaseline::Hanging => (self.pos.y, self.pos.y + h),
        };
        Rect::new(x0, y0, x1, y1)
    }
}

/// Geometry of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// An arbitrary path.
    Path(BezPath),
    /// A circle.
    Circle(Circle),
    /// A straight segment.
    Line(Line),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A run of text.
    Text(TextShape),
}

/// Coarse shape kind, used in diffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Shape::Path`].
    Path,
    /// [`Shape::Circle`].
    Circle,
    /// [`Shape::Line`].
    Line,
    /// [`Shape::Rect`].
    Rect,
    /// [`Shape::Text`].
    Text,
}

impl Shape {
    /// Returns the shape kind.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Path(_) => ShapeKind::Path,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Line(_) => ShapeKind::Line,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Text(_) => ShapeKind::Text,
        }
    }

    /// Returns the untransformed bounding box (text bounds are estimated).
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Path(p) => p.bounding_box(),
            Self::Circle(c) => c.bounding_box(),
            Self::Line(l) => l.bounding_box(),
            Self::Rect(r) => *r,
            Self::Text(t) => t.bounds(),
        }
    }

    /// Stroke length of the shape, used for reveal transitions.
    pub fn stroke_length(&self) -> f64 {
        use kurbo::ParamCurveArclen;
        const ACCURACY: f64 = 1e-3;
        match self {
            Self::Path(p) => p.segments().map(|seg| seg.arclen(ACCURACY)).sum(),
            Self::Circle(c) => core::f64::consts::TAU * c.radius,
            Self::Line(l) => l.arclen(ACCURACY),
            Self::Rect(r) => 2.0 * (r.width().abs() + r.height().abs()),
            Self::Text(_) => 0.0,
        }
    }
}

/// A resolved drawing element.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub key: MarkKey,
    /// Class name(s), emitted verbatim as the `class` attribute.
    pub class: String,
    /// Series label, emitted as `data-label`.
    pub label: Option<String>,
    /// Render order; ties are broken by key.
    pub z_index: i32,
    /// Geometry.
    pub shape: Shape,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables stroking.
    pub stroke_width: f64,
    /// Optional transform applied to the shape.
    pub transform: Option<Affine>,
    /// Transition duration. `None` applies changes immediately.
    pub transition: Option<Duration>,
    /// Whether entering marks reveal their stroke progressively.
    pub reveal: bool,
}

impl Mark {
    /// Creates a mark with no fill, no stroke and no transition.
    pub fn new(key: MarkKey, class: impl Into<String>, shape: Shape) -> Self {
        Self {
            key,
            class: class.into(),
            label: None,
            z_index: 0,
            shape,
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            transform: None,
            transition: None,
            reveal: false,
        }
    }

    /// Sets the series label.
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

    /// Sets the fill paint.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets stroke paint and width.
    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Sets the transition duration (`None` disables transitions).
    #[must_use]
    pub fn with_transition(mut self, duration: Option<Duration>) -> Self {
        self.transition = duration;
        self
    }

    /// Enables stroke reveal on enter.
    #[must_use]
    pub fn with_reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }

    /// Bounding box in scene coordinates (after the transform, if any).
    pub fn bounds(&self) -> Rect {
        let b = self.shape.bounds();
        match self.transform {
            Some(t) => t.transform_rect_bbox(b),
            None => b,
        }
    }

    /// Returns `true` if `other` draws the same thing.
    ///
    /// Transition settings are ignored: re-rendering with a different duration alone is not a
    /// visual change.
    pub fn same_visual(&self, other: &Self) -> bool {
        self.class == other.class
            && self.label == other.label
            && self.z_index == other.z_index
            && self.shape == other.shape
            && self.fill == other.fill
            && self.stroke == other.stroke
            && self.stroke_width == other.stroke_width
            && self.transform == other.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compose_path_segments() {
        let key = MarkKey::new("point").with("Y").with(3);
        assert_eq!(key.as_str(), "point/Y/3");
        assert!(MarkKey::new("a/1") < MarkKey::new("a/2"));
    }

    #[test]
    fn line_stroke_length_matches_euclidean_distance() {
        let shape = Shape::Line(Line::new((0.0, 0.0), (3.0, 4.0)));
        assert!((shape.stroke_length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn transformed_bounds_follow_transform() {
        let mark = Mark::new(
            MarkKey::new("c"),
            "dot",
            Shape::Circle(Circle::new((0.0, 0.0), 1.0)),
        )
        .with_transform(Affine::translate((10.0, 20.0)) * Affine::scale(2.0));
        let b = mark.bounds();
        assert!((b.x0 - 8.0).abs() < 1e-9);
        assert!((b.y1 - 22.0).abs() < 1e-9);
    }

    #[test]
    fn same_visual_ignores_transition() {
        let a = Mark::new(MarkKey::new("r"), "r", Shape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let b = a.clone().with_transition(Some(Duration::from_millis(10)));
        assert!(a.same_visual(&b));
        let c = a.clone().with_z_index(3);
        assert!(!a.same_visual(&c));
    }
}
