// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and gridline mark generation.
//!
//! An axis is one keyed group: a domain line plus a tick line and a tick label per tick value.
//! Ticks are keyed by their value, so re-rendering after nothing changed is a no-op and a
//! changed domain only enters/exits the ticks that actually moved in or out.

use core::time::Duration;

use peniko::Brush;
use peniko::color::palette::css;
use planar_core::{Mark, MarkKey, TextAnchor, TextBaseline};

use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleContinuous;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A paint + width pair for stroked rules.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Domain line and tick marks.
    pub rule: StrokeStyle,
    /// Tick label paint.
    pub label_fill: Brush,
    /// Tick label font size.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Which side of the plot an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the plot.
    Bottom,
    /// Vertical axis left of the plot.
    Left,
}

impl AxisOrient {
    /// Join scope (and CSS class) for this axis.
    pub fn axis_scope(self) -> &'static str {
        match self {
            Self::Bottom => "x-axis",
            Self::Left => "y-axis",
        }
    }

    /// Join scope (and CSS class) for gridlines spanning this axis.
    pub fn grid_scope(self) -> &'static str {
        match self {
            Self::Bottom => "x-grid",
            Self::Left => "y-grid",
        }
    }
}

/// An axis specification.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Placement.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length. Ticks point away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Styling.
    pub style: AxisStyle,
    /// Transition applied to changed ticks.
    pub transition: Option<Duration>,
}

impl AxisSpec {
    /// Creates an axis with default styling.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            transition: None,
        }
    }

    /// A bottom axis.
    pub fn bottom() -> Self {
        Self::new(AxisOrient::Bottom)
    }

    /// A left axis.
    pub fn left() -> Self {
        Self::new(AxisOrient::Left)
    }

    /// Sets the approximate tick count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the tick size.
    #[must_use]
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets the tick padding.
    #[must_use]
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Sets the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Option<Duration>) -> Self {
        self.transition = transition;
        self
    }

    /// Join scope for this axis.
    pub fn scope(&self) -> &'static str {
        self.orient.axis_scope()
    }

    /// Generates the axis marks.
    ///
    /// `offset` is the cross-axis pixel position of the axis line (the bottom of the plot for a
    /// bottom axis, its left edge for a left axis). `label` formats one tick value.
    pub fn marks(
        &self,
        scale: &ScaleContinuous,
        offset: f64,
        label: &dyn Fn(f64) -> String,
    ) -> Vec<Mark> {
        let scope = self.scope();
        let root = MarkKey::new(scope);
        let (r0, r1) = scale.range();
        let rule = &self.style.rule;

        let mut marks = Vec::new();
        let domain = match self.orient {
            AxisOrient::Bottom => RuleMarkSpec::horizontal(
                root.with("domain"),
                format!("{scope} domain"),
                offset,
                r0,
                r1,
            ),
            AxisOrient::Left => RuleMarkSpec::vertical(
                root.with("domain"),
                format!("{scope} domain"),
                offset,
                r0,
                r1,
            ),
        };
        marks.push(
            domain
                .with_stroke(rule.brush.clone(), rule.stroke_width)
                .with_z_index(z_order::AXIS_RULES)
                .with_transition(self.transition)
                .mark(),
        );

        let label_gap = self.tick_size + self.tick_padding;
        for v in scale.ticks(self.tick_count) {
            let p = scale.map(v);
            let (tick, text) = match self.orient {
                AxisOrient::Bottom => (
                    RuleMarkSpec::vertical(
                        root.with("tick").with(v),
                        format!("{scope} tick"),
                        p,
                        offset,
                        offset + self.tick_size,
                    ),
                    TextMarkSpec::new(
                        root.with("label").with(v),
                        format!("{scope} tick-label"),
                        (p, offset + label_gap),
                        label(v),
                    )
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Hanging),
                ),
                AxisOrient::Left => (
                    RuleMarkSpec::horizontal(
                        root.with("tick").with(v),
                        format!("{scope} tick"),
                        p,
                        offset - self.tick_size,
                        offset,
                    ),
                    TextMarkSpec::new(
                        root.with("label").with(v),
                        format!("{scope} tick-label"),
                        (offset - label_gap, p),
                        label(v),
                    )
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Middle),
                ),
            };
            marks.push(
                tick.with_stroke(rule.brush.clone(), rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES)
                    .with_transition(self.transition)
                    .mark(),
            );
            marks.push(
                text.with_font_size(self.style.label_font_size)
                    .with_fill(self.style.label_fill.clone())
                    .with_z_index(z_order::AXIS_LABELS)
                    .with_transition(self.transition)
                    .mark(),
            );
        }
        marks
    }
}

/// Gridlines of one axis: one line per tick of the opposite scale, spanning this axis' range.
///
/// The x grid ([`AxisOrient::Bottom`]) is therefore made of horizontal lines at the y ticks,
/// and the y grid of vertical lines at the x ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    /// The axis being gridded.
    pub orient: AxisOrient,
    /// Approximate number of lines.
    pub tick_count: usize,
    /// Styling.
    pub style: GridStyle,
    /// Transition applied to changed lines.
    pub transition: Option<Duration>,
}

impl GridSpec {
    /// Creates a grid with default styling.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_count: 10,
            style: GridStyle::default(),
            transition: None,
        }
    }

    /// Sets the approximate line count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the transition.
    #[must_use]
    pub fn with_transition(mut self, transition: Option<Duration>) -> Self {
        self.transition = transition;
        self
    }

    /// Join scope for these gridlines.
    pub fn scope(&self) -> &'static str {
        self.orient.grid_scope()
    }

    /// Generates one line per tick of `cross`, the opposite scale, spanning `span`: the pixel
    /// range of the gridded axis.
    pub fn marks(&self, cross: &ScaleContinuous, span: (f64, f64)) -> Vec<Mark> {
        let scope = self.scope();
        let root = MarkKey::new(scope);
        let stroke = &self.style.stroke;
        cross
            .ticks(self.tick_count)
            .into_iter()
            .map(|v| {
                let p = cross.map(v);
                let key = root.with(v);
                let class = format!("grid-line {scope}");
                let rule = match self.orient {
                    AxisOrient::Bottom => RuleMarkSpec::horizontal(key, class, p, span.0, span.1),
                    AxisOrient::Left => RuleMarkSpec::vertical(key, class, p, span.0, span.1),
                };
                rule.with_stroke(stroke.brush.clone(), stroke.stroke_width)
                    .with_z_index(z_order::GRID_LINES)
                    .with_transition(self.transition)
                    .mark()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Line;
    use planar_core::Shape;

    use super::*;
    use crate::scale::ScaleLinear;

    fn x_scale() -> ScaleContinuous {
        ScaleContinuous::Linear(ScaleLinear::new((0.0, 10.0), (30.0, 130.0)))
    }

    #[test]
    fn bottom_axis_has_domain_plus_tick_and_label_per_value() {
        let axis = AxisSpec::bottom().with_tick_count(5);
        let marks = axis.marks(&x_scale(), 70.0, &|v| format!("{v}"));
        // Ticks at 0, 2, 4, 6, 8, 10.
        assert_eq!(marks.len(), 1 + 2 * 6);
        assert_eq!(marks[0].key.as_str(), "x-axis/domain");

        let tick = marks
            .iter()
            .find(|m| m.key.as_str() == "x-axis/tick/4")
            .unwrap();
        assert_eq!(
            tick.shape,
            Shape::Line(Line::new((70.0, 70.0), (70.0, 76.0)))
        );
        let label = marks
            .iter()
            .find(|m| m.key.as_str() == "x-axis/label/4")
            .unwrap();
        let Shape::Text(t) = &label.shape else {
            panic!("tick label should be text");
        };
        assert_eq!(t.text, "4");
        assert_eq!(t.pos.y, 79.0);
    }

    #[test]
    fn left_axis_labels_sit_left_of_ticks() {
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 1.0), (100.0, 0.0)));
        let marks = AxisSpec::left()
            .with_tick_count(2)
            .marks(&y, 30.0, &|v| format!("{v}"));
        let label = marks
            .iter()
            .find(|m| m.key.as_str() == "y-axis/label/1")
            .unwrap();
        let Shape::Text(t) = &label.shape else {
            panic!("tick label should be text");
        };
        assert_eq!(t.anchor, TextAnchor::End);
        assert_eq!((t.pos.x, t.pos.y), (21.0, 0.0));
    }

    #[test]
    fn x_gridlines_are_horizontal_at_the_cross_ticks() {
        let y = ScaleContinuous::Linear(ScaleLinear::new((0.0, 10.0), (130.0, 30.0)));
        let grid = GridSpec::new(AxisOrient::Bottom).with_tick_count(5);
        let marks = grid.marks(&y, (30.0, 330.0));
        assert_eq!(marks.len(), 6);
        assert!(marks.iter().all(|m| m.class.contains("grid-line x-grid")));
        assert_eq!(marks[1].key.as_str(), "x-grid/2");
        assert_eq!(
            marks[1].shape,
            Shape::Line(Line::new((30.0, 110.0), (330.0, 110.0)))
        );
    }

    #[test]
    fn y_gridlines_are_vertical_at_the_cross_ticks() {
        let grid = GridSpec::new(AxisOrient::Left)
            .with_tick_count(5)
            .with_style(GridStyle {
                stroke: StrokeStyle::solid(css::RED, 2.0),
            });
        let marks = grid.marks(&x_scale(), (130.0, 30.0));
        assert_eq!(marks[1].key.as_str(), "y-grid/2");
        assert_eq!(
            marks[1].shape,
            Shape::Line(Line::new((50.0, 130.0), (50.0, 30.0)))
        );
        assert_eq!(marks[1].stroke_width, 2.0);
    }
}
