// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-following cursor for line charts.
//!
//! The tracker holds a snapshot of pixel positions, so each pointer move is a single linear scan
//! with no access to the chart. Clones share the snapshot: the chart keeps one handle and
//! refreshes it whenever its data changes, and the surface's listener sees the new positions.

use core::cell::RefCell;
use std::rc::Rc;

use kurbo::{Circle, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use planar_core::{Mark, MarkKey, PointerListener, Shape};
use smallvec::SmallVec;
use tracing::trace;

use crate::plane::CartesianPlane;
use crate::rule_mark::RuleMarkSpec;
use crate::z_order;

/// Join scope of the cursor marks; also the pointer listener name.
pub const CURSOR_SCOPE: &str = "cursor";

const MARKER_RADIUS: f64 = 4.0;

/// Returns the index whose x is nearest `px`, scanning once. The first candidate wins ties.
pub(crate) fn nearest_by_x(
    candidates: impl IntoIterator<Item = (usize, f64)>,
    px: f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, x) in candidates {
        let d = (x - px).abs();
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Clone, Debug)]
struct Sample {
    x: f64,
    ys: SmallVec<[Option<f64>; 4]>,
}

#[derive(Clone, Debug)]
struct Snapshot {
    bounds: Rect,
    samples: Vec<Sample>,
    series: Vec<(String, Color)>,
}

impl Snapshot {
    fn of(plane: &CartesianPlane) -> Self {
        let y_scale = plane.y_scale();
        let samples = plane
            .data()
            .iter()
            .filter_map(|r| {
                let x = plane.x_pixel(r)?;
                let ys = plane
                    .y_series()
                    .iter()
                    .map(|y| y.extract(r).as_f64().map(|v| y_scale.map(v)))
                    .collect();
                Some(Sample { x, ys })
            })
            .collect();
        let series = plane
            .y_series()
            .iter()
            .enumerate()
            .map(|(i, y)| (y.label.clone(), y.color_or_default(i)))
            .collect();
        Self {
            bounds: plane.plot_rect(),
            samples,
            series,
        }
    }

    fn marks_at(&self, sample: &Sample) -> Vec<Mark> {
        let root = MarkKey::new(CURSOR_SCOPE);
        let markers = root.with("marker");
        let mut marks = vec![
            RuleMarkSpec::vertical(
                root.with("guide"),
                "cursor-guide",
                sample.x,
                self.bounds.y0,
                self.bounds.y1,
            )
            .with_stroke(css::GRAY, 1.0)
            .with_z_index(z_order::CURSOR)
            .mark(),
        ];
        for ((label, color), y) in self.series.iter().zip(&sample.ys) {
            let Some(y) = y else {
                continue;
            };
            marks.push(
                Mark::new(
                    markers.with(label),
                    "cursor-marker",
                    Shape::Circle(Circle::new((sample.x, *y), MARKER_RADIUS)),
                )
                .with_label(label.clone())
                .with_fill(*color)
                .with_stroke(css::WHITE, 1.0)
                .with_z_index(z_order::CURSOR),
            );
        }
        marks
    }
}

/// A [`PointerListener`] drawing a vertical guide and one marker per series at the record
/// nearest the pointer.
///
/// Guide key: `cursor/guide`. Marker keys: `cursor/marker/<label>`.
#[derive(Clone, Debug)]
pub struct CursorTracker {
    snapshot: Rc<RefCell<Snapshot>>,
}

impl CursorTracker {
    /// Snapshots the plane's current data and scales.
    pub fn new(plane: &CartesianPlane) -> Self {
        Self {
            snapshot: Rc::new(RefCell::new(Snapshot::of(plane))),
        }
    }

    /// Re-snapshots `plane`; every clone of this tracker sees the new positions.
    pub fn refresh(&self, plane: &CartesianPlane) {
        let snapshot = Snapshot::of(plane);
        trace!(samples = snapshot.samples.len(), "cursor refreshed");
        *self.snapshot.borrow_mut() = snapshot;
    }
}

impl PointerListener for CursorTracker {
    fn scope(&self) -> &str {
        CURSOR_SCOPE
    }

    fn pointer_moved(&mut self, pos: Point) -> Vec<Mark> {
        let s = self.snapshot.borrow();
        if !s.bounds.contains(pos) && !on_max_edge(s.bounds, pos) {
            return Vec::new();
        }
        let Some(i) = nearest_by_x(s.samples.iter().map(|p| p.x).enumerate(), pos.x) else {
            return Vec::new();
        };
        trace!(index = i, x = s.samples[i].x, "cursor hit");
        s.marks_at(&s.samples[i])
    }
}

// `Rect::contains` excludes the right and bottom edges; the cursor includes them.
fn on_max_edge(r: Rect, p: Point) -> bool {
    (p.x == r.x1 && p.y >= r.y0 && p.y <= r.y1) || (p.y == r.y1 && p.x >= r.x0 && p.x <= r.x1)
}
