// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path helpers for point-like marks.

use kurbo::{BezPath, Circle, Point, Shape};

/// Axis-aligned square of side `size` centered at `center`.
pub(crate) fn square_path(center: Point, size: f64) -> BezPath {
    let half = size * 0.5;
    let mut p = BezPath::new();
    p.move_to((center.x - half, center.y - half));
    p.line_to((center.x + half, center.y - half));
    p.line_to((center.x + half, center.y + half));
    p.line_to((center.x - half, center.y + half));
    p.close_path();
    p
}

/// Circle outline as a path, for places that need path data rather than a circle primitive.
pub(crate) fn circle_path(center: Point, radius: f64) -> BezPath {
    // Screen-space tolerance; these are drawn at 1:1 or small icon scales.
    let tolerance = 0.1;
    Circle::new(center, radius).path_elements(tolerance).collect()
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    #[test]
    fn paths_fit_their_size() {
        let sq = square_path(Point::new(10.0, 10.0), 4.0).bounding_box();
        assert_eq!(sq, Rect::new(8.0, 8.0, 12.0, 12.0));
        let c = circle_path(Point::new(10.0, 10.0), 2.0).bounding_box();
        assert!((c.width() - 4.0).abs() < 1e-6, "{c:?}");
        assert!((c.center().x - 10.0).abs() < 1e-9, "{c:?}");
    }
}
