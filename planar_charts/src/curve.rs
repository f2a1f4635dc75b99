// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line interpolation.

use kurbo::{BezPath, Point};

/// How consecutive points of a line series are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Straight segments.
    #[default]
    Linear,
    /// A uniform Catmull-Rom spline through every point, emitted as cubic Béziers.
    CatmullRom,
}

impl Interpolation {
    /// Picks the interpolation for the `curve` chart option.
    pub fn from_curve_flag(curve: bool) -> Self {
        if curve { Self::CatmullRom } else { Self::Linear }
    }

    /// Builds a path through `points`. Fewer than two points yield a path with at most a
    /// single `moveto`.
    pub fn path(self, points: &[Point]) -> BezPath {
        let mut path = BezPath::new();
        let Some((&first, rest)) = points.split_first() else {
            return path;
        };
        path.move_to(first);
        match self {
            Self::Linear => {
                for &p in rest {
                    path.line_to(p);
                }
            }
            Self::CatmullRom => {
                // Endpoints are duplicated so the curve starts and ends on the data.
                for i in 0..points.len() - 1 {
                    let p0 = points[i.saturating_sub(1)];
                    let p1 = points[i];
                    let p2 = points[i + 1];
                    let p3 = points[(i + 2).min(points.len() - 1)];
                    let c1 = p1 + (p2 - p0) / 6.0;
                    let c2 = p2 - (p3 - p1) / 6.0;
                    path.curve_to(c1, c2, p2);
                }
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;

    #[test]
    fn linear_path_visits_every_point() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
        let path = Interpolation::Linear.path(&pts);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(pts[0]),
                PathEl::LineTo(pts[1]),
                PathEl::LineTo(pts[2]),
            ]
        );
    }

    #[test]
    fn catmull_rom_passes_through_points() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 3.0),
        ];
        let path = Interpolation::CatmullRom.path(&pts);
        let ends: Vec<Point> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::CurveTo(_, _, p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(ends, pts.to_vec());
    }

    #[test]
    fn empty_and_single_point() {
        assert!(Interpolation::CatmullRom.path(&[]).elements().is_empty());
        assert_eq!(
            Interpolation::CatmullRom
                .path(&[Point::new(1.0, 1.0)])
                .elements()
                .len(),
            1
        );
    }
}
