// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter charts drawing an SVG-path icon per point.

use kurbo::{Affine, BezPath, Point};
use planar_core::{Mark, MarkDiff, MarkKey, Shape, Surface};
use tracing::warn;

use crate::chart::Renderable;
use crate::data::Record;
use crate::error::{ChartError, ChartResult};
use crate::options::ChartOptions;
use crate::plane::CartesianPlane;
use crate::scatter_chart::radius_for;
use crate::series::{SeriesConfig, SeriesDescriptor};
use crate::symbol::circle_path;
use crate::z_order;

/// Join scope of icon points.
pub const ICON_SCOPE: &str = "icon-series";

/// A scatter chart whose points are arbitrary path icons.
///
/// Icons are SVG path data centered on the origin. Each point is placed with
/// `translate(x, y) * scale(size)`, where `size` is the descriptor's size factor (default 1).
/// Series without an icon draw a circle path following the scatter radius rules.
#[derive(Debug)]
pub struct CustomScatterChart {
    plane: CartesianPlane,
    /// Parsed descriptor icons, one slot per y series.
    icons: Vec<Option<BezPath>>,
}

impl CustomScatterChart {
    /// Validates the inputs, parses descriptor icons, and derives scales from the surface size.
    ///
    /// Returns [`ChartError::InvalidIcon`] if a descriptor icon is not valid path data.
    pub fn new(
        surface: &Surface,
        data: &[Record],
        series: SeriesConfig,
        options: ChartOptions,
    ) -> ChartResult<Self> {
        let plane = CartesianPlane::new(surface, data, series, options)?;
        let icons = plane
            .y_series()
            .iter()
            .map(|y| {
                y.icon
                    .as_deref()
                    .map(|d| {
                        BezPath::from_svg(d).map_err(|e| ChartError::InvalidIcon {
                            label: y.label.clone(),
                            reason: e.to_string(),
                        })
                    })
                    .transpose()
            })
            .collect::<ChartResult<_>>()?;
        Ok(Self { plane, icons })
    }

    fn icon_for(&self, y: &SeriesDescriptor, icon: Option<&BezPath>, record: &Record) -> BezPath {
        if let Some(d) = y.icon_override.as_ref().and_then(|f| f(record)) {
            match BezPath::from_svg(&d) {
                Ok(path) => return path,
                Err(e) => {
                    warn!(series = %y.label, error = %e, "invalid icon override; drawing a circle");
                    return circle_path(Point::ZERO, radius_for(y, record));
                }
            }
        }
        match icon {
            Some(path) => path.clone(),
            None => circle_path(Point::ZERO, radius_for(y, record)),
        }
    }
}

impl Renderable for CustomScatterChart {
    fn plane(&self) -> &CartesianPlane {
        &self.plane
    }

    fn plane_mut(&mut self) -> &mut CartesianPlane {
        &mut self.plane
    }

    fn render_series(&self, surface: &mut Surface) -> Vec<MarkDiff> {
        let transition = self.plane.options().transition();
        let root = MarkKey::new("icon");
        let mut marks = Vec::new();
        for (i, (y, icon)) in self.plane.y_series().iter().zip(&self.icons).enumerate() {
            let color = y.color_or_default(i);
            let scale = y.size.unwrap_or(1.0);
            for (index, p) in self.plane.points(y) {
                let record = &self.plane.data()[index];
                let path = self.icon_for(y, icon.as_ref(), record);
                marks.push(
                    Mark::new(root.with(&y.label).with(index), "scatter-icon", Shape::Path(path))
                        .with_label(y.label.clone())
                        .with_fill(color)
                        .with_transform(Affine::translate(p.to_vec2()) * Affine::scale(scale))
                        .with_z_index(z_order::SERIES_POINTS)
                        .with_transition(transition),
                );
            }
        }
        surface.join(ICON_SCOPE, marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAMOND: &str = "M0 -5 L5 0 L0 5 L-5 0 Z";

    fn config(y: SeriesDescriptor) -> SeriesConfig {
        SeriesConfig::new(SeriesDescriptor::field("x", "X"), [y])
    }

    fn data() -> Vec<Record> {
        vec![
            Record::new().with("x", 0).with("y", 0),
            Record::new().with("x", 10).with("y", 10),
        ]
    }

    #[test]
    fn invalid_descriptor_icon_fails_construction() {
        let surface = Surface::new(200.0, 200.0);
        let err = CustomScatterChart::new(
            &surface,
            &data(),
            config(SeriesDescriptor::field("y", "Y").with_icon("M 0 0 Q")),
            ChartOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InvalidIcon { ref label, .. } if label == "Y"));
    }

    #[test]
    fn icons_are_translated_then_scaled() {
        let mut surface = Surface::new(200.0, 200.0);
        let chart = CustomScatterChart::new(
            &surface,
            &data(),
            config(
                SeriesDescriptor::field("y", "Y")
                    .with_icon(DIAMOND)
                    .with_size(2.0),
            ),
            ChartOptions::default().with_static(true),
        )
        .unwrap();
        chart.render_series(&mut surface);
        let e = surface.get(&MarkKey::new("icon/Y/1")).unwrap();
        let p = chart.plane().point(&data()[1], &chart.plane().y_series()[0]).unwrap();
        let b = e.mark.bounds();
        assert!((b.center().x - p.x).abs() < 1e-9, "icon centered on the point");
        assert!((b.width() - 20.0).abs() < 1e-9, "diamond width scaled by 2");
        assert_eq!(e.mark.class, "scatter-icon");
    }

    #[test]
    fn missing_icon_and_bad_override_fall_back_to_circles() {
        let mut surface = Surface::new(200.0, 200.0);
        let chart = CustomScatterChart::new(
            &surface,
            &data(),
            config(
                SeriesDescriptor::field("y", "Y")
                    .with_radius(3.0)
                    .with_icon_override(|r| {
                        (r.get("x").as_f64() == Some(10.0)).then(|| "nope".to_owned())
                    }),
            ),
            ChartOptions::default().with_static(true),
        )
        .unwrap();
        chart.render_series(&mut surface);
        for key in ["icon/Y/0", "icon/Y/1"] {
            let b = surface.get(&MarkKey::new(key)).unwrap().mark.bounds();
            assert!((b.width() - 6.0).abs() < 0.05, "{key} is a radius-3 circle");
        }
        assert_eq!(chart.render_series(&mut surface), Vec::new());
    }
}
