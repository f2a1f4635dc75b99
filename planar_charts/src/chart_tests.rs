// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{TimeZone, Utc};
use kurbo::{Circle, Point};
use peniko::color::palette::css;
use planar_core::{Mark, MarkKey, Shape, Surface};

use crate::{
    CURSOR_SCOPE, ChartError, ChartOptions, CustomScatterChart, LegendPosition, LineChart, Record,
    Renderable, SCATTER_SCOPE, ScaleKind, ScatterChart, SeriesConfig, SeriesDescriptor, TimeChart,
};

fn xy(points: &[(f64, f64)]) -> Vec<Record> {
    points
        .iter()
        .map(|&(x, y)| Record::new().with("x", x).with("y", y))
        .collect()
}

fn config() -> SeriesConfig {
    SeriesConfig::new(
        SeriesDescriptor::field("x", "X"),
        [SeriesDescriptor::new("Y", |r| r.get("y").clone())],
    )
}

fn assert_point_close(a: Point, b: Point) {
    let eps = 1e-9;
    assert!((a.x - b.x).abs() <= eps, "x {a:?} != {b:?}");
    assert!((a.y - b.y).abs() <= eps, "y {a:?} != {b:?}");
}

fn render_everything(chart: &impl Renderable, surface: &mut Surface) {
    chart.render_series(surface);
    chart.render_x_axis(surface, None).unwrap();
    chart.render_y_axis(surface, None).unwrap();
    chart.render_x_grid_lines(surface);
    chart.render_y_grid_lines(surface);
    chart.render_legend(surface, None, LegendPosition::default());
    chart.render_chart_title(surface, "Title");
    chart.render_x_axis_label(surface, "x");
    chart.render_y_axis_label(surface, "y");
}

#[test]
fn numeric_x_domain_is_niced_outward() {
    let surface = Surface::new(500.0, 300.0);
    let data = xy(&[(0.3, 1.0), (7.2, 2.0), (9.7, 3.0)]);
    let chart = LineChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    let (d0, d1) = chart.plane().x_scale().domain();
    assert!(d0 <= 0.3 && d1 >= 9.7, "domain {d0}..{d1} must contain the data");
    assert_eq!((d0, d1), (0.0, 10.0));
}

#[test]
fn date_x_gives_a_time_scale() {
    let surface = Surface::new(500.0, 300.0);
    let data: Vec<Record> = (1..=3)
        .map(|d| {
            Record::new()
                .with("x", Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap())
                .with("y", f64::from(d))
        })
        .collect();
    let chart = TimeChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    assert_eq!(chart.plane().scales().x_kind, ScaleKind::Time);
}

#[test]
fn repeated_renders_do_not_duplicate_elements() {
    let mut surface = Surface::new(500.0, 300.0);
    let data = xy(&[(1.0, 2.0), (2.0, 3.0), (3.0, 5.0)]);
    let chart = LineChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    render_everything(&chart, &mut surface);
    let once = surface.len();
    for _ in 0..3 {
        render_everything(&chart, &mut surface);
    }
    assert_eq!(surface.len(), once);
    assert!(chart.render_series(&mut surface).is_empty());
}

#[test]
fn caller_children_survive_rendering() {
    let mut surface = Surface::new(500.0, 300.0);
    let backdrop = Mark::new(
        MarkKey::new("backdrop"),
        "caller-owned",
        Shape::Circle(Circle::new((10.0, 10.0), 3.0)),
    )
    .with_fill(css::BLACK);
    surface.insert(backdrop.clone());

    let data = xy(&[(1.0, 2.0), (2.0, 3.0)]);
    let mut chart = ScatterChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    render_everything(&chart, &mut surface);
    chart.replace_data(&xy(&[(1.0, 4.0)]));
    chart.render_series(&mut surface);

    let kept = surface.get(&MarkKey::new("backdrop")).unwrap();
    assert_eq!(kept.mark, backdrop);
    assert_eq!(kept.scope, None);
}

#[test]
fn scatter_places_one_point_per_record() {
    let mut surface = Surface::new(400.0, 300.0);
    let data = xy(&[(1.0, 2.0), (2.0, 3.0), (3.0, 5.0), (4.0, 4.0)]);
    let chart = ScatterChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    chart.render_series(&mut surface);

    assert_eq!(surface.select(SCATTER_SCOPE).len(), 4);
    let (xs, ys) = (chart.plane().x_scale(), chart.plane().y_scale());
    for (i, (x, y)) in [(1.0, 2.0), (2.0, 3.0), (3.0, 5.0), (4.0, 4.0)].into_iter().enumerate() {
        let e = surface.get(&MarkKey::new("point/Y").with(i)).unwrap();
        let Shape::Circle(c) = &e.mark.shape else {
            panic!("scatter points are circles");
        };
        assert_point_close(c.center, Point::new(xs.map(x), ys.map(y)));
    }
}

#[test]
fn empty_dataset_is_rejected_by_every_variant() {
    let surface = Surface::new(400.0, 300.0);
    let opts = ChartOptions::default;
    assert_eq!(
        LineChart::new(&surface, &[], config(), opts()).unwrap_err(),
        ChartError::EmptyDataset
    );
    assert_eq!(
        TimeChart::new(&surface, &[], config(), opts()).unwrap_err(),
        ChartError::EmptyDataset
    );
    assert_eq!(
        ScatterChart::new(&surface, &[], config(), opts()).unwrap_err(),
        ChartError::EmptyDataset
    );
    assert_eq!(
        CustomScatterChart::new(&surface, &[], config(), opts()).unwrap_err(),
        ChartError::EmptyDataset
    );
}

#[test]
fn missing_descriptors_and_bad_x_types_are_rejected() {
    let surface = Surface::new(400.0, 300.0);
    let data = xy(&[(1.0, 2.0)]);
    let no_y = SeriesConfig::default().with_x(SeriesDescriptor::field("x", "X"));
    assert_eq!(
        LineChart::new(&surface, &data, no_y, ChartOptions::default()).unwrap_err(),
        ChartError::MissingYSeries
    );
    let no_x = SeriesConfig::default().with_y(SeriesDescriptor::field("y", "Y"));
    assert_eq!(
        LineChart::new(&surface, &data, no_x, ChartOptions::default()).unwrap_err(),
        ChartError::MissingXSeries
    );
    let text_x = vec![Record::new().with("x", "a").with("y", 1.0)];
    assert!(matches!(
        LineChart::new(&surface, &text_x, config(), ChartOptions::default()),
        Err(ChartError::UnsupportedXType { found: "text", .. })
    ));
}

#[test]
fn cursor_selects_the_nearest_record() {
    let mut surface = Surface::new(400.0, 300.0);
    let data = xy(&[(0.0, 0.0), (10.0, 10.0)]);
    let chart = LineChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    chart.render_cursor(&mut surface);

    let (xs, ys) = (chart.plane().x_scale(), chart.plane().y_scale());
    let near_ten = xs.map(7.0);
    assert_eq!(chart.plane().nearest_index(near_ten), Some(1));
    surface.pointer_move(Point::new(near_ten, 150.0));

    let marker = surface.get(&MarkKey::new("cursor/marker/Y")).unwrap();
    let Shape::Circle(c) = &marker.mark.shape else {
        panic!("cursor markers are circles");
    };
    assert_point_close(c.center, Point::new(xs.map(10.0), ys.map(10.0)));

    surface.pointer_leave();
    assert!(surface.select(CURSOR_SCOPE).is_empty());
}

#[test]
fn static_charts_attach_no_cursor() {
    let mut surface = Surface::new(400.0, 300.0);
    let data = xy(&[(0.0, 0.0), (10.0, 10.0)]);
    let opts = ChartOptions::default().with_static(true);
    let line = LineChart::new(&surface, &data, config(), opts).unwrap();
    line.render_cursor(&mut surface);
    let time = TimeChart::new(&surface, &data, config(), opts).unwrap();
    time.render_cursor(&mut surface);

    assert_eq!(surface.listener_count(), 0);
    surface.pointer_move(Point::new(200.0, 150.0));
    assert!(surface.is_empty());
}

#[test]
fn rendered_chart_serializes_to_svg() {
    let mut surface = Surface::new(400.0, 300.0);
    let data = xy(&[(1.0, 2.0), (2.0, 3.0), (3.0, 5.0)]);
    let chart = LineChart::new(
        &surface,
        &data,
        config(),
        ChartOptions::default().with_static(true),
    )
    .unwrap();
    render_everything(&chart, &mut surface);
    let svg = surface.to_svg();
    assert!(svg.starts_with("<svg"), "{svg}");
    assert!(svg.contains("class=\"line-series\""), "{svg}");
    assert!(svg.contains("data-label=\"Y\""), "{svg}");
    assert!(svg.contains(">Title</text>"), "{svg}");
}

#[test]
fn x_grid_is_horizontal_and_y_grid_is_vertical() {
    let mut surface = Surface::new(400.0, 300.0);
    let data = xy(&[(0.0, 0.0), (10.0, 100.0)]);
    let chart = LineChart::new(&surface, &data, config(), ChartOptions::default()).unwrap();
    chart.render_x_grid_lines(&mut surface);
    chart.render_y_grid_lines(&mut surface);
    let plot = chart.plane().plot_rect();
    let ys = chart.plane().y_scale();

    let x_grid = surface.select("x-grid");
    assert!(!x_grid.is_empty());
    for e in &x_grid {
        let Shape::Line(l) = &e.mark.shape else {
            panic!("gridlines are lines");
        };
        assert_eq!(l.p0.y, l.p1.y, "x gridlines are horizontal");
        assert_eq!((l.p0.x.min(l.p1.x), l.p0.x.max(l.p1.x)), (plot.x0, plot.x1));
    }
    let first = surface.get(&MarkKey::new("x-grid").with(0.0)).unwrap();
    assert_eq!(first.mark.bounds().y0, ys.map(0.0));

    for e in surface.select("y-grid") {
        let Shape::Line(l) = &e.mark.shape else {
            panic!("gridlines are lines");
        };
        assert_eq!(l.p0.x, l.p1.x, "y gridlines are vertical");
        assert_eq!((l.p0.y.min(l.p1.y), l.p0.y.max(l.p1.y)), (plot.y0, plot.y1));
    }
}

#[test]
fn repeated_series_labels_are_rejected() {
    let surface = Surface::new(400.0, 300.0);
    let data = xy(&[(1.0, 2.0)]);
    let series = SeriesConfig::new(
        SeriesDescriptor::field("x", "X"),
        [
            SeriesDescriptor::field("y", "Y"),
            SeriesDescriptor::field("x", "Y"),
        ],
    );
    assert_eq!(
        ScatterChart::new(&surface, &data, series, ChartOptions::default()).unwrap_err(),
        ChartError::DuplicateSeriesLabel {
            label: "Y".to_owned()
        }
    );
}

#[test]
fn series_named_guide_keeps_its_cursor_marker() {
    let mut surface = Surface::new(400.0, 300.0);
    let data = xy(&[(0.0, 0.0), (10.0, 10.0)]);
    let series = SeriesConfig::new(
        SeriesDescriptor::field("x", "X"),
        [SeriesDescriptor::field("y", "guide")],
    );
    let chart = LineChart::new(&surface, &data, series, ChartOptions::default()).unwrap();
    chart.render_cursor(&mut surface);
    surface.pointer_move(Point::new(chart.plane().x_scale().map(9.0), 150.0));

    let guide = surface.get(&MarkKey::new("cursor/guide")).unwrap();
    assert!(matches!(guide.mark.shape, Shape::Line(_)));
    let marker = surface.get(&MarkKey::new("cursor/marker/guide")).unwrap();
    assert!(matches!(marker.mark.shape, Shape::Circle(_)));
    assert_eq!(surface.select(CURSOR_SCOPE).len(), 2);
}
