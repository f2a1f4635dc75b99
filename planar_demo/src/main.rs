// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders one chart of each Planar variant to SVG.
//!
//! Usage: `planar_demo [OUT_DIR]` (defaults to the current directory).

use std::path::{Path, PathBuf};

use chrono::{Days, TimeZone, Utc};
use kurbo::Point;
use peniko::color::palette::css;
use planar_charts::{
    ChartOptions, ChartResult, CustomScatterChart, LegendPosition, LineChart, Margin, Record,
    Renderable, ScatterChart, SeriesConfig, SeriesDescriptor, TimeChart,
};
use planar_core::Surface;
use tracing::info;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 360.0;

const STAR: &str = "M0 -6 L1.8 -1.9 L6 -1.9 L2.6 0.8 L3.9 5 L0 2.5 L-3.9 5 L-2.6 0.8 L-6 -1.9 L-1.8 -1.9 Z";

fn main() {
    let _ = planar_charts::telemetry::init_default_tracing();
    let out = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let charts: [(&str, fn() -> ChartResult<Surface>); 4] = [
        ("line_chart.svg", line_demo),
        ("time_chart.svg", time_demo),
        ("scatter_chart.svg", scatter_demo),
        ("custom_scatter_chart.svg", custom_scatter_demo),
    ];
    for (name, build) in charts {
        let surface = build().expect("demo data is valid");
        write_svg(&out, name, &surface);
    }
}

fn write_svg(dir: &Path, name: &str, surface: &Surface) {
    let path = dir.join(name);
    std::fs::write(&path, surface.to_svg()).expect("write svg");
    info!(path = %path.display(), elements = surface.len(), "wrote chart");
    println!("wrote {}", path.display());
}

fn decorate(chart: &impl Renderable, surface: &mut Surface, title: &str) -> ChartResult<()> {
    chart.render_y_grid_lines(surface);
    chart.render_y_axis(surface, None)?;
    chart.render_legend(surface, None, LegendPosition::default());
    chart.render_chart_title(surface, title);
    Ok(())
}

fn line_demo() -> ChartResult<Surface> {
    let data: Vec<Record> = (0..=20)
        .map(|i| {
            let x = f64::from(i) * 0.5;
            Record::new()
                .with("x", x)
                .with("sin", x.sin() * 10.0)
                .with("cos", x.cos() * 8.0)
        })
        .collect();
    let mut surface = Surface::new(WIDTH, HEIGHT);
    let chart = LineChart::new(
        &surface,
        &data,
        SeriesConfig::new(
            SeriesDescriptor::field("x", "x"),
            [
                SeriesDescriptor::field("sin", "10 sin x"),
                SeriesDescriptor::field("cos", "8 cos x").with_color(css::CRIMSON),
            ],
        ),
        ChartOptions::default().with_curve(true),
    )?;
    chart.render_series(&mut surface);
    chart.render_x_axis(&mut surface, Some(".1f"))?;
    chart.render_x_grid_lines(&mut surface);
    chart.render_x_axis_label(&mut surface, "x");
    chart.render_y_axis_label(&mut surface, "value");
    decorate(&chart, &mut surface, "Waves")?;

    // Sweep the pointer across the plot; the last position stays drawn.
    chart.render_cursor(&mut surface);
    let plot = chart.plane().plot_rect();
    for step in 0..=10 {
        let x = plot.x0 + plot.width() * f64::from(step) / 10.0;
        surface.pointer_move(Point::new(x, plot.center().y));
    }
    Ok(surface)
}

fn time_demo() -> ChartResult<Surface> {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid start date");
    let data: Vec<Record> = (0..28_u32)
        .filter_map(|d| {
            let day = start.checked_add_days(Days::new(u64::from(d)))?;
            let t = f64::from(d);
            Some(
                Record::new()
                    .with("date", day)
                    .with("high", 12.0 + 4.0 * (t / 4.0).sin())
                    .with("low", 3.0 + 3.0 * (t / 5.0).cos()),
            )
        })
        .collect();
    let mut surface = Surface::new(WIDTH, HEIGHT);
    let chart = TimeChart::new(
        &surface,
        &data,
        SeriesConfig::new(
            SeriesDescriptor::field("date", "Date"),
            [
                SeriesDescriptor::field("high", "High"),
                SeriesDescriptor::field("low", "Low"),
            ],
        ),
        ChartOptions::default()
            .with_margin(Margin::compact())
            .with_static(true),
    )?;
    chart.render_series(&mut surface);
    chart.render_x_axis(&mut surface, Some("%b %d"))?;
    decorate(&chart, &mut surface, "March temperatures")?;
    Ok(surface)
}

fn scatter_demo() -> ChartResult<Surface> {
    let data: Vec<Record> = [(1.0, 2.0, 3.0), (2.0, 3.0, 6.0), (3.0, 5.0, 4.0), (4.0, 4.0, 8.0)]
        .into_iter()
        .map(|(x, y, w)| Record::new().with("x", x).with("y", y).with("w", w))
        .collect();
    let mut surface = Surface::new(WIDTH, HEIGHT);
    let chart = ScatterChart::new(
        &surface,
        &data,
        SeriesConfig::new(
            SeriesDescriptor::field("x", "X"),
            [SeriesDescriptor::field("y", "Y")
                .with_radius(5.0)
                .with_radius_override(|r| r.get("w").as_f64())],
        ),
        ChartOptions::default(),
    )?;
    chart.render_series(&mut surface);
    chart.render_x_axis(&mut surface, Some("d"))?;
    decorate(&chart, &mut surface, "Weighted points")?;
    Ok(surface)
}

fn custom_scatter_demo() -> ChartResult<Surface> {
    let data: Vec<Record> = (0..12)
        .map(|i| {
            let x = f64::from(i);
            Record::new()
                .with("x", x)
                .with("a", (x * 7.0) % 11.0)
                .with("b", (x * 5.0) % 9.0 + 1.0)
        })
        .collect();
    let mut surface = Surface::new(WIDTH, HEIGHT);
    let chart = CustomScatterChart::new(
        &surface,
        &data,
        SeriesConfig::new(
            SeriesDescriptor::field("x", "X"),
            [
                SeriesDescriptor::field("a", "Stars")
                    .with_icon(STAR)
                    .with_size(1.5)
                    .with_color(css::GOLDENROD),
                SeriesDescriptor::field("b", "Dots").with_radius(3.0),
            ],
        ),
        ChartOptions::default().with_static(true),
    )?;
    chart.render_series(&mut surface);
    chart.render_x_axis(&mut surface, None)?;
    chart.render_x_axis_label(&mut surface, "index");
    decorate(&chart, &mut surface, "Icons")?;
    Ok(surface)
}
