// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale derivation from a dataset and its series configuration.

use hashbrown::HashSet;
use kurbo::Size;
use tracing::debug;

use crate::data::{Record, Value};
use crate::error::{ChartError, ChartResult};
use crate::options::Margin;
use crate::scale::{ScaleContinuous, ScaleKind, ScaleLinear, ScaleTime, infer_domain};
use crate::series::SeriesConfig;

/// The x and y scales of a Cartesian chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePair {
    /// Horizontal scale: linear or time.
    pub x: ScaleContinuous,
    /// Vertical scale: always linear, inverted so larger values sit higher.
    pub y: ScaleContinuous,
    /// Kind of the horizontal scale.
    pub x_kind: ScaleKind,
}

/// Position of an x value on a scale of `kind`.
///
/// Values of the other kind are ignored; mixing numbers and dates in one series is not
/// supported.
pub(crate) fn x_position(value: &Value, kind: ScaleKind) -> Option<f64> {
    match kind {
        ScaleKind::Linear => value.as_f64(),
        ScaleKind::Time => value.as_date().map(|d| d.timestamp_millis() as f64),
    }
}

/// Validates the inputs and derives niced x/y scales.
///
/// Y descriptor labels must be unique: series marks, legend entries and cursor markers are all
/// keyed by label.
///
/// The x scale kind comes from the first record with a defined (non-null) x value: dates give a
/// time scale, numbers a linear one, anything else is an error. The y domain spans every finite
/// number any y descriptor extracts.
///
/// Ranges are `[margin.left, width - margin.right]` for x and
/// `[height - margin.bottom, margin.top]` for y.
pub fn derive_scales(
    data: &[Record],
    series: &SeriesConfig,
    size: Size,
    margin: &Margin,
    tick_count: usize,
) -> ChartResult<ScalePair> {
    if data.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let Some(x) = series.x.as_ref() else {
        return Err(ChartError::MissingXSeries);
    };
    if series.y.is_empty() {
        return Err(ChartError::MissingYSeries);
    }
    let mut labels = HashSet::new();
    if let Some(y) = series.y.iter().find(|y| !labels.insert(y.label.as_str())) {
        return Err(ChartError::DuplicateSeriesLabel {
            label: y.label.clone(),
        });
    }

    let Some(first) = data.iter().map(|r| x.extract(r)).find(|v| !v.is_null()) else {
        return Err(ChartError::UndefinedX {
            label: x.label.clone(),
        });
    };
    let x_kind = match first {
        Value::Number(_) => ScaleKind::Linear,
        Value::Date(_) => ScaleKind::Time,
        other => {
            return Err(ChartError::UnsupportedXType {
                label: x.label.clone(),
                found: other.type_name(),
            });
        }
    };

    let x_domain = infer_domain(data.iter().filter_map(|r| x_position(&x.extract(r), x_kind)))
        .ok_or_else(|| ChartError::UndefinedX {
            label: x.label.clone(),
        })?;
    let y_domain = infer_domain(
        series
            .y
            .iter()
            .flat_map(|y| data.iter().filter_map(|r| y.extract(r).as_f64())),
    )
    .ok_or(ChartError::NoNumericY)?;

    let x_range = (margin.left, size.width - margin.right);
    let y_range = (size.height - margin.bottom, margin.top);
    let x_scale = match x_kind {
        ScaleKind::Linear => {
            ScaleContinuous::Linear(ScaleLinear::new(x_domain, x_range).nice(tick_count))
        }
        ScaleKind::Time => {
            ScaleContinuous::Time(ScaleTime::new(x_domain, x_range).nice(tick_count))
        }
    };
    let y_scale = ScaleContinuous::Linear(ScaleLinear::new(y_domain, y_range).nice(tick_count));

    debug!(
        records = data.len(),
        y_series = series.y.len(),
        ?x_kind,
        x_domain = ?x_scale.domain(),
        y_domain = ?y_scale.domain(),
        "derived chart scales"
    );

    Ok(ScalePair {
        x: x_scale,
        y: y_scale,
        x_kind,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::series::SeriesDescriptor;

    fn config() -> SeriesConfig {
        SeriesConfig::new(
            SeriesDescriptor::field("x", "X"),
            [SeriesDescriptor::field("y", "Y")],
        )
    }

    fn derive(data: &[Record], series: &SeriesConfig) -> ChartResult<ScalePair> {
        derive_scales(data, series, Size::new(400.0, 300.0), &Margin::default(), 10)
    }

    #[test]
    fn numeric_x_gives_niced_linear_scale() {
        let data: Vec<Record> = [(0.7, 3.0), (9.3, -2.0)]
            .into_iter()
            .map(|(x, y)| Record::new().with("x", x).with("y", y))
            .collect();
        let pair = derive(&data, &config()).unwrap();
        assert_eq!(pair.x_kind, ScaleKind::Linear);
        assert_eq!(pair.x.domain(), (0.0, 10.0));
        assert_eq!(pair.x.range(), (30.0, 370.0));
        assert_eq!(pair.y.range(), (270.0, 30.0));
        assert_eq!(pair.y.domain(), (-2.0, 3.0));
    }

    #[test]
    fn first_defined_date_gives_time_scale() {
        let d0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let d1 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let data = vec![
            Record::new().with("y", 1.0),
            Record::new().with("x", d0).with("y", 2.0),
            Record::new().with("x", d1).with("y", 3.0),
        ];
        let pair = derive(&data, &config()).unwrap();
        assert_eq!(pair.x_kind, ScaleKind::Time);
        let (lo, hi) = pair.x.domain();
        assert!(lo <= d0.timestamp_millis() as f64);
        assert!(hi >= d1.timestamp_millis() as f64);
    }

    #[test]
    fn validation_errors() {
        let rec = Record::new().with("x", 1.0).with("y", 1.0);
        assert_eq!(derive(&[], &config()), Err(ChartError::EmptyDataset));
        assert_eq!(
            derive(&[rec.clone()], &SeriesConfig::default()),
            Err(ChartError::MissingXSeries)
        );
        assert_eq!(
            derive(
                &[rec.clone()],
                &SeriesConfig::default().with_x(SeriesDescriptor::field("x", "X"))
            ),
            Err(ChartError::MissingYSeries)
        );
        assert_eq!(
            derive(
                &[rec.clone()],
                &SeriesConfig::new(
                    SeriesDescriptor::field("x", "X"),
                    [
                        SeriesDescriptor::field("y", "Y"),
                        SeriesDescriptor::field("x", "X"),
                        SeriesDescriptor::field("z", "Y"),
                    ],
                )
            ),
            Err(ChartError::DuplicateSeriesLabel {
                label: "Y".to_owned()
            })
        );
        assert_eq!(
            derive(&[Record::new().with("x", "a").with("y", 1.0)], &config()),
            Err(ChartError::UnsupportedXType {
                label: "X".to_owned(),
                found: "text"
            })
        );
        assert_eq!(
            derive(&[Record::new().with("y", 1.0)], &config()),
            Err(ChartError::UndefinedX {
                label: "X".to_owned()
            })
        );
        assert_eq!(
            derive(&[Record::new().with("x", 1.0).with("y", "n/a")], &config()),
            Err(ChartError::NoNumericY)
        );
    }
}
