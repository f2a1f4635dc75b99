// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aware time ticks and time label formatting.
//!
//! Timestamps are UTC epoch milliseconds held as `f64`, the same representation a time scale
//! maps. Tick intervals snap to calendar boundaries (whole minutes, midnight, Sundays, the first
//! of a month, January 1st) rather than to multiples of a fixed duration.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Timelike, Utc, Weekday};

use crate::error::{ChartError, ChartResult};
use crate::scale;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const MONTH: f64 = DAY * 30.0;
const YEAR: f64 = DAY * 365.0;

const MAX_TICKS: usize = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn millis(self) -> f64 {
        match self {
            Self::Second => SECOND,
            Self::Minute => MINUTE,
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Week => WEEK,
            Self::Month => MONTH,
            Self::Year => YEAR,
        }
    }
}

/// A calendar interval: `step` whole units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TimeInterval {
    unit: Unit,
    step: u32,
}

const fn iv(unit: Unit, step: u32) -> TimeInterval {
    TimeInterval { unit, step }
}

/// Candidate intervals, ascending by approximate duration.
const INTERVALS: [TimeInterval; 17] = [
    iv(Unit::Second, 1),
    iv(Unit::Second, 5),
    iv(Unit::Second, 15),
    iv(Unit::Second, 30),
    iv(Unit::Minute, 1),
    iv(Unit::Minute, 5),
    iv(Unit::Minute, 15),
    iv(Unit::Minute, 30),
    iv(Unit::Hour, 1),
    iv(Unit::Hour, 3),
    iv(Unit::Hour, 6),
    iv(Unit::Hour, 12),
    iv(Unit::Day, 1),
    iv(Unit::Day, 2),
    iv(Unit::Week, 1),
    iv(Unit::Month, 1),
    iv(Unit::Month, 3),
];

impl TimeInterval {
    fn approx_millis(self) -> f64 {
        self.unit.millis() * f64::from(self.step)
    }

    /// Rounds `t` down to the interval boundary at or before it.
    fn floor(self, t: f64) -> Option<f64> {
        match self.unit {
            Unit::Second | Unit::Minute | Unit::Hour => {
                let size = self.approx_millis();
                Some((t / size).floor() * size)
            }
            Unit::Day | Unit::Week | Unit::Month | Unit::Year => {
                let date = to_datetime(t)?.date_naive();
                let floored = match self.unit {
                    Unit::Day => {
                        date.checked_sub_days(Days::new(u64::from(date.day0() % self.step)))?
                    }
                    Unit::Week => date.checked_sub_days(Days::new(u64::from(
                        date.weekday().num_days_from_sunday(),
                    )))?,
                    Unit::Month => {
                        let month0 = date.month0() - date.month0() % self.step;
                        NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1)?
                    }
                    _ => {
                        let step = i32::try_from(self.step).ok()?;
                        NaiveDate::from_ymd_opt(date.year() - date.year().rem_euclid(step), 1, 1)?
                    }
                };
                Some(midnight_millis(floored))
            }
        }
    }

    /// Advances a boundary by one interval. The result may need flooring again, e.g. when a
    /// two-day step crosses the end of a month.
    fn offset(self, t: f64) -> Option<f64> {
        match self.unit {
            Unit::Second | Unit::Minute | Unit::Hour => Some(t + self.approx_millis()),
            Unit::Day | Unit::Week | Unit::Month | Unit::Year => {
                let date = to_datetime(t)?.date_naive();
                let next = match self.unit {
                    Unit::Day => date.checked_add_days(Days::new(u64::from(self.step)))?,
                    Unit::Week => date.checked_add_days(Days::new(7 * u64::from(self.step)))?,
                    Unit::Month => date.checked_add_months(Months::new(self.step))?,
                    _ => date.checked_add_months(Months::new(self.step.checked_mul(12)?))?,
                };
                Some(midnight_millis(next))
            }
        }
    }

    /// Rounds `t` up to the interval boundary at or after it.
    fn ceil(self, t: f64) -> Option<f64> {
        let f = self.floor(t)?;
        if f >= t {
            return Some(f);
        }
        self.floor(self.offset(f)?)
    }

    /// Every boundary in `[lo, hi]`.
    fn range(self, lo: f64, hi: f64) -> Vec<f64> {
        let mut out = Vec::new();
        let mut t = self.ceil(lo);
        while let Some(v) = t {
            if v > hi || out.len() >= MAX_TICKS {
                break;
            }
            out.push(v);
            t = self.offset(v).and_then(|n| self.floor(n)).filter(|n| *n > v);
        }
        out
    }
}

/// Picks the interval whose duration best matches `(hi - lo) / count`.
///
/// `None` means the span is below a second and plain linear ticks over milliseconds apply.
fn tick_interval(lo: f64, hi: f64, count: usize) -> Option<TimeInterval> {
    let target = (hi - lo).abs() / count.max(1) as f64;
    let i = INTERVALS.partition_point(|c| c.approx_millis() <= target);
    if i == INTERVALS.len() {
        let years = scale::nice_step(target / YEAR).max(1.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "year steps are small positive integers"
        )]
        let step = years.min(f64::from(u16::MAX)) as u32;
        return Some(iv(Unit::Year, step.max(1)));
    }
    if i == 0 {
        return None;
    }
    let (left, right) = (INTERVALS[i - 1], INTERVALS[i]);
    if target / left.approx_millis() < right.approx_millis() / target {
        Some(left)
    } else {
        Some(right)
    }
}

/// Calendar-aligned ticks inside `[d0, d1]` (either order), roughly `count` of them.
pub fn time_ticks(d0: f64, d1: f64, count: usize) -> Vec<f64> {
    if count == 0 || !d0.is_finite() || !d1.is_finite() {
        return Vec::new();
    }
    if d0 == d1 {
        return vec![d0];
    }
    let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
    let mut ticks = match tick_interval(lo, hi, count) {
        Some(interval) => interval.range(lo, hi),
        None => scale::ScaleLinear::new((lo, hi), (0.0, 1.0)).ticks(count),
    };
    if d0 > d1 {
        ticks.reverse();
    }
    ticks
}

/// Widens `[d0, d1]` outward to calendar boundaries.
pub fn nice_time_domain(d0: f64, d1: f64, count: usize) -> (f64, f64) {
    if count == 0 || d0 == d1 || !d0.is_finite() || !d1.is_finite() {
        return (d0, d1);
    }
    let (lo, hi) = if d0 < d1 { (d0, d1) } else { (d1, d0) };
    let (lo, hi) = match tick_interval(lo, hi, count) {
        Some(interval) => (
            interval.floor(lo).unwrap_or(lo),
            interval.ceil(hi).unwrap_or(hi),
        ),
        None => scale::nice_domain((lo, hi), count),
    };
    if d0 > d1 { (hi, lo) } else { (lo, hi) }
}

/// Converts epoch milliseconds into a UTC date time.
pub(crate) fn to_datetime(t: f64) -> Option<DateTime<Utc>> {
    if !t.is_finite() {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite; out-of-range values saturate and are rejected by chrono"
    )]
    let ms = t.round() as i64;
    DateTime::from_timestamp_millis(ms)
}

fn midnight_millis(date: NaiveDate) -> f64 {
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp_millis() as f64
}

/// A validated strftime format code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeFormat {
    code: String,
}

impl TimeFormat {
    /// Parses and validates a strftime code (e.g. `"%b %d"`).
    pub fn parse(code: &str) -> ChartResult<Self> {
        if StrftimeItems::new(code).any(|item| matches!(item, Item::Error)) {
            return Err(ChartError::InvalidTimeFormat {
                code: code.to_owned(),
            });
        }
        Ok(Self {
            code: code.to_owned(),
        })
    }

    /// Formats epoch milliseconds. Returns an empty string for unrepresentable instants.
    pub fn format(&self, t: f64) -> String {
        to_datetime(t)
            .map(|dt| dt.format(&self.code).to_string())
            .unwrap_or_default()
    }
}

/// Labels a tick by its coarsest non-zero calendar field: `"2024"`, `"March"`, `"Mar 03"`,
/// `"Tue 05"`, `"03 PM"`, `"03:30"`, `":45"` or `".250"`.
pub fn default_time_label(t: f64) -> String {
    let Some(dt) = to_datetime(t) else {
        return String::new();
    };
    let code = if dt.nanosecond() != 0 {
        ".%3f"
    } else if dt.second() != 0 {
        ":%S"
    } else if dt.minute() != 0 {
        "%I:%M"
    } else if dt.hour() != 0 {
        "%I %p"
    } else if dt.day() != 1 {
        if dt.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if dt.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    dt.format(code).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> f64 {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_millis() as f64
    }

    #[test]
    fn one_day_gets_three_hour_ticks() {
        let ticks = time_ticks(ms(2024, 1, 1, 0, 0, 0), ms(2024, 1, 2, 0, 0, 0), 10);
        assert_eq!(ticks.len(), 9, "00:00 through 24:00 every 3h");
        for t in ticks {
            assert_eq!(to_datetime(t).unwrap().hour() % 3, 0, "tick {t} not on 3h");
        }
    }

    #[test]
    fn week_ticks_fall_on_sundays() {
        let ticks = time_ticks(ms(2024, 1, 1, 0, 0, 0), ms(2024, 3, 1, 0, 0, 0), 10);
        assert!(!ticks.is_empty(), "expected week ticks");
        assert_eq!(ticks[0], ms(2024, 1, 7, 0, 0, 0));
        for t in ticks {
            assert_eq!(to_datetime(t).unwrap().weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn month_ticks_fall_on_the_first() {
        let ticks = time_ticks(ms(2024, 1, 15, 0, 0, 0), ms(2024, 12, 20, 0, 0, 0), 10);
        assert_eq!(ticks.len(), 11, "Feb 1 through Dec 1");
        for t in ticks {
            assert_eq!(to_datetime(t).unwrap().day(), 1);
        }
    }

    #[test]
    fn decades_use_multi_year_steps() {
        let ticks = time_ticks(ms(1990, 6, 1, 0, 0, 0), ms(2030, 6, 1, 0, 0, 0), 5);
        let years: Vec<i32> = ticks.iter().map(|t| to_datetime(*t).unwrap().year()).collect();
        assert_eq!(years, vec![2000, 2010, 2020, 2030]);
    }

    #[test]
    fn nice_time_domain_widens_to_boundaries() {
        let (start, end) = (ms(2024, 1, 1, 5, 13, 0), ms(2024, 1, 1, 22, 40, 0));
        let (d0, d1) = nice_time_domain(start, end, 10);
        assert!(d0 <= start && d1 >= end, "nice must widen outward");
        assert_eq!(to_datetime(d0).unwrap().minute(), 0);
        assert_eq!(to_datetime(d1).unwrap().minute(), 0);
    }

    #[test]
    fn default_labels_pick_the_coarsest_field() {
        assert_eq!(default_time_label(ms(2024, 1, 1, 0, 0, 0)), "2024");
        assert_eq!(default_time_label(ms(2024, 3, 1, 0, 0, 0)), "March");
        assert_eq!(default_time_label(ms(2024, 3, 3, 0, 0, 0)), "Mar 03");
        assert_eq!(default_time_label(ms(2024, 3, 5, 0, 0, 0)), "Tue 05");
        assert_eq!(default_time_label(ms(2024, 3, 5, 15, 0, 0)), "03 PM");
        assert_eq!(default_time_label(ms(2024, 3, 5, 15, 30, 0)), "03:30");
        assert_eq!(default_time_label(ms(2024, 3, 5, 15, 30, 45)), ":45");
        assert_eq!(default_time_label(ms(2024, 3, 5, 15, 30, 45) + 250.0), ".250");
    }

    #[test]
    fn strftime_codes_are_validated() {
        let f = TimeFormat::parse("%Y-%m").unwrap();
        assert_eq!(f.format(ms(2024, 3, 5, 0, 0, 0)), "2024-03");
        assert_eq!(
            TimeFormat::parse("%J"),
            Err(ChartError::InvalidTimeFormat {
                code: "%J".to_owned()
            })
        );
    }
}
