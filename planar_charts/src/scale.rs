// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales.
//!
//! A scale maps a data domain into a pixel range. Both kinds here support outward "nicing":
//! the domain is widened to the nearest tick boundaries, never narrowed.

use crate::time;

/// Which kind of continuous scale a dimension uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Plain numbers.
    Linear,
    /// Timestamps (UTC epoch milliseconds).
    Time,
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(px),
            Self::Time(s) => s.invert(px),
        }
    }

    /// Returns tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the distance between consecutive ticks (best effort).
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(&self.ticks(count))
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain,
            Self::Time(s) => s.inner.domain,
        }
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range,
            Self::Time(s) => s.inner.range,
        }
    }

    /// Returns the scale kind.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps every value to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.5 * (r0 + r1);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        d0 + (px - r0) / denom * (d1 - d0)
    }

    /// Returns the domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns "nice" tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns a copy with the domain widened outward to tick boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        Self {
            domain: nice_domain(self.domain, count),
            range: self.range,
        }
    }
}

/// A time scale over UTC epoch milliseconds.
///
/// Mapping is linear; ticks and nicing follow calendar intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp (ms) into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back into a timestamp (ms).
    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }

    /// Returns the domain (ms).
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain
    }

    /// Returns calendar-aligned tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        time::time_ticks(self.inner.domain.0, self.inner.domain.1, count)
    }

    /// Returns a copy with the domain widened outward to calendar boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (d0, d1) = self.inner.domain;
        Self {
            inner: ScaleLinear::new(time::nice_time_domain(d0, d1, count), self.inner.range),
        }
    }
}

/// Infers a `(min, max)` domain from values.
///
/// Non-finite values are ignored. Returns `None` if no finite values are present.
pub fn infer_domain(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Widens `domain` outward until both ends sit on tick boundaries.
pub(crate) fn nice_domain(domain: (f64, f64), count: usize) -> (f64, f64) {
    let (mut d0, mut d1) = domain;
    let reversed = d1 < d0;
    if reversed {
        core::mem::swap(&mut d0, &mut d1);
    }
    if count == 0 || d0 == d1 || !d0.is_finite() || !d1.is_finite() {
        return domain;
    }
    let mut prev_step = f64::NAN;
    // Nicing can change the step; settle within a few rounds.
    for _ in 0..10 {
        let step = nice_step((d1 - d0) / count as f64);
        if step == 0.0 || step == prev_step {
            break;
        }
        d0 = (d0 / step).floor() * step;
        d1 = (d1 / step).ceil() * step;
        prev_step = step;
    }
    if reversed { (d1, d0) } else { (d0, d1) }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    // Work in integer multiples of the step so ticks don't accumulate rounding error.
    // `+ 0.0` folds a negative zero start into positive zero.
    let i0 = (min / step - 1e-9).ceil() + 0.0;
    let i1 = (max / step + 1e-9).floor();
    let n_f = i1 - i0;
    if !n_f.is_finite() || n_f < 0.0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/non-negative checks and capped at 10k"
    )]
    let n = n_f.min(10_000.0) as u64;
    let inv = if step < 1.0 { (1.0 / step).round() } else { 0.0 };
    (0..=n)
        .map(|i| {
            let k = i0 + i as f64;
            if inv > 0.0 { k / inv } else { k * step }
        })
        .collect()
}

pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

pub(crate) fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints_and_inverts() {
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert!((s.invert(s.map(7.0)) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn continuous_scale_reports_kind_and_inverts() {
        let linear = ScaleContinuous::Linear(ScaleLinear::new((0.0, 10.0), (0.0, 200.0)));
        assert_eq!(linear.kind(), ScaleKind::Linear);
        assert_eq!(linear.invert(50.0), 2.5);

        let day = 86_400_000.0;
        let time = ScaleContinuous::Time(ScaleTime::new((0.0, 4.0 * day), (0.0, 400.0)));
        assert_eq!(time.kind(), ScaleKind::Time);
        assert_eq!(time.invert(100.0), day);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let s = ScaleLinear::new((3.0, 3.0), (0.0, 100.0));
        assert_eq!(s.map(3.0), 50.0);
    }

    #[test]
    fn nice_widens_outward_never_inward() {
        let s = ScaleLinear::new((0.7, 9.3), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 10.0));

        let s = ScaleLinear::new((1.0, 4.0), (0.0, 1.0)).nice(10);
        let (d0, d1) = s.domain();
        assert!(d0 <= 1.0 && d1 >= 4.0);

        let s = ScaleLinear::new((-13.0, 187.0), (0.0, 1.0)).nice(5);
        assert_eq!(s.domain(), (-50.0, 200.0));
    }

    #[test]
    fn ticks_stay_inside_domain_without_float_drift() {
        let ticks = nice_ticks(0.0, 1.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        let ticks = nice_ticks(0.5, 9.5, 5);
        assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn infer_domain_skips_non_finite() {
        assert_eq!(infer_domain([3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(infer_domain([f64::NAN]), None);
    }
}
