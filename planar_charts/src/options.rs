// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart options.
//!
//! Options are plain data with builder helpers. They also (de)serialize, so hosts can keep chart
//! configuration in JSON; missing fields take their defaults.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Space reserved around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margin {
    /// Creates a margin box.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on every side.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }

    /// A tighter preset that leaves room for a right-hand legend.
    pub const fn compact() -> Self {
        Self::new(20.0, 40.0, 25.0, 25.0)
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(30.0)
    }
}

/// Options shared by every chart variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    /// Margin box around the plot area.
    pub margin: Margin,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between tick end and tick label.
    pub tick_padding: f64,
    /// Approximate number of ticks per axis.
    pub tick_count: usize,
    /// Skips transitions and cursor tracking.
    pub is_chart_static: bool,
    /// Duration of animated transitions.
    #[serde(rename = "transitionMs", with = "duration_ms")]
    pub transition: Duration,
    /// Draw line series as smooth curves (line and time charts only).
    pub curve: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            tick_size: 6.0,
            tick_padding: 3.0,
            tick_count: 10,
            is_chart_static: false,
            transition: Duration::from_millis(750),
            curve: false,
        }
    }
}

impl ChartOptions {
    /// Sets the margin box.
    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets tick size and padding.
    #[must_use]
    pub fn with_ticks(mut self, tick_size: f64, tick_padding: f64) -> Self {
        self.tick_size = tick_size;
        self.tick_padding = tick_padding;
        self
    }

    /// Sets the approximate tick count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Enables or disables static mode.
    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_chart_static = is_static;
        self
    }

    /// Sets the transition duration.
    #[must_use]
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Enables or disables curved lines.
    #[must_use]
    pub fn with_curve(mut self, curve: bool) -> Self {
        self.curve = curve;
        self
    }

    /// Transition to attach to marks: `None` when static.
    pub fn transition(&self) -> Option<Duration> {
        (!self.is_chart_static).then_some(self.transition)
    }
}

mod duration_ms {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"isChartStatic": true, "transitionMs": 200, "margin": {"left": 50}}"#;
        let opts: ChartOptions = serde_json::from_str(json).unwrap();
        assert!(opts.is_chart_static);
        assert_eq!(opts.transition, Duration::from_millis(200));
        assert_eq!(opts.margin.left, 50.0);
        assert_eq!(opts.margin.top, 30.0);
        assert_eq!(opts.tick_size, 6.0);
        assert_eq!(opts.transition(), None);
    }

    #[test]
    fn serializes_duration_as_millis() {
        let json = serde_json::to_value(ChartOptions::default()).unwrap();
        assert_eq!(json["transitionMs"].as_u64(), Some(750));
        assert_eq!(json["tickPadding"].as_f64(), Some(3.0));
    }
}
