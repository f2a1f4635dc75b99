// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series descriptors: how to extract and style one data dimension.

use core::fmt;
use std::sync::Arc;

use peniko::Color;

use crate::data::{Record, Value};

/// Extracts a value from a record.
pub type Extractor = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Per-record numeric override (e.g. a point radius).
pub type NumberOverride = Arc<dyn Fn(&Record) -> Option<f64> + Send + Sync>;

/// Per-record text override (e.g. icon path data).
pub type TextOverride = Arc<dyn Fn(&Record) -> Option<String> + Send + Sync>;

/// Category-10 palette used when a descriptor has no explicit color.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgba8(0x1f, 0x77, 0xb4, 0xff),
    Color::from_rgba8(0xff, 0x7f, 0x0e, 0xff),
    Color::from_rgba8(0x2c, 0xa0, 0x2c, 0xff),
    Color::from_rgba8(0xd6, 0x27, 0x28, 0xff),
    Color::from_rgba8(0x94, 0x67, 0xbd, 0xff),
    Color::from_rgba8(0x8c, 0x56, 0x4b, 0xff),
    Color::from_rgba8(0xe3, 0x77, 0xc2, 0xff),
    Color::from_rgba8(0x7f, 0x7f, 0x7f, 0xff),
    Color::from_rgba8(0xbc, 0xbd, 0x22, 0xff),
    Color::from_rgba8(0x17, 0xbe, 0xcf, 0xff),
];

/// Describes how to extract and style one data dimension.
#[derive(Clone)]
pub struct SeriesDescriptor {
    /// Value accessor.
    pub field: Extractor,
    /// Display label; also the key for this series' rendered elements.
    pub label: String,
    /// Series color.
    pub color: Option<Color>,
    /// Point radius (scatter charts).
    pub radius: Option<f64>,
    /// Icon as SVG path data, centered on the origin (custom scatter charts).
    pub icon: Option<String>,
    /// Uniform icon scale factor (custom scatter charts).
    pub size: Option<f64>,
    /// Per-record radius override.
    pub radius_override: Option<NumberOverride>,
    /// Per-record icon override.
    pub icon_override: Option<TextOverride>,
}

impl fmt::Debug for SeriesDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesDescriptor")
            .field("label", &self.label)
            .field("color", &self.color)
            .field("radius", &self.radius)
            .field("icon", &self.icon)
            .field("size", &self.size)
            .field("radius_override", &self.radius_override.is_some())
            .field("icon_override", &self.icon_override.is_some())
            .finish_non_exhaustive()
    }
}

impl SeriesDescriptor {
    /// Creates a descriptor from an accessor closure.
    pub fn new(
        label: impl Into<String>,
        field: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            field: Arc::new(field),
            label: label.into(),
            color: None,
            radius: None,
            icon: None,
            size: None,
            radius_override: None,
            icon_override: None,
        }
    }

    /// Creates a descriptor reading the named record field.
    pub fn field(name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(label, move |r| r.get(&name).clone())
    }

    /// Sets the series color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the point radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the icon (SVG path data centered on the origin).
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the icon scale factor.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets a per-record radius override.
    #[must_use]
    pub fn with_radius_override(
        mut self,
        f: impl Fn(&Record) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.radius_override = Some(Arc::new(f));
        self
    }

    /// Sets a per-record icon override.
    #[must_use]
    pub fn with_icon_override(
        mut self,
        f: impl Fn(&Record) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.icon_override = Some(Arc::new(f));
        self
    }

    /// Extracts this descriptor's value from `record`.
    pub fn extract(&self, record: &Record) -> Value {
        (self.field)(record)
    }

    /// Returns the configured color, or the palette color for series `index`.
    pub fn color_or_default(&self, index: usize) -> Color {
        self.color.unwrap_or(CATEGORY10[index % CATEGORY10.len()])
    }
}

/// The x descriptor plus one or more y descriptors.
#[derive(Clone, Debug, Default)]
pub struct SeriesConfig {
    /// Horizontal dimension.
    pub x: Option<SeriesDescriptor>,
    /// Vertical dimensions, one series each.
    pub y: Vec<SeriesDescriptor>,
}

impl SeriesConfig {
    /// Creates a config with an x descriptor and y descriptors.
    pub fn new(x: SeriesDescriptor, y: impl IntoIterator<Item = SeriesDescriptor>) -> Self {
        Self {
            x: Some(x),
            y: y.into_iter().collect(),
        }
    }

    /// Sets the x descriptor.
    #[must_use]
    pub fn with_x(mut self, x: SeriesDescriptor) -> Self {
        self.x = Some(x);
        self
    }

    /// Appends a y descriptor.
    #[must_use]
    pub fn with_y(mut self, y: SeriesDescriptor) -> Self {
        self.y.push(y);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_descriptor_reads_named_field() {
        let d = SeriesDescriptor::field("y", "Y");
        let r = Record::new().with("y", 4.0);
        assert_eq!(d.extract(&r), Value::Number(4.0));
        assert_eq!(d.label, "Y");
    }

    #[test]
    fn default_colors_cycle_through_palette() {
        let d = SeriesDescriptor::field("y", "Y");
        assert_eq!(d.color_or_default(0), CATEGORY10[0]);
        assert_eq!(d.color_or_default(11), CATEGORY10[1]);
        let red = Color::from_rgba8(255, 0, 0, 255);
        assert_eq!(d.with_color(red).color_or_default(3), red);
    }
}
