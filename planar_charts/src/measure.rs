// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for legend and label placement.
//!
//! Charts never shape text themselves; they only need rough extents to place legends against
//! the right edge. Callers with a real shaping backend can plug it in through [`TextMeasurer`].

/// A minimal text measurement interface.
pub trait TextMeasurer {
    /// Returns `(width, height)` in surface pixels.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A heuristic measurer assuming an average glyph width of ~0.6em and a height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}
