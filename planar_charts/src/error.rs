// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Result alias for chart construction and rendering.
pub type ChartResult<T> = Result<T, ChartError>;

/// Errors raised while building or rendering a chart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// The dataset has no records.
    #[error("dataset is empty")]
    EmptyDataset,

    /// No x series descriptor was configured.
    #[error("missing x series descriptor")]
    MissingXSeries,

    /// No y series descriptors were configured.
    #[error("missing y series descriptors")]
    MissingYSeries,

    /// Two y descriptors share a label; labels key every series element.
    #[error("y series label `{label}` is used more than once")]
    DuplicateSeriesLabel {
        /// The repeated label.
        label: String,
    },

    /// No record produced a defined x value.
    #[error("x series `{label}` yields no defined values")]
    UndefinedX {
        /// Label of the x descriptor.
        label: String,
    },

    /// The first defined x value is neither a number nor a date.
    #[error("x series `{label}` yields {found} values; expected numbers or dates")]
    UnsupportedXType {
        /// Label of the x descriptor.
        label: String,
        /// Name of the offending value type.
        found: &'static str,
    },

    /// No y descriptor produced a finite number.
    #[error("y series yield no numeric values")]
    NoNumericY,

    /// A descriptor icon is not valid SVG path data.
    #[error("icon for series `{label}` is not valid SVG path data: {reason}")]
    InvalidIcon {
        /// Label of the descriptor.
        label: String,
        /// Parser message.
        reason: String,
    },

    /// A numeric format code could not be parsed.
    #[error("invalid number format `{code}`: {reason}")]
    InvalidFormat {
        /// The format code.
        code: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A time format code could not be parsed.
    #[error("invalid time format `{code}`")]
    InvalidTimeFormat {
        /// The format code.
        code: String,
    },
}
