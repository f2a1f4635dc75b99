// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric tick label formatting.
//!
//! Format codes follow a small subset of the familiar `d3-format` grammar:
//!
//! ```text
//! [,][.precision][~][type]
//! ```
//!
//! - `,` groups thousands.
//! - `.precision` sets decimals (`f`, `%`), or significant digits (`s`, `e` mantissa decimals).
//! - `~` trims insignificant trailing zeros.
//! - `type` is one of `f` (fixed), `d` (integer), `e` (exponent), `%` (percent), `s` (SI prefix).
//!   With no type the value is printed as-is, or fixed when a precision is given.

use crate::error::{ChartError, ChartResult};

/// Presentation type of a [`NumberFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberKind {
    /// Shortest round-tripping representation.
    Plain,
    /// Fixed-point.
    Fixed,
    /// Rounded integer.
    Integer,
    /// Exponent notation (`1.5e+3`).
    Exponent,
    /// Multiplied by 100 with a `%` suffix.
    Percent,
    /// SI prefix (`1.5k`, `20µ`).
    Si,
}

/// A parsed numeric format code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Group thousands with `,`.
    pub group: bool,
    /// Decimal places or significant digits, depending on the kind.
    pub precision: Option<usize>,
    /// Trim trailing zeros.
    pub trim: bool,
    /// Presentation type.
    pub kind: NumberKind,
}

const DEFAULT_PRECISION: usize = 6;
const MAX_PRECISION: usize = 20;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

impl NumberFormat {
    /// Parses a format code.
    pub fn parse(code: &str) -> ChartResult<Self> {
        let invalid = |reason: &'static str| ChartError::InvalidFormat {
            code: code.to_owned(),
            reason,
        };

        let mut rest = code;
        let group = match rest.strip_prefix(',') {
            Some(r) => {
                rest = r;
                true
            }
            None => false,
        };
        let precision = match rest.strip_prefix('.') {
            Some(r) => {
                let len = r.bytes().take_while(u8::is_ascii_digit).count();
                if len == 0 {
                    return Err(invalid("missing precision after '.'"));
                }
                let p: usize = r[..len]
                    .parse()
                    .map_err(|_| invalid("precision out of range"))?;
                if p > MAX_PRECISION {
                    return Err(invalid("precision out of range"));
                }
                rest = &r[len..];
                Some(p)
            }
            None => None,
        };
        let trim = match rest.strip_prefix('~') {
            Some(r) => {
                rest = r;
                true
            }
            None => false,
        };
        let kind = match rest {
            "" if precision.is_some() => NumberKind::Fixed,
            "" => NumberKind::Plain,
            "f" => NumberKind::Fixed,
            "d" => NumberKind::Integer,
            "e" => NumberKind::Exponent,
            "%" => NumberKind::Percent,
            "s" => NumberKind::Si,
            _ => return Err(invalid("unknown format type")),
        };
        Ok(Self {
            group,
            precision,
            trim,
            kind,
        })
    }

    /// Default tick label format for ticks spaced `step` apart: just enough decimals to tell
    /// neighbors apart, thousands grouped.
    pub fn for_step(step: f64) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to the supported precision range"
        )]
        let decimals = if step.is_finite() && step > 0.0 {
            (-step.log10().floor()).clamp(0.0, MAX_PRECISION as f64) as usize
        } else {
            0
        };
        Self {
            group: true,
            precision: Some(decimals),
            trim: false,
            kind: NumberKind::Fixed,
        }
    }

    /// Formats a value.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        // Negative zero would print as "-0".
        let value = value + 0.0;
        let (mut number, suffix) = match self.kind {
            NumberKind::Plain => (value.to_string(), String::new()),
            NumberKind::Fixed => (
                fixed(value, self.precision.unwrap_or(DEFAULT_PRECISION)),
                String::new(),
            ),
            NumberKind::Integer => (fixed(value.round() + 0.0, 0), String::new()),
            NumberKind::Percent => (
                fixed(value * 100.0, self.precision.unwrap_or(DEFAULT_PRECISION)),
                "%".to_owned(),
            ),
            NumberKind::Exponent => {
                let p = self.precision.unwrap_or(DEFAULT_PRECISION);
                let s = format!("{value:.p$e}");
                match s.split_once('e') {
                    Some((mantissa, exp)) => {
                        let exp = if exp.starts_with('-') {
                            format!("e{exp}")
                        } else {
                            format!("e+{exp}")
                        };
                        (mantissa.to_owned(), exp)
                    }
                    None => (s, String::new()),
                }
            }
            NumberKind::Si => si(value, self.precision.unwrap_or(DEFAULT_PRECISION)),
        };
        if self.trim {
            number = trim_zeros(&number);
        }
        if self.group {
            number = group_thousands(&number);
        }
        number.push_str(&suffix);
        number
    }
}

fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    // Rounding can produce "-0.00".
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_owned()
    } else {
        s
    }
}

fn si(value: f64, significant: usize) -> (String, String) {
    let significant = significant.max(1);
    if value == 0.0 {
        return (fixed(0.0, significant - 1), String::new());
    }
    let exp10 = value.abs().log10().floor();
    let group = (exp10 / 3.0).floor().clamp(-8.0, 8.0);
    let scaled = value / 10_f64.powf(group * 3.0);
    let int_digits = scaled.abs().log10().floor().max(0.0) + 1.0;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "small non-negative digit counts"
    )]
    let decimals = (significant as f64 - int_digits).max(0.0) as usize;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "group is clamped to [-8, 8]"
    )]
    let prefix = SI_PREFIXES[(group + 8.0) as usize];
    (fixed(scaled, decimals), prefix.to_owned())
}

fn trim_zeros(number: &str) -> String {
    if !number.contains('.') {
        return number.to_owned();
    }
    number
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let int_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, rest) = unsigned.split_at(int_len);
    let mut out = String::with_capacity(number.len() + int_len / 3);
    out.push_str(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(code: &str, v: f64) -> String {
        NumberFormat::parse(code).unwrap().format(v)
    }

    #[test]
    fn fixed_with_grouping() {
        assert_eq!(fmt(",.2f", 1234.5), "1,234.50");
        assert_eq!(fmt(",.0f", -1_234_567.0), "-1,234,567");
        assert_eq!(fmt(".1f", -0.01), "0.0");
    }

    #[test]
    fn integer_percent_and_exponent() {
        assert_eq!(fmt("d", 3.7), "4");
        assert_eq!(fmt(".0%", 0.123), "12%");
        assert_eq!(fmt(".2e", 1500.0), "1.50e+3");
        assert_eq!(fmt(".1e", 0.0025), "2.5e-3");
    }

    #[test]
    fn si_prefixes() {
        assert_eq!(fmt(".3s", 1500.0), "1.50k");
        assert_eq!(fmt("~s", 1500.0), "1.5k");
        assert_eq!(fmt(".2s", 0.00042), "420\u{b5}");
        assert_eq!(fmt(".2s", 42.0), "42");
    }

    #[test]
    fn plain_and_trimmed() {
        assert_eq!(fmt("", 2.5), "2.5");
        assert_eq!(fmt(".3~f", 2.500), "2.5");
        assert_eq!(fmt(".3~f", 2.0), "2");
    }

    #[test]
    fn invalid_codes_are_rejected() {
        for code in ["x", ".f", "..2f", ".2q", ",,"] {
            assert!(
                matches!(
                    NumberFormat::parse(code),
                    Err(ChartError::InvalidFormat { .. })
                ),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn step_precision() {
        assert_eq!(NumberFormat::for_step(0.1).format(0.1 + 0.2), "0.3");
        assert_eq!(NumberFormat::for_step(1000.0).format(12_000.0), "12,000");
        assert_eq!(NumberFormat::for_step(0.05).format(0.15), "0.15");
        assert_eq!(NumberFormat::for_step(1.0).format(-0.0), "0");
    }
}
