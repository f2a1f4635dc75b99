// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset records.
//!
//! Records are opaque field maps. Charts never look inside them directly; series descriptors
//! extract values through their accessor closures.

use chrono::{DateTime, Utc};
use hashbrown::HashMap;

/// A single field value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Missing or explicitly empty.
    #[default]
    Null,
    /// A number.
    Number(f64),
    /// A point in time (UTC).
    Date(DateTime<Utc>),
    /// Free text.
    Text(String),
    /// A boolean.
    Bool(bool),
}

impl Value {
    /// Returns the number, if this is a finite [`Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Returns the date, if this is a [`Value::Date`].
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the text, if this is a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Position on a continuous axis: numbers as-is, dates as epoch milliseconds.
    pub fn as_position(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            Self::Date(d) => Some(d.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Date(_) => "date",
            Self::Text(_) => "text",
            Self::Bool(_) => "boolean",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One dataset row: a mapping from field name to [`Value`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a field, or [`Value::Null`] if absent.
    pub fn get(&self, field: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.fields.get(field).unwrap_or(NULL)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn missing_fields_read_as_null() {
        let r = Record::new().with("x", 1.0);
        assert_eq!(r.get("x"), &Value::Number(1.0));
        assert!(r.get("nope").is_null());
    }

    #[test]
    fn dates_position_as_epoch_millis() {
        let d = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let v = Value::from(d);
        assert_eq!(v.as_position(), Some(d.timestamp_millis() as f64));
        assert_eq!(v.as_f64(), None);
    }

    #[test]
    fn non_finite_numbers_are_not_positions() {
        assert_eq!(Value::Number(f64::NAN).as_position(), None);
        assert_eq!(Value::from("7").as_position(), None);
    }
}
