use std::fmt;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};

use super::number_format::NumberFormat;
use crate::error::{ChartError, ChartResult};

pub type FormatFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A formatter given either as a pattern string or as a closure.
///
/// Patterns deserialize from plain strings; closures are code-only and
/// refuse to serialize.
pub enum FormatSpec<T> {
    Pattern(String),
    Custom(FormatFn<T>),
}

impl<T> FormatSpec<T> {
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    #[must_use]
    pub fn custom(format: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(format))
    }
}

impl<T> Clone for FormatSpec<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Pattern(pattern) => Self::Pattern(pattern.clone()),
            Self::Custom(format) => Self::Custom(Arc::clone(format)),
        }
    }
}

impl<T> fmt::Debug for FormatSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T> PartialEq for FormatSpec<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pattern(a), Self::Pattern(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> From<&str> for FormatSpec<T> {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_owned())
    }
}

impl<T> From<String> for FormatSpec<T> {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl<T> Serialize for FormatSpec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Pattern(pattern) => serializer.serialize_str(pattern),
            Self::Custom(_) => Err(S::Error::custom(
                "custom formatter closures cannot be serialized",
            )),
        }
    }
}

impl<'de, T> Deserialize<'de> for FormatSpec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Pattern)
    }
}

/// Resolved formatter; patterns and closures behave the same from here on.
pub struct Formatter<T> {
    format: FormatFn<T>,
}

impl<T> Formatter<T> {
    #[must_use]
    pub fn format(&self, value: &T) -> String {
        (self.format)(value)
    }
}

impl<T> Clone for Formatter<T> {
    fn clone(&self) -> Self {
        Self {
            format: Arc::clone(&self.format),
        }
    }
}

impl<T> fmt::Debug for Formatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

pub type DateFormatter = Formatter<DateTime<Utc>>;
pub type ValueFormatter = Formatter<f64>;

/// Resolves a strftime pattern or closure into a date formatter.
///
/// The empty pattern formats every date as an empty string.
pub fn resolve_date_format(spec: &FormatSpec<DateTime<Utc>>) -> ChartResult<DateFormatter> {
    let format: FormatFn<DateTime<Utc>> = match spec {
        FormatSpec::Custom(format) => Arc::clone(format),
        FormatSpec::Pattern(pattern) => {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(ChartError::Configuration(format!(
                    "invalid date format `{pattern}`"
                )));
            }
            let pattern = pattern.clone();
            Arc::new(move |date: &DateTime<Utc>| date.format(&pattern).to_string())
        }
    };
    Ok(Formatter { format })
}

/// Resolves a number pattern or closure into a value formatter.
pub fn resolve_value_format(spec: &FormatSpec<f64>) -> ChartResult<ValueFormatter> {
    let format: FormatFn<f64> = match spec {
        FormatSpec::Custom(format) => Arc::clone(format),
        FormatSpec::Pattern(pattern) => {
            let number = NumberFormat::parse(pattern)?;
            Arc::new(move |value: &f64| number.format(*value))
        }
    };
    Ok(Formatter { format })
}

/// All formatters a chart pass needs, resolved once per build.
#[derive(Debug, Clone)]
pub struct ChartFormats {
    pub tooltip_label_format: DateFormatter,
    pub tooltip_value_format: ValueFormatter,
    pub x_format: DateFormatter,
    pub x2_format: DateFormatter,
    pub y_format: ValueFormatter,
}
