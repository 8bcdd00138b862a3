use std::collections::BTreeSet;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};

/// One series cell inside a row. Both fields may be absent in sparse data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A raw report row: a date plus one cell per series key.
///
/// Serialized flat, e.g. `{"date": "2021-01-01", "orders": {"value": 3}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: String,
    #[serde(flatten)]
    pub values: IndexMap<String, SeriesValue>,
}

impl SeriesRow {
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(
            key.into(),
            SeriesValue {
                value: Some(value),
                label: None,
            },
        );
        self
    }

    #[must_use]
    pub fn with_labeled_value(
        mut self,
        key: impl Into<String>,
        value: f64,
        label: impl Into<String>,
    ) -> Self {
        self.values.insert(
            key.into(),
            SeriesValue {
                value: Some(value),
                label: Some(label.into()),
            },
        );
        self
    }

    /// Value for `key`, `0.0` when the cell or its value is missing.
    #[must_use]
    pub fn value(&self, key: &str) -> f64 {
        self.values
            .get(key)
            .and_then(|cell| cell.value)
            .unwrap_or(0.0)
    }

    /// Label for `key`, empty when missing.
    #[must_use]
    pub fn label(&self, key: &str) -> &str {
        self.values
            .get(key)
            .and_then(|cell| cell.label.as_deref())
            .unwrap_or("")
    }
}

/// Series identifier with its rendering flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedKey {
    pub key: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub focus: bool,
}

fn default_true() -> bool {
    true
}

impl OrderedKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            visible: true,
            focus: false,
        }
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineValue {
    pub date: String,
    pub value: f64,
    pub label: String,
}

/// Per-series values in row order, used by line rendering and scale fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDatum {
    pub key: String,
    pub visible: bool,
    pub focus: bool,
    pub values: Vec<LineValue>,
}

/// Parses row date strings with a strftime-style pattern into UTC instants.
///
/// Patterns carrying an offset (`%z`) are converted to UTC; patterns without a
/// time component resolve to midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    pattern: String,
}

impl DateParser {
    pub fn new(pattern: impl Into<String>) -> ChartResult<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(ChartError::Configuration(
                "date parser pattern must not be empty".to_owned(),
            ));
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ChartError::Configuration(format!(
                "invalid date parser pattern `{pattern}`"
            )));
        }
        Ok(Self { pattern })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parses `value`; `row` only feeds the error report.
    pub fn parse(&self, row: usize, value: &str) -> ChartResult<DateTime<Utc>> {
        if let Ok(with_offset) = DateTime::parse_from_str(value, &self.pattern) {
            return Ok(with_offset.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, &self.pattern) {
            return Ok(naive.and_utc());
        }
        if let Ok(day) = NaiveDate::parse_from_str(value, &self.pattern) {
            return Ok(day.and_time(NaiveTime::MIN).and_utc());
        }
        Err(ChartError::Parse {
            row,
            value: value.to_owned(),
            pattern: self.pattern.clone(),
        })
    }
}

/// Every series key found across `rows`, in first-seen order.
#[must_use]
pub fn unique_keys(rows: &[SeriesRow]) -> IndexSet<String> {
    rows.iter()
        .flat_map(|row| row.values.keys())
        .cloned()
        .collect()
}

/// Resolves the ordered key list.
///
/// An override keeps its order and flags but loses keys that match no series
/// in `rows`; with no rows it is returned verbatim. Without an override keys
/// keep first-seen order, all visible and none focused.
#[must_use]
pub fn ordered_keys(
    rows: &[SeriesRow],
    unique_keys: &IndexSet<String>,
    overrides: Option<&[OrderedKey]>,
) -> Vec<OrderedKey> {
    let Some(keys) = overrides else {
        return unique_keys.iter().map(OrderedKey::new).collect();
    };
    if rows.is_empty() {
        return keys.to_vec();
    }
    keys.iter()
        .filter(|ordered| {
            let known = unique_keys.contains(&ordered.key);
            if !known {
                warn!(key = %ordered.key, "ordered key matches no series; dropping it");
            }
            known
        })
        .cloned()
        .collect()
}

/// One [`LineDatum`] per ordered key, values in row order.
#[must_use]
pub fn line_data(rows: &[SeriesRow], ordered_keys: &[OrderedKey]) -> Vec<LineDatum> {
    ordered_keys
        .iter()
        .map(|ordered| LineDatum {
            key: ordered.key.clone(),
            visible: ordered.visible,
            focus: ordered.focus,
            values: rows
                .iter()
                .map(|row| LineValue {
                    date: row.date.clone(),
                    value: row.value(&ordered.key),
                    label: row.label(&ordered.key).to_owned(),
                })
                .collect(),
        })
        .collect()
}

/// Distinct parsed dates across all series, ascending.
///
/// Fails on the first unparseable date; nothing is returned in that case.
pub fn unique_dates(
    line_data: &[LineDatum],
    parser: &DateParser,
) -> ChartResult<Vec<DateTime<Utc>>> {
    let mut dates = BTreeSet::new();
    for datum in line_data {
        for (row, value) in datum.values.iter().enumerate() {
            dates.insert(parser.parse(row, &value.date)?);
        }
    }
    Ok(dates.into_iter().collect())
}
