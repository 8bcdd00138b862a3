use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scale::TimeScale;
use crate::core::series::{DateParser, OrderedKey, SeriesRow};
use crate::error::ChartResult;

/// One visible series value at a date space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSpaceValue {
    pub key: String,
    pub value: f64,
    pub label: String,
    pub focus: bool,
}

/// Horizontal hover band owned by one date on a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSpace {
    pub date: DateTime<Utc>,
    pub start: f64,
    pub width: f64,
    pub values: Vec<DateSpaceValue>,
}

/// Tiles `[0, width]` into one band per date.
///
/// Band edges sit halfway between neighbouring points; the outer bands
/// extend to the plot edges. A single date owns the full width. Each band
/// carries the values of visible series only.
pub fn date_spaces(
    rows: &[SeriesRow],
    unique_dates: &[DateTime<Utc>],
    ordered_keys: &[OrderedKey],
    width: f64,
    x_line_scale: TimeScale,
    parser: &DateParser,
) -> ChartResult<Vec<DateSpace>> {
    let mut rows_by_date = HashMap::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        rows_by_date
            .entry(parser.parse(index, &row.date)?)
            .or_insert(row);
    }

    let positions: Vec<f64> = unique_dates
        .iter()
        .map(|date| x_line_scale.map(*date))
        .collect();
    let last = positions.len().saturating_sub(1);

    let spaces = unique_dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let (start, end) = if positions.len() <= 1 {
                (0.0, width)
            } else {
                let start = if index == 0 {
                    0.0
                } else {
                    (positions[index - 1] + positions[index]) / 2.0
                };
                let end = if index == last {
                    width
                } else {
                    (positions[index] + positions[index + 1]) / 2.0
                };
                (start, end)
            };

            let row = rows_by_date.get(date);
            let values = ordered_keys
                .iter()
                .filter(|ordered| ordered.visible)
                .map(|ordered| DateSpaceValue {
                    key: ordered.key.clone(),
                    value: row.map_or(0.0, |row| row.value(&ordered.key)),
                    label: row.map_or("", |row| row.label(&ordered.key)).to_owned(),
                    focus: ordered.focus,
                })
                .collect();

            DateSpace {
                date: *date,
                start,
                width: end - start,
                values,
            }
        })
        .collect();

    Ok(spaces)
}
