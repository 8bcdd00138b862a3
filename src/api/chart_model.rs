use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use super::chart_config::ChartConfig;
use super::formats::ChartFormats;
use crate::core::{
    BandScale, ChartLayout, ChartMode, ChartType, DateParser, DateSpace, Interval, LineDatum,
    LinearScale, OrderedKey, SeriesRow, TimeScale, date_spaces, dot_radius, line_data,
    ordered_keys, show_point_markers, stroke_width, unique_dates, unique_keys, x_group_scale,
    x_line_scale, x_offset, x_scale, x_ticks, y_max, y_scale, y_tick_offset, y_ticks,
};
use crate::error::ChartResult;

/// Normalized data and derived per-pass values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartParams {
    pub chart_type: ChartType,
    pub mode: ChartMode,
    pub interval: Option<Interval>,
    pub unique_keys: IndexSet<String>,
    pub ordered_keys: Vec<OrderedKey>,
    pub line_data: Vec<LineDatum>,
    pub unique_dates: Vec<DateTime<Utc>>,
    pub date_spaces: Vec<DateSpace>,
    pub x_ticks: Vec<DateTime<Utc>>,
    pub y_max: f64,
    pub y_ticks: SmallVec<[f64; 4]>,
    pub x_offset: f64,
    pub stroke_width: f64,
    pub dot_radius: f64,
    pub show_point_markers: bool,
    /// Nothing above zero to plot.
    pub is_empty: bool,
    pub empty_message: Option<String>,
    pub tooltip_title: Option<String>,
    #[serde(skip)]
    pub parse_date: DateParser,
}

impl ChartParams {
    /// Whether any ordered key is currently focused.
    #[must_use]
    pub fn any_focused(&self) -> bool {
        self.ordered_keys.iter().any(|ordered| ordered.focus)
    }

    #[must_use]
    pub fn date_index(&self, date: &DateTime<Utc>) -> Option<usize> {
        self.unique_dates.binary_search(date).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScales {
    pub x_scale: BandScale<DateTime<Utc>>,
    pub x_group_scale: BandScale<String>,
    pub x_line_scale: TimeScale,
    pub y_scale: LinearScale,
    pub y_tick_offset: LinearScale,
}

/// Everything a render pass reads, rebuilt whenever data, size or config
/// change.
#[derive(Debug, Clone)]
pub struct ChartModel {
    pub chart_params: ChartParams,
    pub formats: ChartFormats,
    pub layout: ChartLayout,
    pub scales: ChartScales,
}

/// Builds the render model for `rows` under `config`.
///
/// Fails on invalid patterns, invalid sizes or unparseable row dates. Override
/// ordered keys that match no series are dropped.
pub fn build_chart_model(rows: &[SeriesRow], config: &ChartConfig) -> ChartResult<ChartModel> {
    let parse_date = DateParser::new(config.date_parser.as_str())?;
    let formats = config.resolve_formats()?;
    let layout = ChartLayout::compute(
        config.chart_type,
        rows,
        config.margin,
        config.width,
        config.height,
    )?;

    let unique_keys = unique_keys(rows);
    let ordered_keys = ordered_keys(rows, &unique_keys, config.ordered_keys.as_deref());
    let line_data = line_data(rows, &ordered_keys);
    let y_max = y_max(&line_data);
    let unique_dates = unique_dates(&line_data, &parse_date)?;

    let x_scale = x_scale(&unique_dates, layout.width, layout.compact);
    let scales = ChartScales {
        x_group_scale: x_group_scale(&ordered_keys, &x_scale, layout.compact),
        x_scale,
        x_line_scale: x_line_scale(&unique_dates, layout.width)?,
        y_scale: y_scale(layout.height, y_max)?,
        y_tick_offset: y_tick_offset(layout.height, y_max)?,
    };

    let date_spaces = date_spaces(
        rows,
        &unique_dates,
        &ordered_keys,
        layout.width,
        scales.x_line_scale,
        &parse_date,
    )?;
    let date_count = unique_dates.len();
    let chart_params = ChartParams {
        chart_type: config.chart_type,
        mode: config.mode,
        interval: config.interval,
        x_ticks: x_ticks(&unique_dates, layout.width, config.mode, config.interval),
        y_ticks: y_ticks(y_max),
        x_offset: x_offset(config.chart_type, date_count, layout.width),
        stroke_width: stroke_width(layout.width, date_count),
        dot_radius: dot_radius(layout.width, date_count),
        show_point_markers: show_point_markers(layout.width, date_count),
        is_empty: y_max == 0.0,
        empty_message: config.empty_message.clone(),
        tooltip_title: config.tooltip_title.clone(),
        unique_keys,
        ordered_keys,
        line_data,
        unique_dates,
        date_spaces,
        y_max,
        parse_date,
    };

    debug!(
        chart_type = %chart_params.chart_type,
        rows = rows.len(),
        series = chart_params.ordered_keys.len(),
        dates = date_count,
        width = layout.width,
        compact = layout.compact,
        y_max,
        "build chart model"
    );

    Ok(ChartModel {
        chart_params,
        formats,
        layout,
        scales,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SeriesRow> {
        vec![
            SeriesRow::new("2018-05-30T00:00:00")
                .with_value("Hoodie", 2.0)
                .with_value("Sunglasses", 1.0),
            SeriesRow::new("2018-05-31T00:00:00")
                .with_value("Hoodie", 4.0)
                .with_value("Sunglasses", 0.0),
        ]
    }

    #[test]
    fn unknown_override_keys_are_dropped() {
        let config = ChartConfig::default().with_ordered_keys(vec![
            OrderedKey::new("Sunglasses"),
            OrderedKey::new("Scarf"),
            OrderedKey::new("Hoodie"),
        ]);
        let model = build_chart_model(&rows(), &config).expect("model");
        let keys: Vec<&str> = model
            .chart_params
            .ordered_keys
            .iter()
            .map(|ordered| ordered.key.as_str())
            .collect();
        assert_eq!(keys, ["Sunglasses", "Hoodie"]);
    }

    #[test]
    fn empty_rows_keep_override_keys() {
        let config = ChartConfig::default().with_ordered_keys(vec![OrderedKey::new("Hoodie")]);
        let model = build_chart_model(&[], &config).expect("model");
        assert_eq!(model.chart_params.ordered_keys.len(), 1);
        assert!(model.chart_params.is_empty);
    }

    #[test]
    fn date_index_follows_sorted_dates() {
        let model = build_chart_model(&rows(), &ChartConfig::default()).expect("model");
        let second = model.chart_params.unique_dates[1];
        assert_eq!(model.chart_params.date_index(&second), Some(1));
    }
}
