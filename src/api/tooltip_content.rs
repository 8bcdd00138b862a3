use serde::Serialize;

use crate::core::ChartMode;
use crate::render::{Color, ColorScheme, series_color};

use super::chart_model::ChartModel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub key: String,
    pub label: String,
    pub value: String,
    pub color: Color,
}

/// Text shown inside the tooltip for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

/// Builds the tooltip body for `date_index`, or `None` when out of range.
#[must_use]
pub fn tooltip_content(
    model: &ChartModel,
    date_index: usize,
    colors: &ColorScheme,
) -> Option<TooltipContent> {
    let params = &model.chart_params;
    let space = params.date_spaces.get(date_index)?;
    let title = params
        .tooltip_title
        .clone()
        .unwrap_or_else(|| model.formats.tooltip_label_format.format(&space.date));

    let rows = space
        .values
        .iter()
        .map(|value| TooltipRow {
            key: value.key.clone(),
            label: if params.mode == ChartMode::TimeComparison && !value.label.is_empty() {
                value.label.clone()
            } else {
                value.key.clone()
            },
            value: model.formats.tooltip_value_format.format(&value.value),
            color: series_color(&value.key, &params.ordered_keys, colors),
        })
        .collect();

    Some(TooltipContent { title, rows })
}
