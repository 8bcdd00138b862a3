use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::formats::{ChartFormats, FormatSpec, resolve_date_format, resolve_value_format};
use crate::core::{ChartMode, ChartType, Interval, Margin, OrderedKey, TooltipPlacement};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipSize;
use crate::render::ColorScheme;

/// Chart setup: data interpretation, size, formatting and tooltip behavior.
///
/// Deserializes from JSON with every field optional; missing fields take the
/// defaults below. Unknown `type`, `mode`, `interval` or `tooltip_position`
/// values are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub mode: ChartMode,
    /// strftime pattern used to parse row dates.
    pub date_parser: String,
    /// Requested outer width; bar charts may grow past it.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub interval: Option<Interval>,
    /// Explicit key ordering and flags; defaults to first-seen order.
    pub ordered_keys: Option<Vec<OrderedKey>>,
    pub tooltip_position: TooltipPlacement,
    pub tooltip_size: TooltipSize,
    /// Fixed tooltip heading; overrides the formatted date.
    pub tooltip_title: Option<String>,
    pub empty_message: Option<String>,
    pub tooltip_label_format: FormatSpec<DateTime<Utc>>,
    pub tooltip_value_format: FormatSpec<f64>,
    pub x_format: FormatSpec<DateTime<Utc>>,
    pub x2_format: FormatSpec<DateTime<Utc>>,
    pub y_format: FormatSpec<f64>,
    #[serde(skip)]
    pub color_scheme: ColorScheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            mode: ChartMode::TimeComparison,
            date_parser: "%Y-%m-%dT%H:%M:%S".to_owned(),
            width: 600.0,
            height: 200.0,
            margin: Margin::default(),
            interval: None,
            ordered_keys: None,
            tooltip_position: TooltipPlacement::Over,
            tooltip_size: TooltipSize::default(),
            tooltip_title: None,
            empty_message: None,
            tooltip_label_format: FormatSpec::pattern("%B %d, %Y"),
            tooltip_value_format: FormatSpec::pattern(","),
            x_format: FormatSpec::pattern("%Y-%m-%d"),
            x2_format: FormatSpec::pattern(""),
            y_format: FormatSpec::pattern(".3s"),
            color_scheme: ColorScheme::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::Configuration(format!("invalid chart config json: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Configuration(format!("failed to serialize chart config: {e}")))
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_date_parser(mut self, pattern: impl Into<String>) -> Self {
        self.date_parser = pattern.into();
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_ordered_keys(mut self, keys: Vec<OrderedKey>) -> Self {
        self.ordered_keys = Some(keys);
        self
    }

    #[must_use]
    pub fn with_tooltip_position(mut self, placement: TooltipPlacement) -> Self {
        self.tooltip_position = placement;
        self
    }

    #[must_use]
    pub fn with_tooltip_size(mut self, size: TooltipSize) -> Self {
        self.tooltip_size = size;
        self
    }

    #[must_use]
    pub fn with_tooltip_title(mut self, title: impl Into<String>) -> Self {
        self.tooltip_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_tooltip_label_format(mut self, format: impl Into<FormatSpec<DateTime<Utc>>>) -> Self {
        self.tooltip_label_format = format.into();
        self
    }

    #[must_use]
    pub fn with_tooltip_value_format(mut self, format: impl Into<FormatSpec<f64>>) -> Self {
        self.tooltip_value_format = format.into();
        self
    }

    #[must_use]
    pub fn with_x_format(mut self, format: impl Into<FormatSpec<DateTime<Utc>>>) -> Self {
        self.x_format = format.into();
        self
    }

    #[must_use]
    pub fn with_x2_format(mut self, format: impl Into<FormatSpec<DateTime<Utc>>>) -> Self {
        self.x2_format = format.into();
        self
    }

    #[must_use]
    pub fn with_y_format(mut self, format: impl Into<FormatSpec<f64>>) -> Self {
        self.y_format = format.into();
        self
    }

    #[must_use]
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    /// Resolves every format pattern; fails on the first invalid one.
    pub fn resolve_formats(&self) -> ChartResult<ChartFormats> {
        Ok(ChartFormats {
            tooltip_label_format: resolve_date_format(&self.tooltip_label_format)?,
            tooltip_value_format: resolve_value_format(&self.tooltip_value_format)?,
            x_format: resolve_date_format(&self.x_format)?,
            x2_format: resolve_date_format(&self.x2_format)?,
            y_format: resolve_value_format(&self.y_format)?,
        })
    }
}
