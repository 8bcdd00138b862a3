use serde::{Deserialize, Serialize};

use crate::core::series::{SeriesRow, unique_keys};
use crate::core::types::{ChartType, Margin};
use crate::error::{ChartError, ChartResult};

/// Plot widths at or below this use the narrow tier.
pub const SMALL_BREAK_PX: f64 = 783.0;
/// Plot widths at or below this use the medium tier.
pub const WIDE_BREAK_PX: f64 = 1130.0;
/// Date counts above this force the medium line tier on wide plots.
pub const DENSE_DATE_COUNT: usize = 50;
/// Minimum horizontal room per date before point markers are drawn.
pub const MIN_POINT_SPACING_PX: f64 = 36.0;

/// Pixel columns one date needs in a wide bar layout: one per series plus a gap.
#[must_use]
pub fn columns_per_date(rows: &[SeriesRow]) -> usize {
    unique_keys(rows).len() + 1
}

/// Whether bar groups must be packed without gaps to fit `width`.
///
/// Always `false` for line charts.
#[must_use]
pub fn should_be_compact(
    chart_type: ChartType,
    rows: &[SeriesRow],
    margin: Margin,
    width: f64,
) -> bool {
    if chart_type != ChartType::Bar {
        return false;
    }
    let available = width - margin.horizontal();
    let minimum_wide = rows.len() * columns_per_date(rows);
    available < minimum_wide as f64
}

/// Outer chart width: the requested width, grown when bars would not fit.
#[must_use]
pub fn computed_width(
    chart_type: ChartType,
    rows: &[SeriesRow],
    margin: Margin,
    width: f64,
) -> f64 {
    if chart_type != ChartType::Bar {
        return width;
    }
    let columns = columns_per_date(rows);
    let minimum = if should_be_compact(chart_type, rows, margin, width) {
        rows.len() * (columns - 1)
    } else {
        rows.len() * columns
    };
    width.max(minimum as f64 + margin.horizontal())
}

/// Line stroke width for the plot width and date density.
#[must_use]
pub fn stroke_width(layout_width: f64, date_count: usize) -> f64 {
    if layout_width <= SMALL_BREAK_PX {
        1.25
    } else if layout_width <= WIDE_BREAK_PX || date_count > DENSE_DATE_COUNT {
        2.0
    } else {
        3.0
    }
}

/// Point marker radius, tiered like [`stroke_width`].
#[must_use]
pub fn dot_radius(layout_width: f64, date_count: usize) -> f64 {
    if layout_width <= SMALL_BREAK_PX {
        3.0
    } else if layout_width <= WIDE_BREAK_PX || date_count > DENSE_DATE_COUNT {
        4.0
    } else {
        6.0
    }
}

#[must_use]
pub fn show_point_markers(layout_width: f64, date_count: usize) -> bool {
    date_count > 0 && layout_width / date_count as f64 > MIN_POINT_SPACING_PX
}

/// Horizontal shift applied to line geometry; centers a lone date.
#[must_use]
pub fn x_offset(chart_type: ChartType, date_count: usize, layout_width: f64) -> f64 {
    if chart_type == ChartType::Line && date_count <= 1 {
        layout_width / 2.0
    } else {
        0.0
    }
}

/// Drawable plot area after margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Plot width, margins excluded.
    pub width: f64,
    /// Plot height, margins excluded.
    pub height: f64,
    pub margin: Margin,
    /// Canvas width the host should allocate, margins included.
    pub outer_width: f64,
    pub compact: bool,
}

impl ChartLayout {
    pub fn compute(
        chart_type: ChartType,
        rows: &[SeriesRow],
        margin: Margin,
        width: f64,
        height: f64,
    ) -> ChartResult<Self> {
        let margin = margin.validate()?;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport { width, height });
        }

        let outer_width = computed_width(chart_type, rows, margin, width);
        let plot_width = outer_width - margin.horizontal();
        let plot_height = height - margin.vertical();
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: plot_width,
                height: plot_height,
            });
        }

        Ok(Self {
            width: plot_width,
            height: plot_height,
            margin,
            outer_width,
            compact: should_be_compact(chart_type, rows, margin, width),
        })
    }
}
