use chrono::{DateTime, Utc};

use crate::core::ChartType;
use crate::render::{Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::chart_model::ChartModel;

/// Baseline of the primary x label below the plot.
pub const X_AXIS_LABEL_OFFSET_PX: f64 = 20.0;
/// Baseline of the secondary x label below the plot.
pub const X2_AXIS_LABEL_OFFSET_PX: f64 = 36.0;

const GRID_LINE_WIDTH_PX: f64 = 1.0;
const GRID_COLOR: Color = Color::rgb(0.88, 0.88, 0.88);

/// Emits y grid lines with their labels and the x tick labels.
///
/// Y labels hang below their grid line in the left margin. Empty formatted
/// labels are skipped.
pub fn draw_axes(frame: &mut RenderFrame, model: &ChartModel) {
    let params = &model.chart_params;
    let scales = &model.scales;
    let layout = &model.layout;

    for tick in &params.y_ticks {
        let y = scales.y_scale.map(*tick);
        frame.grid_lines.push(LinePrimitive::new(
            0.0,
            y,
            layout.width,
            y,
            GRID_LINE_WIDTH_PX,
            GRID_COLOR,
        ));
        push_label(
            frame,
            model.formats.y_format.format(tick),
            -layout.margin.left,
            scales.y_tick_offset.map(*tick),
            TextHAlign::Left,
        );
    }

    for date in &params.x_ticks {
        let Some(x) = x_tick_position(model, date) else {
            continue;
        };
        push_label(
            frame,
            model.formats.x_format.format(date),
            x,
            layout.height + X_AXIS_LABEL_OFFSET_PX,
            TextHAlign::Center,
        );
        push_label(
            frame,
            model.formats.x2_format.format(date),
            x,
            layout.height + X2_AXIS_LABEL_OFFSET_PX,
            TextHAlign::Center,
        );
    }
}

/// Band center for bars, point position for lines.
fn x_tick_position(model: &ChartModel, date: &DateTime<Utc>) -> Option<f64> {
    let scales = &model.scales;
    match model.chart_params.chart_type {
        ChartType::Bar => scales
            .x_scale
            .position(date)
            .map(|start| start + scales.x_scale.bandwidth() / 2.0),
        ChartType::Line => Some(scales.x_line_scale.map(*date) + model.chart_params.x_offset),
    }
}

fn push_label(frame: &mut RenderFrame, text: String, x: f64, y: f64, h_align: TextHAlign) {
    if !text.is_empty() {
        frame.texts.push(TextPrimitive::new(text, x, y, h_align));
    }
}
