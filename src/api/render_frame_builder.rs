use tracing::trace;

use crate::core::{ChartType, SeriesRow};
use crate::error::ChartResult;
use crate::render::{ColorScheme, RenderFrame};

use super::axis_render_frame_builder::draw_axes;
use super::bar_chart_render_frame_builder::draw_bars;
use super::chart_model::ChartModel;
use super::line_chart_render_frame_builder::draw_lines;

/// Materializes the full scene for one pass: axes first, then series.
///
/// The frame is sized to the plot area; an empty chart still gets its grid.
pub fn build_render_frame(
    rows: &[SeriesRow],
    model: &ChartModel,
    colors: &ColorScheme,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(model.layout.width, model.layout.height);
    draw_axes(&mut frame, model);
    match model.chart_params.chart_type {
        ChartType::Bar => draw_bars(&mut frame, rows, model, colors)?,
        ChartType::Line => draw_lines(&mut frame, model, colors)?,
    }

    trace!(
        grid_lines = frame.grid_lines.len(),
        texts = frame.texts.len(),
        rects = frame.rects.len(),
        paths = frame.paths.len(),
        circles = frame.circles.len(),
        hit_regions = frame.hit_regions.len(),
        "build render frame"
    );
    Ok(frame)
}
