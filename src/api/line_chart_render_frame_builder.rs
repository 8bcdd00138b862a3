use chrono::{DateTime, Utc};

use crate::core::LineDatum;
use crate::error::ChartResult;
use crate::interaction::Bounds;
use crate::render::{
    CirclePrimitive, Color, ColorScheme, HitRegion, HitRegionKind, PathPrimitive, RenderFrame,
    series_color, series_opacity,
};

use super::chart_model::ChartModel;

const POINT_ELEMENT_WIDTH_RATIO: f64 = 0.5;

struct PlottedPoint {
    date: DateTime<Utc>,
    x: f64,
    y: f64,
    value: f64,
    label: String,
}

/// Draws one path per visible series plus optional point markers.
///
/// Series are drawn in reverse key order so the first key ends on top. Paths
/// need at least two dates; point markers only appear when points are spaced
/// far enough apart. Every date space becomes a hover region.
pub fn draw_lines(
    frame: &mut RenderFrame,
    model: &ChartModel,
    colors: &ColorScheme,
) -> ChartResult<()> {
    let params = &model.chart_params;
    let height = model.layout.height;
    let date_count = params.unique_dates.len();
    let any_focused = params.any_focused();

    for datum in params.line_data.iter().rev().filter(|datum| datum.visible) {
        let color = series_color(&datum.key, &params.ordered_keys, colors);
        let opacity = series_opacity(datum.visible, datum.focus, any_focused);
        let points = plot_series(datum, model)?;

        if date_count > 1 && points.len() > 1 {
            frame.paths.push(PathPrimitive {
                points: points.iter().map(|point| (point.x, point.y)).collect(),
                stroke_width: params.stroke_width,
                color,
                opacity,
            });
        }

        if !params.show_point_markers {
            continue;
        }
        let radius = params.dot_radius;
        for point in &points {
            let label = if point.label.is_empty() {
                model.formats.tooltip_label_format.format(&point.date)
            } else {
                point.label.clone()
            };
            frame.circles.push(CirclePrimitive {
                cx: point.x,
                cy: point.y,
                radius,
                fill: color,
                stroke: Color::WHITE,
                stroke_width: params.stroke_width + 1.0,
                opacity,
                aria_label: Some(format!(
                    "{label} {}",
                    model.formats.tooltip_value_format.format(&point.value)
                )),
            });
            if let Some(date_index) = params.date_index(&point.date) {
                frame.hit_regions.push(HitRegion {
                    kind: HitRegionKind::Point,
                    bounds: Bounds::new(
                        point.x - radius,
                        point.y - radius,
                        2.0 * radius,
                        2.0 * radius,
                    ),
                    date_index,
                    element_width_ratio: POINT_ELEMENT_WIDTH_RATIO,
                });
            }
        }
    }

    let last = params.date_spaces.len().saturating_sub(1);
    for (date_index, space) in params.date_spaces.iter().enumerate() {
        let at_edge = date_count > 1 && (date_index == 0 || date_index == last);
        frame.hit_regions.push(HitRegion {
            kind: HitRegionKind::DateSpace,
            bounds: Bounds::new(space.start, 0.0, space.width, height),
            date_index,
            element_width_ratio: if at_edge { 0.0 } else { POINT_ELEMENT_WIDTH_RATIO },
        });
    }

    Ok(())
}

fn plot_series(datum: &LineDatum, model: &ChartModel) -> ChartResult<Vec<PlottedPoint>> {
    let params = &model.chart_params;
    let scales = &model.scales;
    let mut points = Vec::with_capacity(datum.values.len());
    for (row, value) in datum.values.iter().enumerate() {
        let date = params.parse_date.parse(row, &value.date)?;
        points.push(PlottedPoint {
            date,
            x: scales.x_line_scale.map(date) + params.x_offset,
            y: scales.y_scale.map(value.value),
            value: value.value,
            label: value.label.clone(),
        });
    }
    points.sort_by_key(|point| point.date);
    Ok(points)
}
