use crate::core::{ChartMode, SeriesRow};
use crate::error::ChartResult;
use crate::interaction::Bounds;
use crate::render::{
    Color, ColorScheme, HitRegion, HitRegionKind, RectPrimitive, RenderFrame, series_color,
    series_opacity,
};

use super::chart_model::ChartModel;

const BAR_ELEMENT_WIDTH_RATIO: f64 = 0.5;

/// Draws grouped bars: one band per date, one bar per visible key.
///
/// Each date also gets an invisible full-height group rect that owns pointer
/// hover. Zero-height bars hand their keyboard anchor to the group so the
/// tooltip never attaches to a collapsed element.
pub fn draw_bars(
    frame: &mut RenderFrame,
    rows: &[SeriesRow],
    model: &ChartModel,
    colors: &ColorScheme,
) -> ChartResult<()> {
    let params = &model.chart_params;
    let scales = &model.scales;
    let height = model.layout.height;
    let group_width = scales.x_group_scale.range().1;
    let bar_width = scales.x_group_scale.bandwidth();
    let any_focused = params.any_focused();

    for (row_index, row) in rows.iter().enumerate() {
        let date = params.parse_date.parse(row_index, &row.date)?;
        let (Some(date_index), Some(group_x)) =
            (params.date_index(&date), scales.x_scale.position(&date))
        else {
            continue;
        };

        let group_bounds = Bounds::new(group_x, 0.0, group_width, height);
        let mut group = RectPrimitive::new(group_x, 0.0, group_width, height, Color::WHITE)
            .with_opacity(0.0);
        if params.mode == ChartMode::ItemComparison {
            group = group.with_aria_label(model.formats.tooltip_label_format.format(&date));
        }
        frame.rects.push(group);
        frame.hit_regions.push(HitRegion {
            kind: HitRegionKind::BarGroup,
            bounds: group_bounds,
            date_index,
            element_width_ratio: BAR_ELEMENT_WIDTH_RATIO,
        });

        for ordered in params.ordered_keys.iter().filter(|ordered| ordered.visible) {
            let Some(offset) = scales.x_group_scale.position(&ordered.key) else {
                continue;
            };
            let value = row.value(&ordered.key);
            let y = scales.y_scale.map(value).min(height);
            let bar_height = height - y;
            let x = group_x + offset;

            let label = match row.label(&ordered.key) {
                label if params.mode == ChartMode::TimeComparison && !label.is_empty() => label,
                _ => ordered.key.as_str(),
            };
            let aria_label = format!(
                "{label} {}",
                model.formats.tooltip_value_format.format(&value)
            );

            frame.rects.push(
                RectPrimitive::new(
                    x,
                    y,
                    bar_width,
                    bar_height,
                    series_color(&ordered.key, &params.ordered_keys, colors),
                )
                .with_opacity(series_opacity(ordered.visible, ordered.focus, any_focused))
                .with_aria_label(aria_label),
            );
            frame.hit_regions.push(HitRegion {
                kind: HitRegionKind::Bar,
                bounds: if bar_height > 0.0 {
                    Bounds::new(x, y, bar_width, bar_height)
                } else {
                    group_bounds
                },
                date_index,
                element_width_ratio: BAR_ELEMENT_WIDTH_RATIO,
            });
        }
    }

    Ok(())
}
