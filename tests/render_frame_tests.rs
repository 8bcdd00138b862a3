use report_chart::api::{ChartConfig, build_chart_model, build_render_frame};
use report_chart::core::{ChartMode, ChartType, OrderedKey, SeriesRow};
use report_chart::render::{Color, ColorScheme, HitRegionKind, RenderFrame, TextHAlign};

fn render(rows: &[SeriesRow], config: &ChartConfig) -> RenderFrame {
    let model = build_chart_model(rows, config).expect("model");
    let frame = build_render_frame(rows, &model, &config.color_scheme).expect("frame");
    frame.validate().expect("valid frame");
    frame
}

fn bar_rows() -> Vec<SeriesRow> {
    vec![
        SeriesRow::new("2021-01-01").with_value("a", 10.0),
        SeriesRow::new("2021-01-02").with_value("a", 20.0),
    ]
}

fn line_rows() -> Vec<SeriesRow> {
    vec![
        SeriesRow::new("2021-01-01")
            .with_value("a", 10.0)
            .with_value("b", 5.0),
        SeriesRow::new("2021-01-02")
            .with_value("a", 20.0)
            .with_value("b", 5.0),
        SeriesRow::new("2021-01-03")
            .with_value("a", 30.0)
            .with_value("b", 5.0),
    ]
}

fn bar_config() -> ChartConfig {
    ChartConfig::new(ChartType::Bar).with_date_parser("%Y-%m-%d")
}

fn line_config() -> ChartConfig {
    ChartConfig::new(ChartType::Line).with_date_parser("%Y-%m-%d")
}

#[test]
fn bars_follow_band_and_value_scales() {
    let frame = render(&bar_rows(), &bar_config());
    let bars: Vec<_> = frame.rects.iter().filter(|rect| rect.opacity > 0.0).collect();

    assert_eq!(bars.len(), 2);
    assert_eq!((bars[0].x, bars[0].y), (19.0, 75.0));
    assert_eq!((bars[0].width, bars[0].height), (230.0, 75.0));
    assert_eq!((bars[1].x, bars[1].y, bars[1].height), (313.0, 0.0, 150.0));
    assert_eq!(bars[1].aria_label.as_deref(), Some("a 20"));
}

#[test]
fn bar_groups_own_full_height_hover_regions() {
    let frame = render(&bar_rows(), &bar_config());
    let groups: Vec<_> = frame
        .hit_regions
        .iter()
        .filter(|region| region.kind == HitRegionKind::BarGroup)
        .collect();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].bounds.x, 295.0);
    assert_eq!(groups[1].bounds.width, 265.0);
    assert_eq!(groups[1].bounds.height, 150.0);
    assert_eq!(groups[1].date_index, 1);
}

#[test]
fn zero_bars_anchor_focus_to_the_group() {
    let rows = vec![
        SeriesRow::new("2021-01-01")
            .with_value("a", 0.0)
            .with_value("b", 4.0),
    ];
    let frame = render(&rows, &bar_config());
    let group = frame
        .hit_regions
        .iter()
        .find(|region| region.kind == HitRegionKind::BarGroup)
        .expect("group");
    let bars: Vec<_> = frame
        .hit_regions
        .iter()
        .filter(|region| region.kind == HitRegionKind::Bar)
        .collect();

    assert_eq!(bars[0].bounds, group.bounds);
    assert_ne!(bars[1].bounds, group.bounds);
}

#[test]
fn item_comparison_labels_groups_by_date() {
    let config = bar_config().with_mode(ChartMode::ItemComparison);
    let frame = render(&bar_rows(), &config);
    let group_labels: Vec<_> = frame
        .rects
        .iter()
        .filter(|rect| rect.opacity == 0.0)
        .filter_map(|rect| rect.aria_label.as_deref())
        .collect();
    assert_eq!(group_labels, ["January 01, 2021", "January 02, 2021"]);
}

#[test]
fn time_comparison_bars_prefer_row_labels() {
    let rows = vec![
        SeriesRow::new("2021-01-01").with_labeled_value("a", 1234.0, "Jan 1, 2020"),
    ];
    let frame = render(&rows, &bar_config());
    let bar = frame
        .rects
        .iter()
        .find(|rect| rect.opacity > 0.0)
        .expect("bar");
    assert_eq!(bar.aria_label.as_deref(), Some("Jan 1, 2020 1,234"));
}

#[test]
fn hidden_series_draw_nothing() {
    let config = line_config().with_ordered_keys(vec![
        OrderedKey::new("a"),
        OrderedKey::new("b").with_visible(false),
    ]);
    let frame = render(&line_rows(), &config);
    assert_eq!(frame.paths.len(), 1);
    assert_eq!(frame.circles.len(), 3);
}

#[test]
fn lines_are_drawn_last_key_first() {
    let frame = render(&line_rows(), &line_config());
    assert_eq!(frame.paths.len(), 2);
    // "b" is drawn first so "a" ends on top.
    assert_eq!(frame.paths[0].points, [(0.0, 125.0), (280.0, 125.0), (560.0, 125.0)]);
    assert_eq!(frame.paths[1].points, [(0.0, 100.0), (280.0, 50.0), (560.0, 0.0)]);
    assert_eq!(frame.paths[1].stroke_width, 1.25);
}

#[test]
fn focus_fades_other_lines() {
    let config = line_config().with_ordered_keys(vec![
        OrderedKey::new("a").with_focus(true),
        OrderedKey::new("b"),
    ]);
    let frame = render(&line_rows(), &config);
    assert_eq!(frame.paths[0].opacity, 0.1);
    assert_eq!(frame.paths[1].opacity, 1.0);
}

#[test]
fn point_markers_carry_outline_and_labels() {
    let frame = render(&line_rows(), &line_config());
    assert_eq!(frame.circles.len(), 6);
    let circle = frame.circles.last().expect("circle");
    assert_eq!(circle.radius, 3.0);
    assert_eq!(circle.stroke, Color::WHITE);
    assert_eq!(circle.stroke_width, 2.25);
    assert_eq!(circle.aria_label.as_deref(), Some("January 03, 2021 30"));
}

#[test]
fn dense_lines_drop_point_markers() {
    let rows: Vec<SeriesRow> = (1..=28)
        .map(|day| SeriesRow::new(format!("2021-02-{day:02}")).with_value("a", 1.0))
        .collect();
    let frame = render(&rows, &line_config());
    assert!(frame.circles.is_empty());
    assert_eq!(frame.paths.len(), 1);
    assert!(
        frame
            .hit_regions
            .iter()
            .all(|region| region.kind == HitRegionKind::DateSpace)
    );
}

#[test]
fn edge_date_spaces_align_tooltips_left() {
    let frame = render(&line_rows(), &line_config());
    let ratios: Vec<f64> = frame
        .hit_regions
        .iter()
        .filter(|region| region.kind == HitRegionKind::DateSpace)
        .map(|region| region.element_width_ratio)
        .collect();
    assert_eq!(ratios, [0.0, 0.5, 0.0]);
}

#[test]
fn single_point_has_no_path_and_is_centered() {
    let rows = vec![SeriesRow::new("2021-01-01").with_value("a", 4.0)];
    let frame = render(&rows, &line_config());
    assert!(frame.paths.is_empty());
    assert_eq!(frame.circles.len(), 1);
    assert_eq!(frame.circles[0].cx, 280.0);

    let space = frame
        .hit_regions
        .iter()
        .find(|region| region.kind == HitRegionKind::DateSpace)
        .expect("date space");
    assert_eq!(space.element_width_ratio, 0.5);
}

#[test]
fn axes_emit_grid_lines_and_labels() {
    let frame = render(&line_rows(), &line_config());
    let grid_y: Vec<f64> = frame.grid_lines.iter().map(|line| line.y1).collect();
    assert_eq!(grid_y, [150.0, 100.0, 50.0, 0.0]);

    let y_labels: Vec<(&str, f64)> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Left)
        .map(|text| (text.text.as_str(), text.y))
        .collect();
    assert_eq!(
        y_labels,
        [("0.00", 162.0), ("10.0", 112.0), ("20.0", 62.0), ("30.0", 12.0)]
    );

    let x_labels: Vec<(&str, f64)> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| (text.text.as_str(), text.x))
        .collect();
    assert_eq!(
        x_labels,
        [("2021-01-01", 0.0), ("2021-01-02", 280.0), ("2021-01-03", 560.0)]
    );
}

#[test]
fn secondary_x_labels_render_below_the_first() {
    let config = bar_config().with_x_format("%d").with_x2_format("%b %Y");
    let frame = render(&bar_rows(), &config);
    let labels: Vec<(&str, f64, f64)> = frame
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .map(|text| (text.text.as_str(), text.x, text.y))
        .collect();
    assert_eq!(
        labels,
        [
            ("01", 133.5, 170.0),
            ("Jan 2021", 133.5, 186.0),
            ("02", 427.5, 170.0),
            ("Jan 2021", 427.5, 186.0),
        ]
    );
}

#[test]
fn colors_come_from_the_scheme() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let blue = Color::rgb(0.0, 0.0, 1.0);
    let scheme = ColorScheme::from_stops(vec![red, blue]);
    let config = line_config().with_color_scheme(scheme);
    let frame = render(&line_rows(), &config);
    assert_eq!(frame.paths[1].color, red);
    assert_eq!(frame.paths[0].color, blue);
}

#[test]
fn empty_data_still_renders_a_baseline() {
    let frame = render(&[], &line_config());
    assert_eq!(frame.grid_lines.len(), 1);
    assert!(frame.paths.is_empty());
    assert!(frame.hit_regions.is_empty());
}
