use report_chart::api::{ChartConfig, ChartEngine, InteractionEvent};
use report_chart::core::{ChartType, SeriesRow, TooltipPlacement};
use report_chart::interaction::{Bounds, TooltipPosition, TooltipState};
use report_chart::render::{HitRegionKind, NullRenderer};

fn line_rows() -> Vec<SeriesRow> {
    vec![
        SeriesRow::new("2021-01-01").with_value("a", 10.0),
        SeriesRow::new("2021-01-02").with_labeled_value("a", 20.0, "Jan 2, 2020"),
        SeriesRow::new("2021-01-03").with_value("a", 30.0),
    ]
}

fn line_engine() -> ChartEngine<NullRenderer> {
    let config = ChartConfig::new(ChartType::Line).with_date_parser("%Y-%m-%d");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(line_rows());
    engine.render().expect("render should succeed");
    engine
}

fn date_space_region(engine: &ChartEngine<NullRenderer>, date_index: usize) -> usize {
    engine
        .hit_regions()
        .iter()
        .position(|region| {
            region.kind == HitRegionKind::DateSpace && region.date_index == date_index
        })
        .expect("date space region")
}

#[test]
fn engine_smoke_flow() {
    let mut engine = line_engine();
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_path_count, 1);
    assert_eq!(engine.renderer().last_circle_count, 3);

    let region = date_space_region(&engine, 1);
    let state = engine
        .handle_interaction(InteractionEvent::PointerEnter(region))
        .expect("hover");
    assert_eq!(
        state,
        TooltipState::Shown {
            position: TooltipPosition { x: 344.0, y: 44.0 },
            date_index: 1,
        }
    );

    let content = engine.tooltip_content().expect("content");
    assert_eq!(content.title, "January 02, 2021");
    assert_eq!(content.rows.len(), 1);
    assert_eq!(content.rows[0].label, "Jan 2, 2020");
    assert_eq!(content.rows[0].value, "20");

    let state = engine
        .handle_interaction(InteractionEvent::PointerLeave)
        .expect("leave");
    assert_eq!(state, TooltipState::Hidden);
    assert!(engine.tooltip_content().is_none());
}

#[test]
fn last_date_space_flips_the_tooltip_left() {
    let mut engine = line_engine();
    let region = date_space_region(&engine, 2);
    let state = engine
        .handle_interaction(InteractionEvent::Focus(region))
        .expect("focus");
    let TooltipState::Shown { position, .. } = state else {
        panic!("tooltip should be shown");
    };
    assert_eq!(position.x, 376.0);
}

#[test]
fn container_origin_shifts_the_anchor() {
    let mut engine = line_engine();
    engine.set_container_bounds(Bounds::new(100.0, 50.0, 600.0, 200.0));
    let region = date_space_region(&engine, 1);
    let state = engine
        .handle_interaction(InteractionEvent::Focus(region))
        .expect("focus");
    assert_eq!(
        state,
        TooltipState::Shown {
            position: TooltipPosition { x: 344.0, y: 44.0 },
            date_index: 1,
        }
    );
}

#[test]
fn below_placement_anchors_under_the_chart() {
    let config = ChartConfig::new(ChartType::Line)
        .with_date_parser("%Y-%m-%d")
        .with_tooltip_position(TooltipPlacement::Below)
        .with_tooltip_title("Orders");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(line_rows());
    engine.render().expect("render");

    let region = date_space_region(&engine, 1);
    let state = engine
        .handle_interaction(InteractionEvent::PointerEnter(region))
        .expect("hover");
    let TooltipState::Shown { position, .. } = state else {
        panic!("tooltip should be shown");
    };
    assert_eq!(position.y, 200.0);
    assert_eq!(engine.tooltip_content().expect("content").title, "Orders");
}

#[test]
fn unknown_region_is_an_error() {
    let mut engine = line_engine();
    let result = engine.handle_interaction(InteractionEvent::PointerEnter(999));
    assert!(result.is_err());
    assert_eq!(engine.tooltip_state(), TooltipState::Hidden);
}

#[test]
fn new_data_hides_the_tooltip_and_needs_a_render() {
    let mut engine = line_engine();
    let region = date_space_region(&engine, 0);
    engine
        .handle_interaction(InteractionEvent::Focus(region))
        .expect("focus");

    engine.set_data(vec![SeriesRow::new("2021-01-01").with_value("a", 1.0)]);
    assert_eq!(engine.tooltip_state(), TooltipState::Hidden);
    assert!(engine.hit_regions().is_empty());
    assert!(engine.handle_interaction(InteractionEvent::Focus(0)).is_err());

    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 2);
}

#[test]
fn bad_rows_fail_render_without_replacing_the_frame() {
    let mut engine = line_engine();
    engine.set_data(vec![SeriesRow::new("yesterday").with_value("a", 1.0)]);
    assert!(engine.render().is_err());
    assert!(engine.frame().is_none());
    assert_eq!(engine.into_renderer().frames_rendered, 1);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = ChartConfig::default().with_size(600.0, 10.0);
    assert!(ChartEngine::new(NullRenderer::default(), config).is_err());
}

#[test]
fn snapshot_contract_carries_schema_version() {
    let engine = line_engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["snapshot"]["chart_params"]["y_max"], 30.0);
    assert_eq!(value["snapshot"]["chart_params"]["chart_type"], "line");
    assert_eq!(value["snapshot"]["layout"]["width"], 560.0);
    assert_eq!(value["snapshot"]["tooltip"], "Hidden");
}

#[test]
fn resized_config_moves_the_tooltip_edge() {
    let mut engine = line_engine();
    let config = engine.config().clone().with_size(1_200.0, 200.0);
    engine.set_config(config);
    engine.render().expect("render");
    assert_eq!(engine.container_bounds(), Bounds::new(0.0, 0.0, 1_200.0, 200.0));

    // The last date space now spans x 870..1160 and leaves room on the right.
    let region = date_space_region(&engine, 2);
    let state = engine
        .handle_interaction(InteractionEvent::PointerEnter(region))
        .expect("hover");
    assert_eq!(
        state,
        TooltipState::Shown {
            position: TooltipPosition { x: 934.0, y: 44.0 },
            date_index: 2,
        }
    );
}

#[test]
fn compact_bars_widen_the_container() {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).expect("start");
    let rows: Vec<SeriesRow> = (0..700)
        .map(|day| {
            let date = start + chrono::Duration::days(day);
            SeriesRow::new(date.format("%Y-%m-%d").to_string()).with_value("a", 1.0)
        })
        .collect();
    let config = ChartConfig::new(ChartType::Bar).with_date_parser("%Y-%m-%d");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(rows);
    engine.render().expect("render");

    let outer_width = engine.model().expect("model").layout.outer_width;
    assert_eq!(outer_width, 740.0);
    assert_eq!(engine.container_bounds().width, outer_width);
}

#[test]
fn pinned_container_survives_config_changes() {
    let mut engine = line_engine();
    let pinned = Bounds::new(10.0, 10.0, 800.0, 400.0);
    engine.set_container_bounds(pinned);
    let config = engine.config().clone().with_size(1_200.0, 200.0);
    engine.set_config(config);
    engine.render().expect("render");
    assert_eq!(engine.container_bounds(), pinned);
}
