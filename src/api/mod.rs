mod axis_render_frame_builder;
mod bar_chart_render_frame_builder;
mod chart_config;
mod chart_model;
mod engine;
mod formats;
mod json_contract;
mod line_chart_render_frame_builder;
mod number_format;
mod render_frame_builder;
mod tooltip_content;

pub use axis_render_frame_builder::{X_AXIS_LABEL_OFFSET_PX, X2_AXIS_LABEL_OFFSET_PX, draw_axes};
pub use bar_chart_render_frame_builder::draw_bars;
pub use chart_config::ChartConfig;
pub use chart_model::{ChartModel, ChartParams, ChartScales, build_chart_model};
pub use engine::{ChartEngine, InteractionEvent};
pub use formats::{
    ChartFormats, DateFormatter, FormatFn, FormatSpec, Formatter, ValueFormatter,
    resolve_date_format, resolve_value_format,
};
pub use json_contract::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1,
};
pub use line_chart_render_frame_builder::draw_lines;
pub use number_format::NumberFormat;
pub use render_frame_builder::build_render_frame;
pub use tooltip_content::{TooltipContent, TooltipRow, tooltip_content};
