//! report-chart: geometry engine for time-series report charts.
//!
//! Turns rows of dated series values into grouped bar or line chart
//! geometry: normalized series, band/time/linear scales, responsive layout
//! decisions, backend-agnostic render frames and tooltip placement. Drawing
//! itself is left to a [`render::Renderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, ChartModel, InteractionEvent, build_chart_model};
pub use error::{ChartError, ChartResult};
