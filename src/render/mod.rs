mod color;
mod frame;
mod null_renderer;
mod primitives;

pub use color::{ColorScheme, series_color, series_opacity};
pub use frame::{HitRegion, HitRegionKind, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` in plot coordinates
/// and translate it by the chart margins themselves.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
