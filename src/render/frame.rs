use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::Bounds;
use crate::render::{CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// What kind of element a hit region stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitRegionKind {
    /// Invisible full-height band behind one date's bars (pointer hover).
    BarGroup,
    /// A single bar (keyboard focus).
    Bar,
    /// Hover band owned by one date on a line chart.
    DateSpace,
    /// A point marker (keyboard focus).
    Point,
}

/// Interactive area emitted alongside the drawing primitives.
///
/// Bounds are in plot coordinates, i.e. relative to the top-left corner of
/// the area inside the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub kind: HitRegionKind,
    pub bounds: Bounds,
    pub date_index: usize,
    pub element_width_ratio: f64,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are in plot coordinates; backends translate by
/// `(margin.left, margin.top)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    pub grid_lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub hit_regions: Vec<HitRegion>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let valid_size = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !valid_size {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        for line in &self.grid_lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid_lines.is_empty()
            && self.texts.is_empty()
            && self.rects.is_empty()
            && self.paths.is_empty()
            && self.circles.is_empty()
    }
}
