use serde::{Deserialize, Serialize};

use crate::core::TooltipPlacement;

/// Gap kept between the tooltip, its anchor and the container edges.
pub const TOOLTIP_MARGIN_PX: f64 = 24.0;

/// Axis-aligned rectangle in a shared coordinate space (usually viewport pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }
}

/// Rendered tooltip size, supplied by the host after layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
}

impl Default for TooltipSize {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 120.0,
        }
    }
}

/// Tooltip top-left corner relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub x: f64,
    pub y: f64,
}

/// Places a tooltip for `target` inside `container`.
///
/// `element_width_ratio` selects the horizontal anchor on the target
/// (`0.0` left edge, `0.5` center). In `Over` mode the tooltip opens right
/// of and below the anchor and flips left or up when it would overflow; in
/// `Below` mode it is centered on the target under the container. The
/// result always lies within `[0, width] x [0, height]` of the container.
#[must_use]
pub fn calculate_tooltip_position(
    target: Bounds,
    container: Bounds,
    placement: TooltipPlacement,
    element_width_ratio: f64,
    tooltip: TooltipSize,
) -> TooltipPosition {
    let ratio = if element_width_ratio.is_finite() {
        element_width_ratio.clamp(0.0, 1.0)
    } else {
        0.5
    };

    let (x, y) = match placement {
        TooltipPlacement::Below => {
            let centered = target.x + target.width * 0.5 - tooltip.width / 2.0 - container.x;
            let x = centered
                .min(container.width - tooltip.width - TOOLTIP_MARGIN_PX)
                .max(TOOLTIP_MARGIN_PX);
            (x, container.height)
        }
        TooltipPlacement::Over => {
            let mut x = target.x + target.width * ratio + TOOLTIP_MARGIN_PX - container.x;
            if x + tooltip.width + TOOLTIP_MARGIN_PX > container.width {
                x = (target.x + target.width * (1.0 - ratio)
                    - tooltip.width
                    - TOOLTIP_MARGIN_PX
                    - container.x)
                    .max(TOOLTIP_MARGIN_PX);
            }

            let mut y = target.y + TOOLTIP_MARGIN_PX - container.y;
            if y + tooltip.height + TOOLTIP_MARGIN_PX > container.height {
                y = (target.y - tooltip.height - TOOLTIP_MARGIN_PX - container.y).max(0.0);
            }
            (x, y)
        }
    };

    TooltipPosition {
        x: clamp_into(x, container.width),
        y: clamp_into(y, container.height),
    }
}

fn clamp_into(value: f64, extent: f64) -> f64 {
    let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
    if value.is_finite() {
        value.clamp(0.0, extent)
    } else {
        0.0
    }
}
