mod tooltip;

use serde::{Deserialize, Serialize};

use crate::core::TooltipPlacement;

pub use tooltip::{
    Bounds, TOOLTIP_MARGIN_PX, TooltipPosition, TooltipSize, calculate_tooltip_position,
};

/// Element the tooltip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipAnchor {
    /// Target bounds in the same space as the container bounds.
    pub target: Bounds,
    pub element_width_ratio: f64,
    /// Index into the chart's unique dates.
    pub date_index: usize,
}

/// Input events, independent of any UI toolkit.
///
/// Keyboard focus and pointer hover resolve identically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TooltipEvent {
    PointerEnter(TooltipAnchor),
    Focus(TooltipAnchor),
    PointerLeave,
    Blur,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TooltipState {
    #[default]
    Hidden,
    Shown {
        position: TooltipPosition,
        date_index: usize,
    },
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    /// Transition function: every event fully resolves to hidden or shown.
    #[must_use]
    pub fn next(self, event: TooltipEvent, context: TooltipContext) -> Self {
        match event {
            TooltipEvent::PointerEnter(anchor) | TooltipEvent::Focus(anchor) => Self::Shown {
                position: calculate_tooltip_position(
                    anchor.target,
                    context.container,
                    context.placement,
                    anchor.element_width_ratio,
                    context.size,
                ),
                date_index: anchor.date_index,
            },
            TooltipEvent::PointerLeave | TooltipEvent::Blur => Self::Hidden,
        }
    }
}

/// Container and tooltip geometry the transitions are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipContext {
    pub container: Bounds,
    pub placement: TooltipPlacement,
    pub size: TooltipSize,
}

/// Owns the current tooltip state for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipInteraction {
    context: TooltipContext,
    state: TooltipState,
}

impl TooltipInteraction {
    #[must_use]
    pub fn new(context: TooltipContext) -> Self {
        Self {
            context,
            state: TooltipState::Hidden,
        }
    }

    #[must_use]
    pub fn state(self) -> TooltipState {
        self.state
    }

    #[must_use]
    pub fn context(self) -> TooltipContext {
        self.context
    }

    pub fn set_container(&mut self, container: Bounds) {
        self.context.container = container;
    }

    pub fn set_size(&mut self, size: TooltipSize) {
        self.context.size = size;
    }

    pub fn set_placement(&mut self, placement: TooltipPlacement) {
        self.context.placement = placement;
    }

    pub fn handle(&mut self, event: TooltipEvent) -> TooltipState {
        self.state = self.state.next(event, self.context);
        self.state
    }

    pub fn hide(&mut self) {
        self.state = TooltipState::Hidden;
    }
}
