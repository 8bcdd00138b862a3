use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::SeriesRow;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    Bounds, TooltipAnchor, TooltipContext, TooltipEvent, TooltipInteraction, TooltipState,
};
use crate::render::{HitRegion, RenderFrame, Renderer};

use super::chart_config::ChartConfig;
use super::chart_model::{ChartModel, build_chart_model};
use super::render_frame_builder::build_render_frame;
use super::tooltip_content::{TooltipContent, tooltip_content};

/// Host events addressed to a hit region of the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionEvent {
    PointerEnter(usize),
    Focus(usize),
    PointerLeave,
    Blur,
}

/// Stateful chart facade: owns data, config, the last model and frame, and
/// the tooltip state machine.
///
/// Hosts call [`ChartEngine::render`] after every data, config or size change
/// and forward pointer and focus events through
/// [`ChartEngine::handle_interaction`].
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    rows: Vec<SeriesRow>,
    container: Bounds,
    container_pinned: bool,
    tooltip: TooltipInteraction,
    model: Option<ChartModel>,
    frame: Option<RenderFrame>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Fails when the config carries invalid patterns or sizes.
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        build_chart_model(&[], &config)?;
        let container = Bounds::new(0.0, 0.0, config.width, config.height);
        let tooltip = TooltipInteraction::new(TooltipContext {
            container,
            placement: config.tooltip_position,
            size: config.tooltip_size,
        });
        Ok(Self {
            renderer,
            config,
            rows: Vec::new(),
            container,
            container_pinned: false,
            tooltip,
            model: None,
            frame: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Until the host pins the container with
    /// [`ChartEngine::set_container_bounds`], the container follows the
    /// configured size.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.tooltip.set_placement(config.tooltip_position);
        self.tooltip.set_size(config.tooltip_size);
        if !self.container_pinned {
            self.follow_chart_size(config.width, config.height);
        }
        self.config = config;
        self.invalidate();
    }

    #[must_use]
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn set_data(&mut self, rows: Vec<SeriesRow>) {
        debug!(count = rows.len(), "set data");
        self.rows = rows;
        self.invalidate();
    }

    /// Sets where the chart canvas sits in host coordinates; tooltips are
    /// clamped to these bounds.
    pub fn set_container_bounds(&mut self, container: Bounds) {
        self.container_pinned = true;
        self.container = container;
        self.tooltip.set_container(container);
    }

    #[must_use]
    pub fn container_bounds(&self) -> Bounds {
        self.container
    }

    /// Model of the last successful render.
    #[must_use]
    pub fn model(&self) -> Option<&ChartModel> {
        self.model.as_ref()
    }

    /// Frame of the last successful render.
    #[must_use]
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn hit_regions(&self) -> &[HitRegion] {
        match &self.frame {
            Some(frame) => frame.hit_regions.as_slice(),
            None => &[],
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let model = build_chart_model(&self.rows, &self.config)?;
        let frame = build_render_frame(&self.rows, &model, &self.config.color_scheme)?;
        self.renderer.render(&frame)?;
        trace!(hit_regions = frame.hit_regions.len(), "render pass complete");
        if !self.container_pinned {
            // Compact bar charts grow past the configured width.
            self.follow_chart_size(model.layout.outer_width, self.config.height);
        }
        self.model = Some(model);
        self.frame = Some(frame);
        Ok(())
    }

    /// Resolves `event` against the last frame's hit regions and advances the
    /// tooltip state.
    pub fn handle_interaction(&mut self, event: InteractionEvent) -> ChartResult<TooltipState> {
        let tooltip_event = match event {
            InteractionEvent::PointerEnter(region) => {
                TooltipEvent::PointerEnter(self.anchor(region)?)
            }
            InteractionEvent::Focus(region) => TooltipEvent::Focus(self.anchor(region)?),
            InteractionEvent::PointerLeave => TooltipEvent::PointerLeave,
            InteractionEvent::Blur => TooltipEvent::Blur,
        };
        let state = self.tooltip.handle(tooltip_event);
        trace!(visible = state.is_visible(), "tooltip transition");
        Ok(state)
    }

    #[must_use]
    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip.state()
    }

    /// Content for the tooltip currently shown, if any.
    #[must_use]
    pub fn tooltip_content(&self) -> Option<TooltipContent> {
        let TooltipState::Shown { date_index, .. } = self.tooltip.state() else {
            return None;
        };
        let model = self.model.as_ref()?;
        tooltip_content(model, date_index, &self.config.color_scheme)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Hit region bounds moved from plot space into container space.
    fn anchor(&self, region: usize) -> ChartResult<TooltipAnchor> {
        let (Some(model), Some(hit)) = (self.model.as_ref(), self.hit_regions().get(region)) else {
            return Err(ChartError::InvalidData(format!(
                "hit region {region} does not exist in the last rendered frame"
            )));
        };
        let margin = model.layout.margin;
        Ok(TooltipAnchor {
            target: hit
                .bounds
                .translate(self.container.x + margin.left, self.container.y + margin.top),
            element_width_ratio: hit.element_width_ratio,
            date_index: hit.date_index,
        })
    }

    fn follow_chart_size(&mut self, width: f64, height: f64) {
        self.container = Bounds::new(0.0, 0.0, width, height);
        self.tooltip.set_container(self.container);
    }

    fn invalidate(&mut self) {
        self.model = None;
        self.frame = None;
        self.tooltip.hide();
    }
}
