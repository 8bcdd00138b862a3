use serde::Serialize;

use crate::core::ChartLayout;
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;
use crate::render::Renderer;

use super::ChartEngine;
use super::chart_model::{ChartModel, ChartParams, ChartScales};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of one render pass, used by regression tests and host
/// debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub chart_params: ChartParams,
    pub layout: ChartLayout,
    pub scales: ChartScales,
    pub tooltip: TooltipState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    #[must_use]
    pub fn new(model: &ChartModel, tooltip: TooltipState) -> Self {
        Self {
            chart_params: model.chart_params.clone(),
            layout: model.layout,
            scales: model.scales.clone(),
            tooltip,
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart snapshot contract v1: {e}"))
        })
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Snapshot of the last render; `None` before the first render.
    #[must_use]
    pub fn snapshot(&self) -> Option<ChartSnapshot> {
        self.model()
            .map(|model| ChartSnapshot::new(model, self.tooltip_state()))
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let snapshot = self.snapshot().ok_or_else(|| {
            ChartError::InvalidData("chart has not been rendered yet".to_owned())
        })?;
        snapshot.to_json_contract_v1_pretty()
    }
}
