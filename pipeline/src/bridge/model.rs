use geotarget_core::interface::TargetRecord;
use geotarget_core::telemetry::MetricsSnapshot;
use serde::{Deserialize, Serialize};

/// State served to dashboards polling the bridge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeModel {
    pub targets: Vec<TargetRecord>,
    pub skipped: usize,
    pub metrics: MetricsSnapshot,
    pub status: String,
}
