use anyhow::Context;
use geotarget_core::interface::DetectionResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One uploaded image as seen by the pipeline: where it landed, the
/// metadata stored with it and what the labeling service returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestEvent {
    pub object_key: String,
    pub user_metadata: HashMap<String, String>,
    pub received_at_ms: u64,
    #[serde(default)]
    pub detections: DetectionResponse,
    /// Set when the labeling call failed for this image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_error: Option<String>,
}

pub fn load_events<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<IngestEvent>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading ingest events {}", path_ref.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing ingest events {}", path_ref.display()))
}
