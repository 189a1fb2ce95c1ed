use crate::prelude::{IngestError, IngestResult};
use serde::{Deserialize, Serialize};

/// Normalized detection rectangle; origin top-left, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Box centre relative to the frame centre with `y` flipped to point up.
    pub fn centered_offset(&self) -> (f64, f64) {
        let (x, y) = self.center();
        (x - 0.5, 0.5 - y)
    }
}

/// Response body of the image labeling service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectionResponse {
    #[serde(default)]
    pub labels: Vec<DetectedLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectedLabel {
    pub name: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub instances: Vec<LabelInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelInstance {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub confidence: f32,
}

impl DetectionResponse {
    pub fn from_json(body: &str) -> IngestResult<Self> {
        serde_json::from_str(body).map_err(|err| IngestError::Detector(err.to_string()))
    }

    /// Boxes of every instance under an accepted label, in detector order.
    pub fn target_boxes(&self, labels: &[String], min_confidence: f32) -> Vec<BoundingBox> {
        self.labels
            .iter()
            .filter(|label| label.confidence >= min_confidence)
            .filter(|label| labels.iter().any(|name| name == &label.name))
            .flat_map(|label| label.instances.iter().map(|instance| instance.bounding_box))
            .collect()
    }
}
