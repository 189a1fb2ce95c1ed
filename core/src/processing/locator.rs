use crate::interface::{BoundingBox, SensorMetadata};
use crate::prelude::{IngestResult, LocatorConfig};
use crate::sensor::{SensorModel, TargetFix};
use crate::telemetry::log::LogManager;

/// Maps every detection of one image to a target fix.
///
/// Holds no mutable state; the same locator can be shared across threads
/// and its output re-iterated freely.
pub struct TargetLocator {
    model: SensorModel,
    logger: LogManager,
}

impl TargetLocator {
    pub fn new(model: SensorModel) -> Self {
        Self {
            model,
            logger: LogManager::new("locator"),
        }
    }

    pub fn from_metadata(metadata: &SensorMetadata, config: &LocatorConfig) -> IngestResult<Self> {
        Ok(Self::new(metadata.to_sensor_model(config)?))
    }

    pub fn model(&self) -> &SensorModel {
        &self.model
    }

    pub fn locate(&self, bbox: &BoundingBox) -> TargetFix {
        let fix = self.model.locate(bbox);
        self.logger.trace(format_args!("{:?} -> {:?}", bbox, fix));
        fix
    }

    /// Lazily locates `boxes` in detector order.
    pub fn locate_all<'a>(
        &'a self,
        boxes: &'a [BoundingBox],
    ) -> impl Iterator<Item = TargetFix> + Clone + 'a {
        boxes.iter().map(move |bbox| self.locate(bbox))
    }
}
