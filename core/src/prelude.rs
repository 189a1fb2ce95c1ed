use crate::math::geodesic::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// Default radius reported for ground bearing cones, in meters.
pub const DEFAULT_CONE_RADIUS_M: f64 = 100.0;

/// Tunables shared by every sensor model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub cone_radius_m: f64,
    pub earth_radius_km: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            cone_radius_m: DEFAULT_CONE_RADIUS_M,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

/// What the pipeline should do after an ingest failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    SkipImage,
    AbortBatch,
}

/// Failures raised around the geolocation core by its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("invalid telemetry: {0}")]
    InvalidTelemetry(String),
    #[error("invalid ingest index: {0}")]
    InvalidIndex(String),
    #[error("detector failure: {0}")]
    Detector(String),
    #[error("sink failure: {0}")]
    Sink(String),
}

impl IngestError {
    pub fn disposition(&self) -> Disposition {
        match self {
            IngestError::InvalidTelemetry(_)
            | IngestError::InvalidIndex(_)
            | IngestError::Detector(_) => Disposition::SkipImage,
            IngestError::Sink(_) => Disposition::AbortBatch,
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;

pub use crate::interface::{BoundingBox, Provenance, SensorMetadata, TargetRecord};
pub use crate::math::{Bearing, GeoPoint, MathAngle};
pub use crate::processing::TargetLocator;
pub use crate::sensor::{SensorKind, SensorModel, SensorTelemetry, TargetFix};
