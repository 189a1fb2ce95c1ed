pub mod detection;
pub mod metadata;
pub mod provenance;
pub mod record;

pub use detection::{BoundingBox, DetectedLabel, DetectionResponse, LabelInstance};
pub use metadata::SensorMetadata;
pub use provenance::{Provenance, ProvenanceEntry};
pub use record::{SensorRecord, TargetRecord};
