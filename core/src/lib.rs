//! Geolocation core for person detections.
//!
//! Bounding boxes from an image labeling service are combined with the
//! telemetry captured alongside the image to estimate where the detected
//! people are. Aerial sensors resolve a ground coordinate; forward-facing
//! ground sensors resolve a bearing cone only.

pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod sensor;
pub mod telemetry;

pub use prelude::{Disposition, IngestError, IngestResult, LocatorConfig};
