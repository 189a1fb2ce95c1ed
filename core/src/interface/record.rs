use crate::interface::{Provenance, SensorMetadata};
use crate::sensor::{SensorKind, TargetFix};
use serde::{Deserialize, Serialize};

/// Search-index document for one located target.
///
/// Field names and the `"lat,lon"` location form are consumed by other
/// systems and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub sensor_id: String,
    pub sensor_type: String,
    pub timestamp: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cone_angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cone_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cone_direction: Option<String>,
    pub provenance: String,
}

impl TargetRecord {
    pub fn from_fix(metadata: &SensorMetadata, fix: &TargetFix, provenance: &Provenance) -> Self {
        let (location, cone) = match fix {
            TargetFix::Aerial(target) => (target.position.location_string(), None),
            TargetFix::Ground(target) => (target.origin.location_string(), Some(target)),
        };
        Self {
            sensor_id: metadata.sensor_id.clone(),
            sensor_type: metadata.sensor_type.clone(),
            timestamp: metadata.timestamp.clone(),
            location,
            cone_angle: cone.map(|target| target.cone_angle_deg.to_string()),
            cone_radius: cone.map(|target| target.cone_radius_m.to_string()),
            cone_direction: cone.map(|target| target.cone_direction_deg.to_string()),
            provenance: provenance.to_string(),
        }
    }
}

/// Search-index document describing the sensor state for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub sensor_id: String,
    pub sensor_type: String,
    pub timestamp: String,
    pub location: String,
    pub yaw: String,
    pub fov: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
    pub provenance: String,
}

impl SensorRecord {
    pub fn from_metadata(metadata: &SensorMetadata, provenance: &Provenance) -> Self {
        Self {
            sensor_id: metadata.sensor_id.clone(),
            sensor_type: metadata.sensor_type.clone(),
            timestamp: metadata.timestamp.clone(),
            location: metadata.telemetry.position.location_string(),
            yaw: metadata.telemetry.yaw.radians().to_string(),
            fov: match metadata.kind {
                SensorKind::Aerial => metadata.telemetry.horizontal_fov.to_degrees().to_string(),
                SensorKind::Ground => metadata.telemetry.horizontal_fov.to_string(),
            },
            altitude: metadata.altitude_m.map(|altitude| altitude.to_string()),
            provenance: provenance.to_string(),
        }
    }
}
