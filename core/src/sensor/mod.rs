//! Sensor models that project a normalized image detection into the world.

pub mod aerial;
pub mod ground;

pub use aerial::{AerialSensor, AerialTarget, GroundProjection};
pub use ground::{GroundSensor, GroundTarget};

use crate::interface::BoundingBox;
use crate::math::{GeoPoint, GeodesicSolver, MathAngle};
use crate::prelude::LocatorConfig;
use serde::{Deserialize, Serialize};

/// Telemetry captured with an image.
///
/// Callers are expected to have range-checked the values: both fields of view
/// are positive and expressed in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorTelemetry {
    pub position: GeoPoint,
    pub yaw: MathAngle,
    pub horizontal_fov: f64,
    pub vertical_fov: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Aerial,
    Ground,
}

/// Closed set of supported sensor geometries.
#[derive(Debug, Clone)]
pub enum SensorModel {
    Aerial(AerialSensor),
    Ground(GroundSensor),
}

/// One located target, shaped by the sensor that observed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetFix {
    Aerial(AerialTarget),
    Ground(GroundTarget),
}

impl SensorModel {
    pub fn aerial(telemetry: SensorTelemetry, altitude_m: f64, config: &LocatorConfig) -> Self {
        SensorModel::Aerial(AerialSensor::new(
            telemetry,
            altitude_m,
            GeodesicSolver::new(config.earth_radius_km),
        ))
    }

    pub fn ground(telemetry: SensorTelemetry, config: &LocatorConfig) -> Self {
        SensorModel::Ground(GroundSensor::new(telemetry, config.cone_radius_m))
    }

    pub fn kind(&self) -> SensorKind {
        match self {
            SensorModel::Aerial(_) => SensorKind::Aerial,
            SensorModel::Ground(_) => SensorKind::Ground,
        }
    }

    pub fn telemetry(&self) -> &SensorTelemetry {
        match self {
            SensorModel::Aerial(sensor) => sensor.telemetry(),
            SensorModel::Ground(sensor) => sensor.telemetry(),
        }
    }

    pub fn locate(&self, bbox: &BoundingBox) -> TargetFix {
        match self {
            SensorModel::Aerial(sensor) => TargetFix::Aerial(sensor.locate(bbox)),
            SensorModel::Ground(sensor) => TargetFix::Ground(sensor.locate(bbox)),
        }
    }
}
