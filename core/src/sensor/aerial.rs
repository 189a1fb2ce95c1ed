use crate::interface::BoundingBox;
use crate::math::{Bearing, GeoPoint, GeodesicSolver, MathAngle};
use crate::sensor::SensorTelemetry;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Ground offset of a detection relative to the point below the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundProjection {
    pub distance_m: f64,
    pub bearing: Bearing,
}

/// Estimated ground position of a target seen from above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerialTarget {
    pub position: GeoPoint,
    pub distance_m: f64,
    pub bearing: Bearing,
}

/// Downward-looking sensor with known altitude.
#[derive(Debug, Clone)]
pub struct AerialSensor {
    telemetry: SensorTelemetry,
    altitude_m: f64,
    heading: Bearing,
    solver: GeodesicSolver,
}

impl AerialSensor {
    pub fn new(telemetry: SensorTelemetry, altitude_m: f64, solver: GeodesicSolver) -> Self {
        let heading = telemetry.yaw.to_compass_east().to_bearing();
        Self {
            telemetry,
            altitude_m,
            heading,
            solver,
        }
    }

    pub fn telemetry(&self) -> &SensorTelemetry {
        &self.telemetry
    }

    pub fn altitude_m(&self) -> f64 {
        self.altitude_m
    }

    /// Sensor heading as a compass bearing.
    pub fn heading(&self) -> Bearing {
        self.heading
    }

    /// Ground extent covered by the image along each axis, in meters.
    ///
    /// Treats each field of view as a circular arc of radius `altitude`
    /// rather than the flat projection `2·alt·tan(fov/2)`.
    pub fn footprint_m(&self) -> (f64, f64) {
        let arc = |fov_rad: f64| 2.0 * PI * self.altitude_m * (fov_rad.to_degrees() / 360.0);
        (
            arc(self.telemetry.horizontal_fov),
            arc(self.telemetry.vertical_fov),
        )
    }

    /// Projects an image point given relative to the frame centre, with
    /// `y` pointing up, onto the ground.
    pub fn project_offset(&self, x: f64, y: f64) -> GroundProjection {
        let (footprint_h, footprint_v) = self.footprint_m();
        let dx = x * footprint_h;
        let dy = y * footprint_v;
        let distance_m = (dx * dx + dy * dy).sqrt();

        let relative = MathAngle::of_vector(dx, dy).to_compass_east().to_bearing();
        GroundProjection {
            distance_m,
            bearing: relative.offset_by(self.heading),
        }
    }

    pub fn project_detection(&self, bbox: &BoundingBox) -> GroundProjection {
        let (x, y) = bbox.centered_offset();
        self.project_offset(x, y)
    }

    /// Locates a detection relative to an explicit origin.
    pub fn locate_from(&self, bbox: &BoundingBox, origin: GeoPoint) -> AerialTarget {
        let projection = self.project_detection(bbox);
        AerialTarget {
            position: self
                .solver
                .destination(origin, projection.distance_m, projection.bearing),
            distance_m: projection.distance_m,
            bearing: projection.bearing,
        }
    }

    pub fn locate(&self, bbox: &BoundingBox) -> AerialTarget {
        self.locate_from(bbox, self.telemetry.position)
    }
}
