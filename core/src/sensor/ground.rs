use crate::interface::BoundingBox;
use crate::math::{GeoPoint, SignedEast};
use crate::sensor::SensorTelemetry;
use serde::{Deserialize, Serialize};

/// Bearing cone for a target seen by a forward-facing camera.
///
/// A single forward view cannot resolve range, so the target is reported as
/// a sector anchored at the sensor's own position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTarget {
    pub origin: GeoPoint,
    pub cone_direction_deg: f64,
    pub cone_angle_deg: f64,
    pub cone_radius_m: f64,
}

/// Handheld or fixed ground camera looking roughly at the horizon.
#[derive(Debug, Clone)]
pub struct GroundSensor {
    telemetry: SensorTelemetry,
    cone_radius_m: f64,
}

impl GroundSensor {
    pub fn new(telemetry: SensorTelemetry, cone_radius_m: f64) -> Self {
        Self {
            telemetry,
            cone_radius_m,
        }
    }

    pub fn telemetry(&self) -> &SensorTelemetry {
        &self.telemetry
    }

    pub fn cone_radius_m(&self) -> f64 {
        self.cone_radius_m
    }

    /// Direction of the cone axis.
    ///
    /// The horizontal offset from boresight is interpolated linearly across
    /// the field of view instead of going through a perspective `atan`.
    pub fn cone_direction(&self, bbox: &BoundingBox) -> SignedEast {
        let center = bbox.left + bbox.width / 2.0 - 0.5;
        let off_boresight = self.telemetry.horizontal_fov * center;
        self.telemetry
            .yaw
            .to_compass_east()
            .rotated(off_boresight)
            .to_signed_east()
    }

    /// Angular width of the cone in radians.
    pub fn cone_angle(&self, bbox: &BoundingBox) -> f64 {
        bbox.width * self.telemetry.horizontal_fov
    }

    pub fn locate(&self, bbox: &BoundingBox) -> GroundTarget {
        GroundTarget {
            origin: self.telemetry.position,
            cone_direction_deg: self.cone_direction(bbox).degrees(),
            cone_angle_deg: self.cone_angle(bbox).to_degrees(),
            cone_radius_m: self.cone_radius_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::DEFAULT_CONE_RADIUS_M;
    use crate::sensor::fixtures::telemetry;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn sensor(yaw: f64) -> GroundSensor {
        GroundSensor::new(telemetry(yaw), DEFAULT_CONE_RADIUS_M)
    }

    #[test]
    fn centred_box_points_along_the_camera() {
        let centred = BoundingBox::new(0.4, 0.3, 0.2, 0.4);
        assert_abs_diff_eq!(
            sensor(0.0).cone_direction(&centred).radians(),
            0.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            sensor(0.5 * PI).cone_direction(&centred).radians(),
            0.5 * PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn off_centre_box_shifts_linearly_with_fov() {
        let sensor = sensor(0.0);
        let right = BoundingBox::new(0.6, 0.3, 0.2, 0.4);
        let expected = -(sensor.telemetry().horizontal_fov * 0.2);
        assert_abs_diff_eq!(
            sensor.cone_direction(&right).radians(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn left_of_centre_wraps_through_the_positive_branch() {
        let sensor = sensor(0.0);
        let left = BoundingBox::new(0.0, 0.3, 0.2, 0.4);
        let offset = sensor.telemetry().horizontal_fov * 0.4;
        assert_abs_diff_eq!(
            sensor.cone_direction(&left).radians(),
            offset,
            epsilon = 1e-12
        );
    }

    #[test]
    fn cone_angle_scales_with_box_width() {
        let sensor = sensor(0.0);
        let narrow = sensor.cone_angle(&BoundingBox::new(0.1, 0.1, 0.1, 0.3));
        let wide = sensor.cone_angle(&BoundingBox::new(0.1, 0.1, 0.2, 0.3));
        assert_abs_diff_eq!(wide, 2.0 * narrow, epsilon = 1e-12);
    }

    #[test]
    fn located_cone_is_anchored_at_sensor() {
        let target = sensor(0.0).locate(&BoundingBox::new(0.4, 0.3, 0.2, 0.4));
        assert_eq!(target.origin, GeoPoint::new(0.0, 0.0));
        assert_eq!(target.cone_radius_m, DEFAULT_CONE_RADIUS_M);
        assert_abs_diff_eq!(target.cone_angle_deg, 0.2 * 75.5, epsilon = 1e-9);
    }
}
