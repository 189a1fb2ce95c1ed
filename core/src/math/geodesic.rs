use crate::math::angle::Bearing;
use serde::{Deserialize, Serialize};

/// Equatorial radius used as the sphere radius for short-range projections.
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Comma-joined `"lat,lon"` form consumed by the search index.
    pub fn location_string(&self) -> String {
        format!("{},{}", self.latitude_deg, self.longitude_deg)
    }
}

/// Solves the direct geodesic problem on a sphere of fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicSolver {
    radius_km: f64,
}

impl GeodesicSolver {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Point reached by travelling `distance_m` from `origin` along `bearing`.
    ///
    /// Behaviour at the poles is not defined.
    pub fn destination(&self, origin: GeoPoint, distance_m: f64, bearing: Bearing) -> GeoPoint {
        let delta = distance_m / 1000.0 / self.radius_km;
        let theta = bearing.radians();
        let lat1 = origin.latitude_deg.to_radians();
        let lon1 = origin.longitude_deg.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
    }
}

impl Default for GeodesicSolver {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ORIGIN: GeoPoint = GeoPoint {
        latitude_deg: 0.0,
        longitude_deg: 0.0,
    };

    #[test]
    fn cardinal_bearings_move_the_expected_axis() {
        let solver = GeodesicSolver::default();

        let north = solver.destination(ORIGIN, 100.0, Bearing::NORTH);
        assert!(north.latitude_deg > 0.0);
        assert_abs_diff_eq!(north.longitude_deg, 0.0, epsilon = 1e-9);

        let east = solver.destination(ORIGIN, 100.0, Bearing::EAST);
        assert_abs_diff_eq!(east.latitude_deg, 0.0, epsilon = 1e-9);
        assert!(east.longitude_deg > 0.0);

        let south = solver.destination(ORIGIN, 10_000.0, Bearing::SOUTH);
        assert!(south.latitude_deg < 0.0);
        assert_abs_diff_eq!(south.longitude_deg, 0.0, epsilon = 1e-9);

        let west = solver.destination(ORIGIN, 100.0, Bearing::WEST);
        assert_abs_diff_eq!(west.latitude_deg, 0.0, epsilon = 1e-9);
        assert!(west.longitude_deg < 0.0);
    }

    #[test]
    fn zero_distance_returns_origin() {
        let origin = GeoPoint::new(47.6, -122.3);
        let same = GeodesicSolver::default().destination(origin, 0.0, Bearing::new(1.0));
        assert_abs_diff_eq!(same.latitude_deg, origin.latitude_deg, epsilon = 1e-12);
        assert_abs_diff_eq!(same.longitude_deg, origin.longitude_deg, epsilon = 1e-12);
    }

    #[test]
    fn northward_step_matches_arc_length() {
        // one kilometre north is 1 / R radians of latitude
        let moved = GeodesicSolver::default().destination(ORIGIN, 1000.0, Bearing::NORTH);
        let expected = (1.0 / EARTH_RADIUS_KM).to_degrees();
        assert_abs_diff_eq!(moved.latitude_deg, expected, epsilon = 1e-12);
    }

    #[test]
    fn location_string_is_comma_joined() {
        assert_eq!(GeoPoint::new(1.5, -2.25).location_string(), "1.5,-2.25");
        assert_eq!(GeoPoint::new(0.0, 0.0).location_string(), "0,0");
        assert_eq!(GeoPoint::new(0.0001, 10.0).location_string(), "0.0001,10");
    }
}
