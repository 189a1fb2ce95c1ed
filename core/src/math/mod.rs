pub mod angle;
pub mod geodesic;

pub use angle::{normalize_to_2pi, Bearing, CompassEast, MathAngle, SignedEast};
pub use geodesic::{GeoPoint, GeodesicSolver, EARTH_RADIUS_KM};
