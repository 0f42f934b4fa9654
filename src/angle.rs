//! Angle arithmetic in degrees and radians.
//!
//! Every angle that leaves this module sits in its canonical half-open range,
//! `[0, 360)` for degrees and `[0, 2π)` for radians. Wrapping is floored, so
//! `-10°` becomes `350°` instead of clamping to zero.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Neg, Sub};

const FULL_TURN_DEGREES: f64 = 360.0;

// `rem_euclid` can round a tiny negative input up to exactly the modulus.
fn wrap(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    if wrapped >= modulus {
        0.0
    } else {
        wrapped
    }
}

/// Wraps any radian value into `[0, 2π)`.
pub fn normalize_radians(a: f64) -> f64 {
    wrap(a, TAU)
}

/// Wraps any degree value into `[0, 360)`.
pub fn normalize_degrees(a: f64) -> f64 {
    wrap(a, FULL_TURN_DEGREES)
}

/// Sum of two radian values, wrapped. Subtract by negating `b`.
pub fn add_radians(a: f64, b: f64) -> f64 {
    normalize_radians(a + b)
}

/// Sum of two degree values, wrapped. Subtract by negating `b`.
pub fn add_degrees(a: f64, b: f64) -> f64 {
    normalize_degrees(a + b)
}

/// Normalizes `d` and converts it to radians.
pub fn degrees_to_radians(d: f64) -> f64 {
    normalize_radians(normalize_degrees(d) * PI / 180.0)
}

/// Normalizes `r` and converts it to degrees.
pub fn radians_to_degrees(r: f64) -> f64 {
    normalize_degrees(normalize_radians(r) * 180.0 / PI)
}

/// An angle in degrees, canonical by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degrees(f64);

impl Degrees {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        Self(normalize_degrees(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn to_radians(self) -> Radians {
        Radians::from(self)
    }
}

/// An angle in radians, canonical by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians(f64);

impl Radians {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        Self(normalize_radians(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn to_degrees(self) -> Degrees {
        Degrees::from(self)
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Self {
        Self(degrees_to_radians(d.0))
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Self {
        Self(radians_to_degrees(r.0))
    }
}

macro_rules! angle_ops {
    ($ty:ident, $add:ident, $unit:literal) => {
        impl Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self($add(self.0, rhs.0))
            }
        }

        impl Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self($add(self.0, -rhs.0))
            }
        }

        impl Neg for $ty {
            type Output = Self;

            fn neg(self) -> Self {
                Self::new(-self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2}{}", self.0, $unit)
            }
        }
    };
}

angle_ops!(Degrees, add_degrees, "°");
angle_ops!(Radians, add_radians, "rad");
