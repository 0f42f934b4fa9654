//! Static line-segment obstacles.

use crate::angle::Radians;
use crate::error::GeometryError;
use crate::vector::{Directed, PlanarVector};
use glam::DVec2;

/// The two ends of a boundary, `(x0, y0)` being the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoints {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Endpoints {
    pub fn start(&self) -> DVec2 {
        DVec2::new(self.x0, self.y0)
    }

    pub fn end(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }
}

/// A segment laid out from an origin along a direction for `length` units.
///
/// Boundaries never change after construction; a scene that needs different
/// obstacles builds a new set. Zero-length segments are rejected up front, so
/// every boundary has two distinct endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    vector: PlanarVector,
    length: f64,
    endpoints: Endpoints,
}

impl Boundary {
    pub fn new(x: f64, y: f64, length: f64, direction: Radians) -> Result<Self, GeometryError> {
        for (what, value) in [("x", x), ("y", y), ("direction", direction.get())] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { what, value });
            }
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(GeometryError::InvalidLength(length));
        }

        Ok(Self::from_trusted(x, y, length, direction))
    }

    /// Builds a boundary from values already known to be finite, with a
    /// positive length.
    pub(crate) fn from_trusted(x: f64, y: f64, length: f64, direction: Radians) -> Self {
        debug_assert!(length.is_finite() && length > 0.0, "bad length {length}");

        let vector = PlanarVector::new(x, y, direction);
        let end = vector.point_at(length);

        Self {
            vector,
            length,
            endpoints: Endpoints {
                x0: x,
                y0: y,
                x1: end.x,
                y1: end.y,
            },
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }
}

impl Directed for Boundary {
    fn vector(&self) -> &PlanarVector {
        &self.vector
    }
}
