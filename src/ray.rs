use crate::angle::Radians;
use crate::boundary::Boundary;
use crate::vector::{Directed, PlanarVector};
use glam::DVec2;
use std::f64::consts::PI;

// slack for the rounding of degree to radian conversions
const PARALLEL_EPSILON: f64 = 1e-12;

/// Same or opposite direction. `sin(π)` is not exactly zero, so opposite
/// directions are compared on the stored angles rather than the unit vectors.
fn is_parallel(a: Radians, b: Radians) -> bool {
    let gap = (a - b).get() % PI;
    gap < PARALLEL_EPSILON || PI - gap < PARALLEL_EPSILON
}

/// Where a ray stopped and how far it travelled to get there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: DVec2,
    pub distance: f64,
}

/// A sighting direction.
///
/// The stored vector is always anchored at the origin; the caster supplies
/// the real starting point on every query so rays never need repositioning
/// when the observer moves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    vector: PlanarVector,
}

impl Ray {
    pub fn new(direction: Radians) -> Self {
        Self {
            vector: PlanarVector {
                origin: DVec2::ZERO,
                direction,
            },
        }
    }

    pub fn set_direction(&mut self, direction: Radians) {
        self.vector.direction = direction;
    }

    pub fn rotate(&mut self, delta: Radians) {
        self.vector.direction = self.vector.direction + delta;
    }

    /// Intersects the half-line starting at `origin` with `boundary`.
    ///
    /// Parallel lines never intersect, collinear ones included. Hits on either
    /// end of the segment, or exactly at `origin`, are kept.
    pub fn intersect(&self, origin: DVec2, boundary: &Boundary) -> Option<DVec2> {
        if is_parallel(self.direction(), boundary.direction()) {
            return None;
        }

        let r = self.unit();
        let along = boundary.unit();
        let cross = r.perp_dot(along);
        if cross == 0.0 {
            return None;
        }

        let s = along * boundary.length();
        let denominator = cross * boundary.length();
        let q = boundary.endpoints().start() - origin;

        let t = q.perp_dot(s) / denominator;
        let u = q.perp_dot(r) / denominator;

        if (0.0..=1.0).contains(&u) && t >= 0.0 {
            Some(origin + r * t)
        } else {
            None
        }
    }

    /// The closest hit from `origin` over `boundaries`.
    ///
    /// Equal distances keep whichever boundary came first.
    pub fn nearest<'a, I>(&self, origin: DVec2, boundaries: I) -> Option<Hit>
    where
        I: IntoIterator<Item = &'a Boundary>,
    {
        let mut nearest: Option<Hit> = None;
        for boundary in boundaries {
            let Some(point) = self.intersect(origin, boundary) else {
                continue;
            };
            let distance = origin.distance(point);
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(Hit { point, distance });
            }
        }
        nearest
    }
}

impl Directed for Ray {
    fn vector(&self) -> &PlanarVector {
        &self.vector
    }
}
