use crate::angle::Radians;
use glam::DVec2;

/// A point in the plane with a direction attached.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanarVector {
    pub origin: DVec2,
    pub direction: Radians,
}

impl PlanarVector {
    pub fn new(x: f64, y: f64, direction: Radians) -> Self {
        Self {
            origin: DVec2::new(x, y),
            direction,
        }
    }

    /// Unit vector pointing along `direction`.
    pub fn unit(&self) -> DVec2 {
        DVec2::from_angle(self.direction.get())
    }

    /// The point `distance` units from the origin along `direction`.
    pub fn point_at(&self, distance: f64) -> DVec2 {
        self.origin + self.unit() * distance
    }
}

/// Anything that carries a planar direction.
pub trait Directed {
    fn vector(&self) -> &PlanarVector;

    fn direction(&self) -> Radians {
        self.vector().direction
    }

    fn unit(&self) -> DVec2 {
        self.vector().unit()
    }
}

impl Directed for PlanarVector {
    fn vector(&self) -> &PlanarVector {
        self
    }
}
