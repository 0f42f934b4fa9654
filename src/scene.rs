//! Obstacle sets and the rectangle they live in.

use crate::angle::Degrees;
use crate::boundary::Boundary;
use crate::error::GeometryError;
use glam::DVec2;
use rand::Rng;

const MIN_OBSTACLE_LENGTH: f64 = 50.0;
const MAX_OBSTACLE_LENGTH: f64 = 1000.0;

/// Width and height of the visible plane, anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width, self.height) / 2.0
    }

    /// The four sides, laid out clockwise on screen from the top edge.
    pub fn edges(&self) -> [Boundary; 4] {
        let (w, h) = (self.width, self.height);
        let side = |x, y, length, deg: f64| {
            Boundary::from_trusted(x, y, length, Degrees::new(deg).to_radians())
        };
        [
            side(0.0, 0.0, w, 0.0),
            side(0.0, 0.0, h, 90.0),
            side(w, h, w, 180.0),
            side(w, h, h, 270.0),
        ]
    }
}

/// The boundary set seen by the camera: the rectangle's edges followed by
/// randomly placed obstacles.
///
/// Every change rebuilds the whole set; individual boundaries are never
/// edited.
#[derive(Clone, Debug)]
pub struct Scene {
    bounds: Bounds,
    obstacles: usize,
    boundaries: Vec<Boundary>,
}

impl Scene {
    pub fn generate<R: Rng + ?Sized>(bounds: Bounds, obstacles: usize, rng: &mut R) -> Self {
        let mut this = Self {
            bounds,
            obstacles,
            boundaries: Vec::with_capacity(obstacles + 4),
        };
        this.regenerate(rng);
        this
    }

    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut boundaries = Vec::with_capacity(self.obstacles + 4);
        boundaries.extend(self.bounds.edges());
        boundaries.extend((0..self.obstacles).map(|_| random_obstacle(self.bounds, rng)));

        log::debug!(
            "generated {} boundaries in {}x{}",
            boundaries.len(),
            self.bounds.width,
            self.bounds.height
        );
        self.boundaries = boundaries;
    }

    pub fn add_obstacle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles += 1;
        self.regenerate(rng);
    }

    /// Rebuilds with one obstacle fewer. The edges always stay.
    pub fn remove_obstacle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles = self.obstacles.saturating_sub(1);
        self.regenerate(rng);
    }

    /// Moves to a `width` by `height` plane. Sizes `Bounds::new` rejects
    /// leave the scene as it was.
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Result<(), GeometryError> {
        self.bounds = Bounds::new(width, height)?;
        self.regenerate(rng);
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn obstacles(&self) -> usize {
        self.obstacles
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }
}

fn random_obstacle<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Boundary {
    let x = rng.gen_range(0.0..bounds.width);
    let y = rng.gen_range(0.0..bounds.height);
    let length = rng.gen_range(MIN_OBSTACLE_LENGTH..MAX_OBSTACLE_LENGTH);
    let direction = Degrees::new(rng.gen_range(0.0..360.0)).to_radians();

    Boundary::from_trusted(x, y, length, direction)
}
