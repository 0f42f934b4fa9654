//! 2D ray casting against line-segment obstacles.
//!
//! A [`Camera`] sweeps a fan of [`Ray`]s across its field of view and reports
//! the nearest [`Boundary`] hit for each one, every frame.

pub mod angle;
pub mod boundary;
pub mod camera;
pub mod error;
pub mod ray;
pub mod scene;
pub mod vector;

pub use angle::{Degrees, Radians};
pub use boundary::{Boundary, Endpoints};
pub use camera::{Camera, CameraConfig, Command, Movement, Sight, SpeedChange, Turn};
pub use error::{ConfigError, GeometryError};
pub use ray::{Hit, Ray};
pub use scene::{Bounds, Scene};
pub use vector::{Directed, PlanarVector};
