//! The observer: a point with a heading that sweeps a fan of rays.
//!
//! Coordinates follow the window: x grows to the right and y grows downward,
//! so a positive angle turns clockwise on screen. Heading 0 looks along +x.
//! The fan starts at `heading + fov / 2` (the right-hand edge on screen) and
//! steps toward `heading - fov / 2`.

use crate::angle::{Degrees, Radians};
use crate::boundary::Boundary;
use crate::error::{ConfigError, GeometryError, Result};
use crate::ray::{Hit, Ray};
use crate::scene::Bounds;
use glam::DVec2;

const MIN_FOV: f64 = 1.0;
const MAX_FOV: f64 = 359.0;
const MIN_SPEED: f64 = 1.0;
// keeps the observer off the edge boundaries themselves
const EDGE_INSET: f64 = 1.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Movement {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpeedChange {
    Accelerate,
    Brake,
}

/// Everything the input layer can ask the camera to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Movement),
    Turn(Turn),
    Speed(SpeedChange),
    WidenFov,
    NarrowFov,
    AddRay,
    RemoveRay,
}

/// One ray's result for a frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sight {
    pub origin: DVec2,
    pub hit: Option<Hit>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CameraConfig {
    pub position: DVec2,
    /// degrees
    pub heading: f64,
    /// degrees, inside (0, 360)
    pub fov: f64,
    pub ray_count: usize,
    pub move_speed: f64,
    /// degrees per turn command
    pub turn_speed: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: 0.0,
            fov: 60.0,
            ray_count: 90,
            move_speed: 10.0,
            turn_speed: 5.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    position: DVec2,
    heading: Degrees,
    fov: f64,
    ray_count: usize,
    move_speed: f64,
    turn_speed: f64,
    rays: Vec<Ray>,
}

// planes thinner than two insets collapse onto the near inset
fn far_inset(bounds: Bounds) -> (f64, f64) {
    (
        (bounds.width() - EDGE_INSET).max(EDGE_INSET),
        (bounds.height() - EDGE_INSET).max(EDGE_INSET),
    )
}

fn check_fov(fov: f64) -> Result<f64> {
    if fov.is_finite() && fov > 0.0 && fov < 360.0 {
        Ok(fov)
    } else {
        Err(ConfigError::FieldOfView(fov))
    }
}

fn check_ray_count(count: usize) -> Result<usize> {
    if count >= 1 {
        Ok(count)
    } else {
        Err(ConfigError::RayCount(count))
    }
}

/// Ray directions for a fan, edges included.
fn fan(heading: Degrees, fov: f64, count: usize) -> Vec<Ray> {
    if count == 1 {
        return vec![Ray::new(heading.to_radians())];
    }

    let step = fov / (count - 1) as f64;
    let first = heading.get() + fov / 2.0;
    (0..count)
        .map(|i| Ray::new(Degrees::new(first - i as f64 * step).to_radians()))
        .collect()
}

impl Camera {
    pub fn new(config: CameraConfig) -> Result<Self> {
        let CameraConfig {
            position,
            heading,
            fov,
            ray_count,
            move_speed,
            turn_speed,
        } = config;

        for (what, value) in [("x", position.x), ("y", position.y), ("heading", heading)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { what, value }.into());
            }
        }
        if !(move_speed.is_finite() && move_speed >= MIN_SPEED) {
            return Err(ConfigError::Speed {
                what: "move speed",
                value: move_speed,
            });
        }
        if !(turn_speed.is_finite() && turn_speed > 0.0) {
            return Err(ConfigError::Speed {
                what: "turn speed",
                value: turn_speed,
            });
        }

        let mut this = Self {
            position,
            heading: Degrees::new(heading),
            fov: check_fov(fov)?,
            ray_count: check_ray_count(ray_count)?,
            move_speed,
            turn_speed,
            rays: Vec::new(),
        };
        this.regenerate_rays();
        Ok(this)
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn heading(&self) -> Degrees {
        self.heading
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    pub fn move_speed(&self) -> f64 {
        self.move_speed
    }

    pub fn turn_speed(&self) -> f64 {
        self.turn_speed
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Teleports without clamping, e.g. to recenter after a resize.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Rebuilds every ray from the current heading and field of view.
    pub fn regenerate_rays(&mut self) {
        self.rays = fan(self.heading, self.fov, self.ray_count);
        log::debug!(
            "built {} rays, heading {}, fov {}",
            self.rays.len(),
            self.heading,
            self.fov
        );
    }

    /// Sets the field of view and rebuilds the fan. Rejected values leave the
    /// camera untouched.
    pub fn set_fov(&mut self, fov: f64) -> Result<()> {
        let fov = check_fov(fov).inspect_err(|err| log::warn!("{err}"))?;
        self.fov = fov;
        self.regenerate_rays();
        Ok(())
    }

    /// Sets the ray count and rebuilds the fan. Rejected values leave the
    /// camera untouched.
    pub fn set_ray_count(&mut self, count: usize) -> Result<()> {
        let count = check_ray_count(count).inspect_err(|err| log::warn!("{err}"))?;
        self.ray_count = count;
        self.regenerate_rays();
        Ok(())
    }

    /// One degree wider, up to 359°.
    pub fn widen_fov(&mut self) {
        if self.fov < MAX_FOV {
            self.fov = (self.fov + 1.0).min(MAX_FOV);
            self.regenerate_rays();
        }
    }

    /// One degree narrower, down to 1°.
    pub fn narrow_fov(&mut self) {
        if self.fov > MIN_FOV {
            self.fov = (self.fov - 1.0).max(MIN_FOV);
            self.regenerate_rays();
        }
    }

    pub fn add_ray(&mut self) {
        self.ray_count += 1;
        self.regenerate_rays();
    }

    /// One ray fewer, never below one.
    pub fn remove_ray(&mut self) {
        if self.ray_count > 1 {
            self.ray_count -= 1;
            self.regenerate_rays();
        }
    }

    /// Turns by `delta` degrees, updating the existing rays in place.
    ///
    /// Gives the same directions as regenerating the fan at the new heading,
    /// up to rounding.
    pub fn rotate(&mut self, delta: f64) {
        self.heading = self.heading + Degrees::new(delta);
        let delta = Radians::from(Degrees::new(delta));
        for ray in &mut self.rays {
            ray.rotate(delta);
        }
    }

    pub fn turn(&mut self, turn: Turn) {
        match turn {
            Turn::Left => self.rotate(-self.turn_speed),
            Turn::Right => self.rotate(self.turn_speed),
        }
    }

    /// Steps by the move speed, stopping one unit inside `bounds`.
    pub fn walk(&mut self, movement: Movement, bounds: Bounds) {
        let speed = self.move_speed;
        let (max_x, max_y) = far_inset(bounds);
        let pos = &mut self.position;

        match movement {
            Movement::Up => {
                pos.y = if pos.y - speed > EDGE_INSET { pos.y - speed } else { EDGE_INSET }
            }
            Movement::Down => pos.y = if pos.y + speed < max_y { pos.y + speed } else { max_y },
            Movement::Left => {
                pos.x = if pos.x - speed > EDGE_INSET { pos.x - speed } else { EDGE_INSET }
            }
            Movement::Right => pos.x = if pos.x + speed < max_x { pos.x + speed } else { max_x },
        }
    }

    /// Pulls the position back inside `bounds`, e.g. after the plane shrank.
    pub fn confine(&mut self, bounds: Bounds) {
        let (max_x, max_y) = far_inset(bounds);
        let near = DVec2::splat(EDGE_INSET);
        self.position = self.position.clamp(near, DVec2::new(max_x, max_y));
    }

    pub fn change_speed(&mut self, change: SpeedChange) {
        match change {
            SpeedChange::Accelerate => self.move_speed += 1.0,
            SpeedChange::Brake if self.move_speed > MIN_SPEED => {
                self.move_speed = (self.move_speed - 1.0).max(MIN_SPEED)
            }
            SpeedChange::Brake => {}
        }
    }

    pub fn apply(&mut self, command: Command, bounds: Bounds) {
        log::trace!("applying {command:?}");
        match command {
            Command::Move(movement) => self.walk(movement, bounds),
            Command::Turn(turn) => self.turn(turn),
            Command::Speed(change) => self.change_speed(change),
            Command::WidenFov => self.widen_fov(),
            Command::NarrowFov => self.narrow_fov(),
            Command::AddRay => self.add_ray(),
            Command::RemoveRay => self.remove_ray(),
        }
    }

    /// Casts every ray against every boundary, writing one sight per ray.
    ///
    /// `sights` is cleared first so a frame loop can reuse its allocation.
    pub fn cast_into(&self, boundaries: &[Boundary], sights: &mut Vec<Sight>) {
        sights.clear();
        sights.extend(self.rays.iter().map(|ray| Sight {
            origin: self.position,
            hit: ray.nearest(self.position, boundaries),
        }));
    }

    pub fn cast(&self, boundaries: &[Boundary]) -> Vec<Sight> {
        let mut sights = Vec::with_capacity(self.rays.len());
        self.cast_into(boundaries, &mut sights);
        sights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Directed;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn bounds() -> Bounds {
        Bounds::new(640.0, 480.0).unwrap()
    }

    fn camera(heading: f64, fov: f64, ray_count: usize) -> Camera {
        Camera::new(CameraConfig {
            position: DVec2::new(320.0, 240.0),
            heading,
            fov,
            ray_count,
            ..CameraConfig::default()
        })
        .unwrap()
    }

    fn angular_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    fn directions(camera: &Camera) -> Vec<f64> {
        camera.rays().iter().map(|r| r.direction().get()).collect()
    }

    #[test]
    fn test_single_ray_points_at_heading() {
        let cam = camera(45.0, 60.0, 1);
        assert_eq!(cam.rays().len(), 1);
        assert_abs_diff_eq!(
            cam.rays()[0].direction().get(),
            Degrees::new(45.0).to_radians().get()
        );
    }

    #[test]
    fn test_fan_spans_fov() {
        let cam = camera(0.0, 60.0, 90);
        let dirs = directions(&cam);
        assert_eq!(dirs.len(), 90);
        assert_abs_diff_eq!(dirs[0], 30f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(dirs[89], (330f64).to_radians(), epsilon = 1e-9);

        let step = (60.0f64 / 89.0).to_radians();
        for pair in dirs.windows(2) {
            assert_abs_diff_eq!(angular_gap(pair[0], pair[1]), step, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rotate_matches_regenerate() {
        for (heading, delta) in [(0.0, 5.0), (10.0, -25.0), (350.0, 17.5), (180.0, -720.0)] {
            let mut rotated = camera(heading, 75.0, 31);
            rotated.rotate(delta);
            let fresh = camera(heading + delta, 75.0, 31);

            assert_abs_diff_eq!(
                rotated.heading().get(),
                fresh.heading().get(),
                epsilon = 1e-9
            );
            for (a, b) in directions(&rotated).iter().zip(directions(&fresh)) {
                assert!(angular_gap(*a, b) < 1e-9, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_turn_directions() {
        let mut cam = camera(0.0, 60.0, 3);
        cam.turn(Turn::Right);
        assert_abs_diff_eq!(cam.heading().get(), 5.0, epsilon = 1e-12);
        cam.turn(Turn::Left);
        cam.turn(Turn::Left);
        assert_abs_diff_eq!(cam.heading().get(), 355.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejected_settings_change_nothing() {
        let mut cam = camera(0.0, 60.0, 10);
        let before = directions(&cam);

        for fov in [0.0, -5.0, 360.0, 400.0, f64::NAN] {
            assert!(matches!(cam.set_fov(fov), Err(ConfigError::FieldOfView(_))));
        }
        assert_eq!(cam.set_ray_count(0), Err(ConfigError::RayCount(0)));

        assert_eq!(cam.fov(), 60.0);
        assert_eq!(cam.ray_count(), 10);
        assert_eq!(directions(&cam), before);
    }

    #[test]
    fn test_setters_rebuild_fan() {
        let mut cam = camera(90.0, 60.0, 10);
        cam.set_ray_count(3).unwrap();
        cam.set_fov(90.0).unwrap();

        let dirs = directions(&cam);
        assert_eq!(dirs.len(), 3);
        assert_abs_diff_eq!(dirs[0], 135f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(dirs[1], 90f64.to_radians(), epsilon = 1e-9);
        assert_abs_diff_eq!(dirs[2], 45f64.to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let bad = |config| Camera::new(config).is_err();
        let base = CameraConfig::default();
        assert!(bad(CameraConfig { fov: 0.0, ..base }));
        assert!(bad(CameraConfig { ray_count: 0, ..base }));
        assert!(bad(CameraConfig { move_speed: 0.5, ..base }));
        assert!(bad(CameraConfig { turn_speed: 0.0, ..base }));
        assert!(bad(CameraConfig { heading: f64::INFINITY, ..base }));
        assert!(!bad(base));
    }

    #[test]
    fn test_walk_clamps_to_inset() {
        let mut cam = camera(0.0, 60.0, 1);
        cam.set_position(DVec2::new(0.0, 0.0));
        cam.walk(Movement::Left, bounds());
        assert_eq!(cam.position().x, 1.0);
        cam.walk(Movement::Up, bounds());
        assert_eq!(cam.position().y, 1.0);

        cam.set_position(DVec2::new(635.0, 475.0));
        cam.walk(Movement::Right, bounds());
        cam.walk(Movement::Down, bounds());
        assert_eq!(cam.position(), DVec2::new(639.0, 479.0));

        cam.set_position(DVec2::new(100.0, 100.0));
        cam.walk(Movement::Right, bounds());
        cam.walk(Movement::Up, bounds());
        assert_eq!(cam.position(), DVec2::new(110.0, 90.0));
    }

    #[test]
    fn test_walk_stays_inside_tiny_bounds() {
        let tiny = Bounds::new(1.5, 1.5).unwrap();
        let mut cam = camera(0.0, 60.0, 1);
        cam.set_position(DVec2::ONE);
        cam.walk(Movement::Right, tiny);
        cam.walk(Movement::Down, tiny);
        assert_eq!(cam.position(), DVec2::ONE);

        cam.walk(Movement::Left, tiny);
        cam.walk(Movement::Up, tiny);
        assert_eq!(cam.position(), DVec2::ONE);
    }

    #[test]
    fn test_confine_after_shrink() {
        let mut cam = camera(0.0, 60.0, 1);
        cam.set_position(DVec2::new(600.0, -4.0));
        cam.confine(Bounds::new(200.0, 100.0).unwrap());
        assert_eq!(cam.position(), DVec2::new(199.0, 1.0));

        cam.confine(Bounds::new(0.5, 0.5).unwrap());
        assert_eq!(cam.position(), DVec2::ONE);
    }

    #[test]
    fn test_brake_floors_at_one() {
        let mut cam = Camera::new(CameraConfig {
            move_speed: 1.0,
            ..CameraConfig::default()
        })
        .unwrap();
        for _ in 0..3 {
            cam.change_speed(SpeedChange::Brake);
        }
        assert_eq!(cam.move_speed(), 1.0);

        cam.change_speed(SpeedChange::Accelerate);
        cam.change_speed(SpeedChange::Accelerate);
        assert_eq!(cam.move_speed(), 3.0);
        cam.change_speed(SpeedChange::Brake);
        assert_eq!(cam.move_speed(), 2.0);
    }

    #[test]
    fn test_fov_and_ray_steps() {
        let mut cam = camera(0.0, 359.0, 1);
        cam.apply(Command::WidenFov, bounds());
        assert_eq!(cam.fov(), 359.0);
        cam.apply(Command::RemoveRay, bounds());
        assert_eq!(cam.ray_count(), 1);

        cam.apply(Command::NarrowFov, bounds());
        cam.apply(Command::AddRay, bounds());
        assert_eq!(cam.fov(), 358.0);
        assert_eq!(cam.rays().len(), 2);

        let mut narrow = camera(0.0, 1.0, 4);
        narrow.apply(Command::NarrowFov, bounds());
        assert_eq!(narrow.fov(), 1.0);
    }

    #[test]
    fn test_cast_picks_nearest_and_reports_misses() {
        let near = Boundary::new(325.0, 200.0, 80.0, Degrees::new(90.0).to_radians()).unwrap();
        let far = Boundary::new(330.0, 200.0, 80.0, Degrees::new(90.0).to_radians()).unwrap();

        let cam = camera(0.0, 60.0, 1);
        let sights = cam.cast(&[far, near]);
        assert_eq!(sights.len(), 1);
        assert_eq!(sights[0].origin, cam.position());
        let hit = sights[0].hit.unwrap();
        assert_abs_diff_eq!(hit.distance, 5.0, epsilon = 1e-9);

        let away = camera(180.0, 10.0, 5);
        let sights = away.cast(&[far, near]);
        assert_eq!(sights.len(), 5);
        assert!(sights.iter().all(|s| s.hit.is_none()));
    }

    #[test]
    fn test_cast_into_reuses_buffer() {
        let cam = camera(0.0, 60.0, 7);
        let mut sights = vec![
            Sight {
                origin: DVec2::ZERO,
                hit: None,
            };
            20
        ];
        cam.cast_into(&bounds().edges(), &mut sights);
        assert_eq!(sights.len(), 7);
        assert!(sights.iter().all(|s| s.hit.is_some()));
    }
}
