use crate::{Settings, StringToAnyhow};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;
use sightline::{
    Bounds, Camera, CameraConfig, Command, Movement, Scene, Sight, SpeedChange, Turn,
};

const SIGHT_COLOR: Color = Color::RGB(0x55, 0, 0);
const BOUNDARY_COLOR: Color = Color::RGB(0xff, 0xff, 0xff);
const OBSERVER_COLOR: Color = Color::RGB(0xff, 0, 0);
const DEBUG_COLOR: Color = Color::RGB(0, 0xff, 0xff);
const OBSERVER_SIZE: u32 = 10;
const HEADING_LENGTH: f64 = 25.0;

fn point(p: DVec2) -> Point {
    Point::new(p.x.round() as i32, p.y.round() as i32)
}

pub(crate) struct Game {
    scene: Scene,
    camera: Camera,
    sights: Vec<Sight>,
    rng: StdRng,
    debug: bool,
    pub canvas: Canvas<Window>,
    pub exit: bool,
    pub update: bool,
}

impl Game {
    /// initialize scene and camera
    pub fn new(canvas: Canvas<Window>, settings: &Settings) -> anyhow::Result<Self> {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let bounds = Bounds::new(settings.width as f64, settings.height as f64)?;
        let scene = Scene::generate(bounds, settings.obstacles, &mut rng);
        let camera = Camera::new(CameraConfig {
            position: bounds.center(),
            heading: 0.,
            fov: settings.fov,
            ray_count: settings.rays,
            move_speed: settings.move_speed,
            turn_speed: settings.turn_speed,
        })?;

        Ok(Self {
            sights: Vec::with_capacity(camera.ray_count()),
            scene,
            camera,
            rng,
            debug: false,
            canvas,
            exit: false,
            update: true,
        })
    }

    /// handle key presses that fire once per press
    pub fn key_once(&mut self, key: Keycode) {
        let bounds = self.scene.bounds();
        match key {
            Keycode::Plus | Keycode::KpPlus | Keycode::Equals => self
                .camera
                .apply(Command::Speed(SpeedChange::Accelerate), bounds),
            Keycode::Minus | Keycode::KpMinus => {
                self.camera.apply(Command::Speed(SpeedChange::Brake), bounds)
            }
            Keycode::N => self.camera.apply(Command::NarrowFov, bounds),
            Keycode::M => self.camera.apply(Command::WidenFov, bounds),
            Keycode::Z => self.camera.apply(Command::RemoveRay, bounds),
            Keycode::X => self.camera.apply(Command::AddRay, bounds),
            Keycode::R => self.scene.regenerate(&mut self.rng),
            Keycode::T => self.scene.remove_obstacle(&mut self.rng),
            Keycode::Y => self.scene.add_obstacle(&mut self.rng),
            Keycode::Space => self.debug = !self.debug,
            Keycode::Escape => self.exit = true,
            _ => {}
        }
    }

    /// handle keys that repeat while held
    pub fn key(&mut self, key: Keycode) {
        let command = match key {
            Keycode::W => Command::Move(Movement::Up),
            Keycode::S => Command::Move(Movement::Down),
            Keycode::A => Command::Move(Movement::Left),
            Keycode::D => Command::Move(Movement::Right),
            Keycode::Left => Command::Turn(Turn::Left),
            Keycode::Right => Command::Turn(Turn::Right),
            _ => return,
        };
        self.camera.apply(command, self.scene.bounds());
    }

    /// rebuild the scene for a new window size, keeping the camera inside it
    pub fn resize(&mut self, width: i32, height: i32) {
        // minimized windows report zero sizes
        if let Err(err) = self.scene.resize(width as f64, height as f64, &mut self.rng) {
            log::warn!("ignoring resize to {width}x{height}: {err}");
            return;
        }
        log::info!("resized scene to {width}x{height}");
        self.camera.confine(self.scene.bounds());
    }

    pub fn draw(&mut self) -> anyhow::Result<()> {
        self.camera.cast_into(self.scene.boundaries(), &mut self.sights);

        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();

        // DRAW OBSERVER
        let origin = self.camera.position();
        self.canvas.set_draw_color(OBSERVER_COLOR);
        self.canvas
            .fill_rect(Rect::from_center(point(origin), OBSERVER_SIZE, OBSERVER_SIZE))
            .ah()?;

        // DRAW SIGHT LINES
        self.canvas.set_draw_color(SIGHT_COLOR);
        for sight in self.sights.iter() {
            let Some(hit) = sight.hit else {
                continue;
            };
            self.canvas
                .draw_line(point(sight.origin), point(hit.point))
                .ah()?;
        }

        // DRAW BOUNDARIES
        self.canvas.set_draw_color(BOUNDARY_COLOR);
        for boundary in self.scene.boundaries() {
            let ends = boundary.endpoints();
            self.canvas
                .draw_line(point(ends.start()), point(ends.end()))
                .ah()?;
        }

        if self.debug {
            self.draw_debug()?;
        } else {
            self.canvas.window_mut().set_title("sightline")?;
        }

        Ok(())
    }

    // heading marker on the canvas, numbers in the title bar
    fn draw_debug(&mut self) -> anyhow::Result<()> {
        let origin = self.camera.position();
        let heading = self.camera.heading();
        let tip = origin + DVec2::from_angle(heading.to_radians().get()) * HEADING_LENGTH;

        self.canvas.set_draw_color(DEBUG_COLOR);
        self.canvas.draw_line(point(origin), point(tip)).ah()?;

        let bounds = self.scene.bounds();
        let info = format!(
            "canvas: {}x{} | boundaries: {} | x: {:.0} y: {:.0} | dir: {} | fov: {} | rays: {} | spd: {}",
            bounds.width(),
            bounds.height(),
            self.scene.obstacles(),
            origin.x,
            origin.y,
            heading,
            self.camera.fov(),
            self.camera.ray_count(),
            self.camera.move_speed(),
        );
        self.canvas.window_mut().set_title(&info)?;

        for (i, boundary) in self.scene.boundaries().iter().enumerate() {
            log::trace!("boundary {i}: {:?}", boundary.endpoints());
        }

        Ok(())
    }
}
