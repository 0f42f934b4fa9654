use clap::Parser;
use game::Game;
use sdl2::event::{Event, WindowEvent};
use std::collections::HashSet;
use std::time::{Duration, Instant};

mod game;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

/// Real-time 2D ray casting against random line obstacles.
#[derive(Parser, Debug)]
#[command(version, about)]
pub(crate) struct Settings {
    /// window width in pixels
    #[arg(long, default_value_t = 1024)]
    pub width: u32,
    /// window height in pixels
    #[arg(long, default_value_t = 768)]
    pub height: u32,
    /// field of view in degrees, inside (0, 360)
    #[arg(long, default_value_t = 60.)]
    pub fov: f64,
    #[arg(long, default_value_t = 90)]
    pub rays: usize,
    /// random obstacles besides the window edges
    #[arg(long, default_value_t = 5)]
    pub obstacles: usize,
    #[arg(long, default_value_t = 10.)]
    pub move_speed: f64,
    /// degrees per turn step
    #[arg(long, default_value_t = 5.)]
    pub turn_speed: f64,
    #[arg(long, default_value_t = 60)]
    pub fps: u64,
    /// seed for reproducible scenes
    #[arg(long)]
    pub seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("SIGHTLINE_LOG");
    let settings = Settings::parse();
    log::debug!("{settings:?}");
    anyhow::ensure!(settings.fps > 0, "fps must be positive");

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let window = video
        .window("sightline", settings.width, settings.height)
        .position_centered()
        .resizable()
        .build()?;
    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut keys = HashSet::new();

    log::info!("initializing scene");
    let mut game = Game::new(canvas, &settings)?;

    let delta = Duration::from_millis(1_000 / settings.fps);

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    keys.insert(k);

                    if !repeat {
                        game.key_once(k);
                        game.update = true;
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    keys.remove(&k);
                }
                Event::Window {
                    win_event: WindowEvent::SizeChanged(width, height),
                    ..
                } => {
                    game.resize(width, height);
                    game.update = true;
                }
                _ => {}
            }
        }

        if game.exit {
            break 'main_loop;
        }

        for k in keys.iter() {
            game.key(*k);
            game.update = true;
        }

        // draw frame
        if game.update {
            if let Err(err) = game.draw() {
                log::error!("error while drawing: {err}");
                return Err(err);
            }
            game.canvas.present();

            game.update = false;
        }

        let diff = Instant::now() - prev;
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    Ok(())
}
