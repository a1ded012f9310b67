//! Hero Pong entry point
//!
//! The browser build mounts through `HeroBackground` in the library. Natively
//! this runs the render loop headless at a simulated 60 Hz with a scripted
//! pointer, which is handy for eyeballing the physics in logs.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use glam::Vec2;

    use hero_pong::platform::{ManualScheduler, PointerEvent};
    use hero_pong::renderer::CommandRecorder;
    use hero_pong::settings::Theme;
    use hero_pong::{FrameDriver, FrameOutcome, Settings};

    const DEFAULT_FRAMES: u32 = 600;
    const DEFAULT_SEED: u64 = 0x5eed;
    const VIEWPORT: (f32, f32) = (1280.0, 720.0);
    /// Simulated display refresh interval
    const FRAME_MS: f64 = 1000.0 / 60.0;

    struct Args {
        frames: u32,
        seed: u64,
        settings: Option<PathBuf>,
    }

    fn parse_args() -> Args {
        let mut args = std::env::args().skip(1);
        let frames = match args.next().map(|a| a.parse()) {
            Some(Ok(n)) => n,
            Some(Err(e)) => {
                log::warn!("Bad frame count ({}), using {}", e, DEFAULT_FRAMES);
                DEFAULT_FRAMES
            }
            None => DEFAULT_FRAMES,
        };
        let seed = match args.next().map(|a| a.parse()) {
            Some(Ok(s)) => s,
            Some(Err(e)) => {
                log::warn!("Bad seed ({}), using {}", e, DEFAULT_SEED);
                DEFAULT_SEED
            }
            None => DEFAULT_SEED,
        };
        Args {
            frames,
            seed,
            settings: args.next().map(PathBuf::from),
        }
    }

    /// Lissajous sweep across the viewport so the paddle meets the ball
    fn pointer_at(frame: u32) -> Vec2 {
        let t = frame as f32 / 60.0;
        let (w, h) = VIEWPORT;
        Vec2::new(
            w / 2.0 + (t * 1.3).sin() * w * 0.4,
            h / 2.0 + (t * 1.7).cos() * h * 0.35,
        )
    }

    pub fn run() {
        let args = parse_args();
        let settings = match &args.settings {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };

        let mut driver = FrameDriver::new(args.seed, &settings, Theme::Dark, ManualScheduler::new());
        let (bw, bh) = driver.resize(VIEWPORT.0, VIEWPORT.1, 2.0);
        log::info!(
            "Backing store {}x{}, quality {}",
            bw,
            bh,
            settings.quality.as_str()
        );
        driver.start();

        let mut surface = CommandRecorder::new();
        let mut stepped = 0u32;
        for frame in 0..args.frames {
            if driver.scheduler_mut().fire().is_none() {
                break;
            }
            let pointer = pointer_at(frame);
            driver.pointer_moved(PointerEvent::Move {
                x: pointer.x,
                y: pointer.y,
            });

            surface.reset();
            let outcome = driver.on_frame(frame as f64 * FRAME_MS, Some(&mut surface));
            if matches!(outcome, FrameOutcome::Stepped { .. }) {
                stepped += 1;
            }

            if frame % 60 == 0 {
                if let Some(ball) = driver.state.ball.as_ref() {
                    log::info!(
                        "frame {:4}: ball ({:7.1}, {:7.1}) speed {:5.2}, {} effects, {} draw calls",
                        frame,
                        ball.pos.x,
                        ball.pos.y,
                        ball.speed(),
                        driver.state.effects.len(),
                        surface.len()
                    );
                }
            }
        }
        driver.stop();

        log::info!("Stepped {} of {} frames", stepped, args.frames);
        match serde_json::to_string_pretty(&driver.state.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Snapshot serialization failed: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hero Pong (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `hero_pong::platform::web::start`, this is just to satisfy the compiler
}
