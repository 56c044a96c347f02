//! Brickfall entry point
//!
//! Loads settings and assets, opens a surface, then runs the fixed-step loop.
//! Keyboard polling is not wired in, so the paddle runs on autopilot.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use brickfall::Settings;
use brickfall::audio::{AudioManager, LogSink};
use brickfall::consts::SIM_DT;
use brickfall::platform::{self, FixedStep, SurfaceKind};
use brickfall::sim::{GameState, TickControl, TickInput};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SurfaceArg {
    Headless,
    Ascii,
}

impl From<SurfaceArg> for SurfaceKind {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Headless => SurfaceKind::Headless,
            SurfaceArg::Ascii => SurfaceKind::Ascii,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Brick breaker with a deterministic simulation core")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Session seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,
    #[arg(long, value_enum, default_value = "headless")]
    surface: SurfaceArg,
    /// Start a new session whenever one ends
    #[arg(long)]
    restart_on_end: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);

    let mut surface = platform::create_surface(args.surface.into(), &settings)
        .context("cannot start without a display surface")?;
    let mut audio = AudioManager::new(&settings, Box::new(LogSink));

    log::info!("Brickfall starting (seed {seed})");
    let mut state = GameState::new(seed);
    let realtime = matches!(args.surface, SurfaceArg::Ascii);

    let mut clock = FixedStep::default();
    let mut last = Instant::now();
    let mut elapsed_ticks = 0u64;
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    'run: loop {
        let steps = if realtime {
            std::thread::sleep(Duration::from_secs_f32(SIM_DT / 2.0));
            let now = Instant::now();
            let steps = clock.advance((now - last).as_secs_f32());
            last = now;
            steps
        } else {
            1
        };

        for _ in 0..steps {
            elapsed_ticks += 1;
            input.quit = args.ticks.is_some_and(|limit| elapsed_ticks >= limit);

            let control = platform::step_session(
                &mut state,
                &mut input,
                &mut audio,
                &mut *surface,
                args.restart_on_end,
            );
            if control == TickControl::Quit {
                break 'run;
            }
        }
    }

    log::info!(
        "Finished after {elapsed_ticks} ticks: {:?}, score {}, lives {}",
        state.phase,
        state.score,
        state.lives
    );
    Ok(())
}
