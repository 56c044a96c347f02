//! Platform abstraction layer
//!
//! Handles the pieces that sit between the simulation and the outside world:
//! - Presentation surfaces consuming `Frame`s
//! - Fixed-step frame pacing

pub mod ascii;
pub mod headless;

pub use ascii::AsciiSurface;
pub use headless::HeadlessSurface;

use crate::audio::AudioManager;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::GameError;
use crate::settings::Settings;
use crate::sim::{Frame, GameState, TickControl, TickInput, tick};

/// A display target for rendered frames
pub trait Surface {
    fn present(&mut self, frame: &Frame);
}

/// Available surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// No display; periodic log summaries
    Headless,
    /// Character-cell rendering on the controlling terminal
    Ascii,
}

/// Create the requested surface. Failure here is fatal to startup.
pub fn create_surface(kind: SurfaceKind, settings: &Settings) -> Result<Box<dyn Surface>, GameError> {
    match kind {
        SurfaceKind::Headless => Ok(Box::new(HeadlessSurface::new(60))),
        SurfaceKind::Ascii => Ok(Box::new(AsciiSurface::open(settings)?)),
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Add elapsed wall time and return how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        // Clamp long stalls (debugger, suspended terminal)
        self.accumulator += elapsed.min(0.25);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}

/// Run one tick, then hand its sounds and frame to the outside world.
///
/// A finished session either queues a restart for the next tick or ends the
/// run with `Quit`. The one-shot restart flag is consumed here.
pub fn step_session(
    state: &mut GameState,
    input: &mut TickInput,
    audio: &mut AudioManager,
    surface: &mut dyn Surface,
    restart_on_end: bool,
) -> TickControl {
    let control = tick(state, input);
    input.restart = false;

    audio.play_events(&state.sounds);
    surface.present(&Frame::capture(state));

    if control == TickControl::Quit {
        return TickControl::Quit;
    }
    if state.phase.is_terminal() {
        if !restart_on_end {
            return TickControl::Quit;
        }
        input.restart = true;
    }
    TickControl::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogSink;
    use crate::sim::GamePhase;

    #[derive(Default)]
    struct CountingSurface {
        banners: Vec<Option<&'static str>>,
    }

    impl Surface for CountingSurface {
        fn present(&mut self, frame: &Frame) {
            self.banners.push(frame.banner);
        }
    }

    fn silent_audio() -> AudioManager {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        AudioManager::new(&settings, Box::new(LogSink))
    }

    fn finished_state() -> GameState {
        let mut state = GameState::new(9);
        state.phase = GamePhase::GameOver;
        state.lives = 0;
        state.balls.clear();
        state
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut clock = FixedStep::new(0.01, 5);
        assert_eq!(clock.advance(0.005), 0);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.025), 2);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut clock = FixedStep::new(0.01, 5);
        assert_eq!(clock.advance(0.2), 5);
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_headless_surface_always_available() {
        assert!(create_surface(SurfaceKind::Headless, &Settings::default()).is_ok());
    }

    #[test]
    fn test_finished_session_ends_run() {
        let mut state = finished_state();
        let mut input = TickInput::default();
        let mut surface = CountingSurface::default();

        let control = step_session(&mut state, &mut input, &mut silent_audio(), &mut surface, false);

        assert_eq!(control, TickControl::Quit);
        // Banner frame is shown before stopping
        assert_eq!(surface.banners, vec![Some(crate::sim::frame::GAME_OVER_BANNER)]);
    }

    #[test]
    fn test_finished_session_restarts_when_asked() {
        let mut state = finished_state();
        let mut input = TickInput::default();
        let mut audio = silent_audio();
        let mut surface = CountingSurface::default();

        let control = step_session(&mut state, &mut input, &mut audio, &mut surface, true);
        assert_eq!(control, TickControl::Continue);
        assert!(input.restart);

        let control = step_session(&mut state, &mut input, &mut audio, &mut surface, true);
        assert_eq!(control, TickControl::Continue);
        assert!(!input.restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
    }

    #[test]
    fn test_quit_input_ends_run() {
        let mut state = GameState::new(9);
        let mut input = TickInput {
            quit: true,
            ..Default::default()
        };
        let mut surface = CountingSurface::default();

        let control = step_session(&mut state, &mut input, &mut silent_audio(), &mut surface, true);
        assert_eq!(control, TickControl::Quit);
    }
}
