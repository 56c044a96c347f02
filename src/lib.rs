//! Brickfall - a ball-and-paddle brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `audio`: Sound-event playback with optional assets
//! - `platform`: Presentation surfaces and the fixed-step driver
//! - `settings`: User preferences loaded from JSON

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_MAX_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance of the paddle top from the bottom edge
    pub const PADDLE_BOTTOM_GAP: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_SPEED: f32 = 6.0;
    pub const BALL_MIN_SPEED: f32 = 3.0;
    pub const BALL_MAX_SPEED: f32 = 12.0;
    /// Launch point for fresh balls (above the paddle center)
    pub const BALL_LAUNCH_X: f32 = SCREEN_WIDTH / 2.0;
    pub const BALL_LAUNCH_Y: f32 = SCREEN_HEIGHT - 60.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_GUTTER: f32 = 2.0;
    pub const BRICK_ORIGIN_X: f32 = 45.0;
    pub const BRICK_ORIGIN_Y: f32 = 50.0;
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COLS: usize = 8;
    /// Horizontal tolerance for side-face deflection
    pub const BRICK_EDGE_TOLERANCE: f32 = 5.0;
    /// Color reduction per non-destroying hit
    pub const BRICK_DARKEN_STEP: u8 = 50;
    pub const POINTS_PER_HIT_REQUIRED: u32 = 10;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;
    pub const POWERUP_DURATION_TICKS: u32 = 300;
    pub const WIDER_PADDLE_FACTOR: f32 = 1.5;
    pub const SLOW_BALL_FACTOR: f32 = 0.7;
    pub const FAST_BALL_FACTOR: f32 = 1.3;

    /// Particles
    pub const PARTICLES_PER_BURST: usize = 10;
    pub const PARTICLE_START_LIFE: i32 = 255;
    pub const PARTICLE_LIFE_DECAY: i32 = 10;

    /// Screen shake magnitude set by a brick impact (ticks of decay)
    pub const SCREEN_SHAKE_ON_HIT: u32 = 5;

    pub const STARTING_LIVES: u32 = 3;
}
