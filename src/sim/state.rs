//! Game state and core simulation types
//!
//! Every random decision draws from the session's seeded RNG, so a session
//! built from the same seed and fed the same inputs replays identically.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::rescale;
use super::field::{self, BrickPattern};
use super::rect::Rect;
use crate::consts::*;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUE: Rgb = Rgb(65, 105, 225);
    pub const RED: Rgb = Rgb(220, 20, 60);
    pub const GREEN: Rgb = Rgb(50, 205, 50);
    pub const YELLOW: Rgb = Rgb(255, 215, 0);
    pub const ORANGE: Rgb = Rgb(255, 140, 0);
    pub const PURPLE: Rgb = Rgb(147, 112, 219);
    pub const PADDLE: Rgb = Rgb(200, 200, 200);
    pub const BACKGROUND: Rgb = Rgb(25, 25, 25);

    /// Reduce every channel by `amount`, saturating at 0
    pub fn darken(self, amount: u8) -> Rgb {
        Rgb(
            self.0.saturating_sub(amount),
            self.1.saturating_sub(amount),
            self.2.saturating_sub(amount),
        )
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted (terminal until restart)
    GameOver,
    /// Every brick destroyed (terminal until restart)
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Audio cue requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEvent {
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball struck a brick (destroying or not)
    BrickHit,
    /// Paddle caught a power-up
    PowerUpCollect,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick; its length tracks `speed`
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Piercing mode (destroys bricks without deflecting)
    pub piercing: bool,
}

impl Ball {
    /// Create a ball at `pos` heading upward within ±45° of vertical
    pub fn launch(pos: Vec2, rng: &mut impl Rng) -> Self {
        let angle: f32 = rng.random_range(-FRAC_PI_4..FRAC_PI_4);
        let speed = BALL_START_SPEED;
        Self {
            pos,
            vel: Vec2::new(angle.sin() * speed, -angle.cos() * speed),
            radius: BALL_RADIUS,
            speed,
            piercing: false,
        }
    }

    /// Change speed, rescaling velocity so the heading is unchanged
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.vel = rescale(self.vel, speed);
    }

    /// Advance position by one tick of velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Whether the ball has dropped below the playfield
    pub fn is_lost(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal displacement per tick of held input
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: ((SCREEN_WIDTH - PADDLE_WIDTH) / 2.0).floor(),
            y: SCREEN_HEIGHT - PADDLE_BOTTOM_GAP,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move one step in `direction` (-1 left, +1 right), clamped to the playfield
    pub fn step(&mut self, direction: f32) {
        self.x = (self.x + direction * self.speed).clamp(0.0, SCREEN_WIDTH - self.width);
    }

    /// Multiply width by `factor`, capped at the maximum width
    pub fn widen(&mut self, factor: f32) {
        self.set_width(self.width * factor);
    }

    /// Restore the baseline width
    pub fn reset_width(&mut self) {
        self.set_width(PADDLE_WIDTH);
    }

    fn set_width(&mut self, width: f32) {
        self.width = width.clamp(PADDLE_WIDTH, PADDLE_MAX_WIDTH);
        self.x = self.x.clamp(0.0, SCREEN_WIDTH - self.width);
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Rgb,
    /// Hits needed to destroy (1..=3)
    pub hits_required: u8,
    pub hits: u8,
    pub visible: bool,
}

impl Brick {
    pub fn new(x: f32, y: f32, color: Rgb, hits_required: u8) -> Self {
        Self {
            rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
            color,
            hits_required,
            hits: 0,
            visible: true,
        }
    }

    /// Score awarded when destroyed
    pub fn points(&self) -> u32 {
        u32::from(self.hits_required) * POINTS_PER_HIT_REQUIRED
    }

    /// Register a normal hit. Returns true if this hit destroyed the brick;
    /// otherwise the brick darkens.
    pub fn hit(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.hits += 1;
        if self.hits >= self.hits_required {
            self.visible = false;
            return true;
        }
        self.color = self.color.darken(BRICK_DARKEN_STEP);
        false
    }

    /// Destroy outright, regardless of remaining durability
    pub fn pierce(&mut self) {
        self.visible = false;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    WiderPaddle,
    SlowBall,
    MultiBall,
    ExtraLife,
    FastBall,
    PiercingBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::WiderPaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::MultiBall,
        PowerUpKind::ExtraLife,
        PowerUpKind::FastBall,
        PowerUpKind::PiercingBall,
    ];

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::WiderPaddle => Rgb::GREEN,
            PowerUpKind::SlowBall => Rgb::BLUE,
            PowerUpKind::MultiBall => Rgb::YELLOW,
            PowerUpKind::ExtraLife => Rgb::RED,
            PowerUpKind::FastBall => Rgb::ORANGE,
            PowerUpKind::PiercingBall => Rgb::PURPLE,
        }
    }

    /// One-letter label drawn on the capsule
    pub fn label(&self) -> char {
        match self {
            PowerUpKind::WiderPaddle => 'W',
            PowerUpKind::SlowBall => 'S',
            PowerUpKind::MultiBall => 'M',
            PowerUpKind::ExtraLife => 'L',
            PowerUpKind::FastBall => 'F',
            PowerUpKind::PiercingBall => 'P',
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub fall_speed: f32,
    pub active: bool,
}

impl PowerUp {
    /// Spawn with its top-left corner at `pos`
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, POWERUP_SIZE, POWERUP_SIZE),
            kind,
            fall_speed: POWERUP_FALL_SPEED,
            active: true,
        }
    }

    /// Fall one tick; deactivates once below the playfield
    pub fn update(&mut self) {
        self.rect.pos.y += self.fall_speed;
        if self.rect.top() > SCREEN_HEIGHT {
            self.active = false;
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub size: u8,
    /// Remaining life, 255 at spawn
    pub life: i32,
}

impl Particle {
    pub fn new(pos: Vec2, color: Rgb, rng: &mut impl Rng) -> Self {
        let angle: f32 = rng.random_range(0.0..TAU);
        let speed: f32 = rng.random_range(2.0..5.0);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            size: rng.random_range(2..=4),
            life: PARTICLE_START_LIFE,
        }
    }

    /// Move and age one tick. Returns false once dead.
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= PARTICLE_LIFE_DECAY;
        self.life > 0
    }

    /// Opacity derived from remaining life
    pub fn alpha(&self) -> u8 {
        self.life.clamp(0, 255) as u8
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session was created with
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Simulation tick counter (resets on restart)
    pub time_ticks: u64,
    /// Layout used for the current brick field
    pub pattern: BrickPattern,
    pub paddle: Paddle,
    /// Live balls, in spawn order
    pub balls: Vec<Ball>,
    /// Bricks, in creation order (collision tie-break order)
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Visual jitter magnitude, decays by one per tick
    pub screen_shake: u32,
    /// Countdown that restores the paddle width when it reaches zero
    pub power_up_timer: u32,
    /// Sounds requested during the last tick
    pub sounds: Vec<SoundEvent>,
}

impl GameState {
    /// Create a new session with the given seed and a random brick layout
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pattern = BrickPattern::random(&mut rng);
        Self::build(seed, rng, pattern)
    }

    /// Create a new session with a fixed brick layout
    pub fn with_pattern(seed: u64, pattern: BrickPattern) -> Self {
        Self::build(seed, Pcg32::seed_from_u64(seed), pattern)
    }

    fn build(seed: u64, rng: Pcg32, pattern: BrickPattern) -> Self {
        let mut state = Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            score: 0,
            lives: STARTING_LIVES,
            time_ticks: 0,
            pattern,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            screen_shake: 0,
            power_up_timer: 0,
            sounds: Vec::new(),
        };
        state.populate(pattern);
        log::info!("New session (seed {seed}, {pattern:?} layout)");
        state
    }

    /// Return to the initial state with a freshly generated brick field
    pub fn restart(&mut self) {
        let pattern = BrickPattern::random(&mut self.rng);
        self.restart_with(pattern);
    }

    /// Restart using a specific layout
    pub fn restart_with(&mut self, pattern: BrickPattern) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.time_ticks = 0;
        self.screen_shake = 0;
        self.power_up_timer = 0;
        self.paddle = Paddle::default();
        self.balls.clear();
        self.powerups.clear();
        self.particles.clear();
        self.sounds.clear();
        self.populate(pattern);
        log::info!("Session restarted ({pattern:?} layout)");
    }

    fn populate(&mut self, pattern: BrickPattern) {
        self.pattern = pattern;
        self.bricks = field::generate(pattern, &mut self.rng);
        self.spawn_ball(Vec2::new(BALL_LAUNCH_X, BALL_LAUNCH_Y));
    }

    /// Spawn a fresh ball at `pos` with a random launch angle
    pub fn spawn_ball(&mut self, pos: Vec2) {
        let ball = Ball::launch(pos, &mut self.rng);
        self.balls.push(ball);
    }

    /// Emit a burst of particles centered at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: Rgb) {
        for _ in 0..PARTICLES_PER_BURST {
            let particle = Particle::new(pos, color, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Bricks still standing
    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }
}
