//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod field;
pub mod frame;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{DeflectAxis, WallHit, circle_rect_overlap, paddle_bounce_velocity};
pub use field::{BrickPattern, generate as generate_field};
pub use frame::Frame;
pub use rect::Rect;
pub use state::{
    Ball, Brick, GamePhase, GameState, Paddle, Particle, PowerUp, PowerUpKind, Rgb, SoundEvent,
};
pub use tick::{TickControl, TickInput, tick};
