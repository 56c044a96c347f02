//! Declarative draw-list handed to the presentation layer after each tick

use glam::Vec2;
use serde::Serialize;

use super::rect::Rect;
use super::state::{GamePhase, GameState, PowerUpKind, Rgb, SoundEvent};

pub const GAME_OVER_BANNER: &str = "Game Over! Press R to restart or Q to quit";
pub const WIN_BANNER: &str = "You Win! Press R to restart or Q to quit";

#[derive(Debug, Clone, Serialize)]
pub struct BrickSprite {
    pub rect: Rect,
    pub color: Rgb,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: u8,
    pub color: Rgb,
    pub alpha: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpSprite {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub color: Rgb,
    pub label: char,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub bricks: Vec<BrickSprite>,
    pub particles: Vec<ParticleSprite>,
    pub powerups: Vec<PowerUpSprite>,
    pub balls: Vec<BallSprite>,
    pub paddle: Rect,
    pub paddle_color: Rgb,
    /// Clear color for the playfield
    pub background: Rgb,
    pub score: u32,
    pub lives: u32,
    /// Jitter magnitude for brick rows only
    pub screen_shake: u32,
    pub banner: Option<&'static str>,
    pub sounds: Vec<SoundEvent>,
}

impl Frame {
    /// Snapshot the drawable parts of `state`
    pub fn capture(state: &GameState) -> Self {
        let banner = match state.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some(GAME_OVER_BANNER),
            GamePhase::Won => Some(WIN_BANNER),
        };

        Self {
            bricks: state
                .bricks
                .iter()
                .filter(|b| b.visible)
                .map(|b| BrickSprite {
                    rect: b.rect,
                    color: b.color,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleSprite {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: p.alpha(),
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpSprite {
                    rect: p.rect,
                    kind: p.kind,
                    color: p.kind.color(),
                    label: p.kind.label(),
                })
                .collect(),
            balls: state
                .balls
                .iter()
                .map(|b| BallSprite {
                    pos: b.pos,
                    radius: b.radius,
                    color: Rgb::WHITE,
                })
                .collect(),
            paddle: state.paddle.rect(),
            paddle_color: Rgb::PADDLE,
            background: Rgb::BACKGROUND,
            score: state.score,
            lives: state.lives,
            screen_shake: state.screen_shake,
            banner,
            sounds: state.sounds.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::BrickPattern;

    #[test]
    fn test_capture_skips_destroyed_bricks() {
        let mut state = GameState::with_pattern(5, BrickPattern::Normal);
        state.bricks[0].pierce();
        let frame = Frame::capture(&state);
        assert_eq!(frame.bricks.len(), 47);
        assert_eq!(frame.balls.len(), 1);
        assert_eq!(frame.lives, 3);
        assert!(frame.banner.is_none());
    }

    #[test]
    fn test_banner_on_terminal_phases() {
        let mut state = GameState::with_pattern(5, BrickPattern::Pyramid);
        state.phase = GamePhase::GameOver;
        assert_eq!(Frame::capture(&state).banner, Some(GAME_OVER_BANNER));
        state.phase = GamePhase::Won;
        assert_eq!(Frame::capture(&state).banner, Some(WIN_BANNER));
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::with_pattern(5, BrickPattern::Diagonal);
        let json = serde_json::to_value(Frame::capture(&state)).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["paddle_color"], serde_json::json!([200, 200, 200]));
        assert_eq!(json["background"], serde_json::json!([25, 25, 25]));
        assert_eq!(json["bricks"].as_array().map(Vec::len), Some(47));
    }
}
