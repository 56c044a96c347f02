//! Power-up spawning, falling, collection and effects

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, PowerUp, PowerUpKind, SoundEvent};
use crate::consts::*;

impl GameState {
    /// Roll the drop chance for a broken brick and spawn a capsule at `pos`
    pub fn maybe_spawn_powerup(&mut self, pos: Vec2) {
        if self.rng.random_bool(POWERUP_DROP_CHANCE) {
            let kind = PowerUpKind::random(&mut self.rng);
            self.powerups.push(PowerUp::new(pos, kind));
        }
    }

    /// Advance falling capsules, dropping those off-screen and applying those
    /// that touch the paddle
    pub fn update_powerups(&mut self) {
        let paddle = self.paddle.rect();
        let mut collected = Vec::new();

        self.powerups.retain_mut(|powerup| {
            powerup.update();
            if !powerup.active {
                false
            } else if powerup.rect.overlaps(&paddle) {
                collected.push(powerup.kind);
                false
            } else {
                true
            }
        });

        for kind in collected {
            self.apply_powerup(kind);
            self.sounds.push(SoundEvent::PowerUpCollect);
        }
    }

    /// Apply a collected power-up's effect
    pub fn apply_powerup(&mut self, kind: PowerUpKind) {
        log::debug!("Power-up collected: {kind:?}");
        match kind {
            PowerUpKind::WiderPaddle => {
                self.paddle.widen(WIDER_PADDLE_FACTOR);
                self.power_up_timer = POWERUP_DURATION_TICKS;
            }
            PowerUpKind::SlowBall => {
                for ball in &mut self.balls {
                    ball.set_speed((ball.speed * SLOW_BALL_FACTOR).max(BALL_MIN_SPEED));
                }
            }
            PowerUpKind::FastBall => {
                for ball in &mut self.balls {
                    ball.set_speed((ball.speed * FAST_BALL_FACTOR).min(BALL_MAX_SPEED));
                }
            }
            PowerUpKind::MultiBall => {
                // Duplicates launch from the first ball, each with its own angle
                if let Some(origin) = self.balls.first().map(|b| b.pos) {
                    for _ in 0..self.balls.len() {
                        self.spawn_ball(origin);
                    }
                }
            }
            PowerUpKind::ExtraLife => {
                self.lives += 1;
            }
            PowerUpKind::PiercingBall => {
                for ball in &mut self.balls {
                    ball.piercing = true;
                }
                // TODO: decide whether piercing should lapse with the timer;
                // today only the paddle width reverts.
                self.power_up_timer = POWERUP_DURATION_TICKS;
            }
        }
    }

    /// Count down the shared effect timer; restores paddle width at zero
    pub fn decay_power_up_timer(&mut self) {
        if self.power_up_timer > 0 {
            self.power_up_timer -= 1;
            if self.power_up_timer == 0 {
                self.paddle.reset_width();
            }
        }
    }
}
