//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Velocities are
//! in pixels per tick; the driver is responsible for calling `tick` at
//! `TICK_RATE`.

use super::collision::{
    brick_deflect_axis, circle_rect_overlap, deflect, paddle_bounce_velocity, paddle_contact,
    resolve_walls,
};
use super::state::{Ball, GamePhase, GameState, SoundEvent};
use crate::consts::*;

use glam::Vec2;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle left held
    pub move_left: bool,
    /// Paddle right held
    pub move_right: bool,
    /// Start a new session (one-shot)
    pub restart: bool,
    /// End the outer loop after this tick (one-shot)
    pub quit: bool,
    /// Demo mode - the paddle steers itself
    pub autopilot: bool,
}

/// Whether the driver should keep looping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Quit,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickControl {
    state.sounds.clear();

    if input.restart {
        state.restart();
    }
    let control = if input.quit {
        TickControl::Quit
    } else {
        TickControl::Continue
    };

    // Terminal phases freeze the simulation
    if state.phase.is_terminal() {
        return control;
    }

    state.time_ticks += 1;

    // Both directions held: both steps run, each clamped
    let (left, right) = if input.autopilot {
        autopilot(state)
    } else {
        (input.move_left, input.move_right)
    };
    if left {
        state.paddle.step(-1.0);
    }
    if right {
        state.paddle.step(1.0);
    }

    // Balls are detached while they run so collisions can borrow the rest
    let mut balls = std::mem::take(&mut state.balls);
    for ball in &mut balls {
        step_ball(state, ball);
    }
    balls.retain(|b| !b.is_lost());
    state.balls = balls;

    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over - final score {}", state.score);
        } else {
            log::debug!("Ball lost, {} lives left", state.lives);
            state.spawn_ball(Vec2::new(BALL_LAUNCH_X, BALL_LAUNCH_Y));
        }
    }

    if state.phase == GamePhase::Playing && state.visible_bricks() == 0 {
        state.phase = GamePhase::Won;
        log::info!("Field cleared - final score {}", state.score);
    }

    state.particles.retain_mut(|p| p.update());
    state.update_powerups();

    state.screen_shake = state.screen_shake.saturating_sub(1);
    state.decay_power_up_timer();

    control
}

/// Move one ball and resolve its wall, paddle and brick collisions
fn step_ball(state: &mut GameState, ball: &mut Ball) {
    ball.integrate();
    resolve_walls(&mut ball.pos, &mut ball.vel, ball.radius, SCREEN_WIDTH);

    let paddle = state.paddle.rect();
    if paddle_contact(ball.pos, ball.radius, &paddle) {
        ball.vel = paddle_bounce_velocity(ball.pos.x, ball.speed, &paddle);
        ball.pos.y = paddle.top() - ball.radius;
        state.sounds.push(SoundEvent::PaddleHit);
    }

    // First visible brick in creation order wins
    let Some(index) = state
        .bricks
        .iter()
        .position(|b| b.visible && circle_rect_overlap(ball.pos, ball.radius, &b.rect))
    else {
        return;
    };

    let brick = &mut state.bricks[index];
    let rect = brick.rect;
    let color = brick.color;

    if ball.piercing {
        brick.pierce();
        state.score += brick.points();
    } else {
        if brick.hit() {
            state.score += brick.points();
        }
        let axis = brick_deflect_axis(ball.pos.x, &rect, BRICK_EDGE_TOLERANCE);
        ball.vel = deflect(ball.vel, axis);
    }

    state.screen_shake = state.screen_shake.max(SCREEN_SHAKE_ON_HIT);
    state.spawn_burst(rect.center(), color);
    state.maybe_spawn_powerup(rect.top_center());
    state.sounds.push(SoundEvent::BrickHit);
}

/// Steer toward the lowest descending ball, else the lowest capsule
fn autopilot(state: &GameState) -> (bool, bool) {
    let target = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|b| b.pos.x)
        .or_else(|| {
            state
                .powerups
                .iter()
                .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
                .map(|p| p.rect.center().x)
        })
        .or_else(|| state.balls.first().map(|b| b.pos.x));

    let Some(target) = target else {
        return (false, false);
    };

    // Wandering offset so rallies don't settle into a fixed loop
    let offset = (state.time_ticks as f32 * 0.05).sin() * state.paddle.width * 0.3;
    let delta = target + offset - state.paddle.center_x();
    let deadzone = state.paddle.speed / 2.0;
    (delta < -deadzone, delta > deadzone)
}
