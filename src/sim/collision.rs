//! Collision detection and response primitives
//!
//! Pure functions over positions and rectangles. The tick loop decides the
//! order these are applied in.

use std::f32::consts::FRAC_PI_3;

use glam::Vec2;

use super::rect::Rect;

/// Which walls a ball touched while being clamped back into the playfield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    /// Left or right wall
    pub side: bool,
    /// Ceiling
    pub top: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Axis to flip after a non-piercing brick hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeflectAxis {
    /// Ball struck a side face: flip horizontal velocity
    Horizontal,
    /// Ball struck the top or bottom face: flip vertical velocity
    Vertical,
}

/// Circle vs axis-aligned rectangle overlap (bounding-box test on the circle)
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.left()
        && center.x - radius < rect.right()
        && center.y + radius > rect.top()
        && center.y - radius < rect.bottom()
}

/// Clamp a ball inside the side walls and ceiling, forcing velocity away from
/// whichever wall was touched. There is no floor.
pub fn resolve_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32) -> WallHit {
    let mut hit = WallHit::default();

    if pos.x <= radius {
        pos.x = radius;
        vel.x = vel.x.abs();
        hit.side = true;
    } else if pos.x >= width - radius {
        pos.x = width - radius;
        vel.x = -vel.x.abs();
        hit.side = true;
    }

    if pos.y <= radius {
        pos.y = radius;
        vel.y = vel.y.abs();
        hit.top = true;
    }

    hit
}

/// Whether the ball's bottom edge has reached the paddle top while its center
/// is within the paddle's horizontal span
pub fn paddle_contact(center: Vec2, radius: f32, paddle: &Rect) -> bool {
    center.y + radius >= paddle.top() && center.x >= paddle.left() && center.x <= paddle.right()
}

/// Outgoing velocity after a paddle hit.
///
/// The hit offset from paddle center is mapped to a bounce angle of up to
/// ±60° from vertical: edge hits leave steep, center hits leave straight up.
pub fn paddle_bounce_velocity(ball_x: f32, speed: f32, paddle: &Rect) -> Vec2 {
    let half_width = paddle.size.x / 2.0;
    let relative_intersect = (paddle.left() + half_width) - ball_x;
    let normalized = (relative_intersect / half_width).clamp(-1.0, 1.0);
    let bounce_angle = normalized * FRAC_PI_3;
    Vec2::new(-speed * bounce_angle.sin(), -speed * bounce_angle.cos())
}

/// Approximate face detection for a brick hit: within `tolerance` of a
/// vertical edge counts as a side hit.
pub fn brick_deflect_axis(ball_x: f32, brick: &Rect, tolerance: f32) -> DeflectAxis {
    if (ball_x - brick.left()).abs() < tolerance || (ball_x - brick.right()).abs() < tolerance {
        DeflectAxis::Horizontal
    } else {
        DeflectAxis::Vertical
    }
}

/// Apply a deflection to a velocity
#[inline]
pub fn deflect(vel: Vec2, axis: DeflectAxis) -> Vec2 {
    match axis {
        DeflectAxis::Horizontal => Vec2::new(-vel.x, vel.y),
        DeflectAxis::Vertical => Vec2::new(vel.x, -vel.y),
    }
}

/// Rescale a velocity to `speed` keeping its heading
pub fn rescale(vel: Vec2, speed: f32) -> Vec2 {
    vel.normalize_or_zero() * speed
}
