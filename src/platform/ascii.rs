//! Character-cell renderer for terminals
//!
//! The 800×600 playfield maps onto an 80×30 grid (10×20 px per cell).

use std::io::{IsTerminal, Write};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::Surface;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;
use crate::settings::Settings;
use crate::sim::{Frame, Rect};

pub const COLS: usize = 80;
pub const ROWS: usize = 30;

const CELL_W: f32 = SCREEN_WIDTH / COLS as f32;
const CELL_H: f32 = SCREEN_HEIGHT / ROWS as f32;

pub struct AsciiSurface {
    grid: Vec<[char; COLS]>,
    shake: bool,
    max_particles: usize,
    /// Presentation-only randomness for shake jitter
    rng: Pcg32,
}

impl AsciiSurface {
    /// Attach to the controlling terminal
    pub fn open(settings: &Settings) -> Result<Self, GameError> {
        if !std::io::stdout().is_terminal() {
            return Err(GameError::RenderSurface("stdout is not a terminal".into()));
        }
        Ok(Self::new(settings, rand::random()))
    }

    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            grid: vec![[' '; COLS]; ROWS],
            shake: settings.effective_screen_shake(),
            max_particles: settings.max_particles(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn cell(x: f32, y: f32) -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        Some(((y / CELL_H) as usize, (x / CELL_W) as usize))
    }

    fn plot(&mut self, x: f32, y: f32, ch: char) {
        if let Some((row, col)) = Self::cell(x, y) {
            self.grid[row][col] = ch;
        }
    }

    fn fill(&mut self, rect: &Rect, dy: f32, ch: char) {
        let mut y = rect.top() + dy;
        while y < rect.bottom() + dy {
            let mut x = rect.left();
            while x < rect.right() {
                self.plot(x, y, ch);
                x += CELL_W;
            }
            y += CELL_H;
        }
    }

    fn write_text(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.grid[row].get_mut(col + i) {
                *cell = ch;
            }
        }
    }

    /// Rasterise a frame into text, one line per row
    pub fn render(&mut self, frame: &Frame) -> String {
        for row in &mut self.grid {
            row.fill(' ');
        }

        // Shake jitters brick rows only
        let jitter = if self.shake && frame.screen_shake > 0 {
            let m = frame.screen_shake as i32;
            self.rng.random_range(-m..=m) as f32
        } else {
            0.0
        };
        for brick in &frame.bricks {
            self.fill(&brick.rect, jitter, '#');
        }
        for particle in frame.particles.iter().take(self.max_particles) {
            self.plot(particle.pos.x, particle.pos.y, '.');
        }
        for powerup in &frame.powerups {
            let c = powerup.rect.center();
            self.plot(c.x, c.y, powerup.label);
        }
        for ball in &frame.balls {
            self.plot(ball.pos.x, ball.pos.y, 'o');
        }
        self.fill(&frame.paddle, 0.0, '=');

        self.write_text(0, 1, &format!("Score: {}", frame.score));
        let lives = format!("Lives: {}", frame.lives);
        self.write_text(0, COLS - lives.len() - 1, &lives);
        if let Some(banner) = frame.banner {
            let col = COLS.saturating_sub(banner.len()) / 2;
            self.write_text(ROWS / 2, col, banner);
        }

        let mut out = String::with_capacity((COLS + 1) * ROWS);
        for row in &self.grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl Surface for AsciiSurface {
    fn present(&mut self, frame: &Frame) {
        let text = self.render(frame);
        let mut stdout = std::io::stdout().lock();
        // Home the cursor and redraw in place
        if let Err(e) = write!(stdout, "\x1b[H{text}").and_then(|_| stdout.flush()) {
            log::warn!("Terminal write failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::BrickPattern;
    use crate::sim::{GamePhase, GameState};

    #[test]
    fn test_render_layout() {
        let state = GameState::with_pattern(1, BrickPattern::Normal);
        let mut surface = AsciiSurface::new(&Settings::default(), 0);
        let text = surface.render(&Frame::capture(&state));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), ROWS);
        assert!(lines.iter().all(|l| l.chars().count() == COLS));
        assert!(lines[0].contains("Score: 0"));
        assert!(lines[0].contains("Lives: 3"));
        // Top brick row starts at y=50 -> grid row 2, x=45 -> col 4
        assert_eq!(lines[2].chars().nth(4), Some('#'));
        // Paddle at y=560 -> row 28
        assert!(lines[28].contains("=========="));
        // Ball at (400, 540) -> row 27, col 40
        assert_eq!(lines[27].chars().nth(40), Some('o'));
    }

    #[test]
    fn test_render_banner() {
        let mut state = GameState::with_pattern(1, BrickPattern::Pyramid);
        state.phase = GamePhase::GameOver;
        let mut surface = AsciiSurface::new(&Settings::default(), 0);
        let text = surface.render(&Frame::capture(&state));
        assert!(text.lines().nth(ROWS / 2).is_some_and(|l| l.contains("Game Over!")));
    }
}
