//! Surface with no display: logs a summary every N frames

use super::Surface;
use crate::sim::Frame;

pub struct HeadlessSurface {
    frames: u64,
    log_every: u64,
    last_banner: Option<&'static str>,
}

impl HeadlessSurface {
    pub fn new(log_every: u64) -> Self {
        Self {
            frames: 0,
            log_every: log_every.max(1),
            last_banner: None,
        }
    }
}

impl Surface for HeadlessSurface {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;

        if frame.banner != self.last_banner {
            if let Some(banner) = frame.banner {
                log::info!("{banner} (score {})", frame.score);
            }
            self.last_banner = frame.banner;
        }

        if self.frames % self.log_every == 0 {
            log::info!(
                "frame {}: score={} lives={} balls={} bricks={} powerups={}",
                self.frames,
                frame.score,
                frame.lives,
                frame.balls.len(),
                frame.bricks.len(),
                frame.powerups.len(),
            );
        }
    }
}
