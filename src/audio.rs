//! Audio playback for simulation sound events
//!
//! Clips are read from disk once at startup. If any clip is missing the
//! manager logs a single warning and silently drops every event afterwards;
//! the simulation never depends on audio succeeding.

use std::collections::HashMap;
use std::path::Path;

use crate::error::GameError;
use crate::settings::Settings;
use crate::sim::SoundEvent;

/// File name for each sound event
pub fn clip_name(event: SoundEvent) -> &'static str {
    match event {
        SoundEvent::PaddleHit => "hit.wav",
        SoundEvent::BrickHit => "brick.wav",
        SoundEvent::PowerUpCollect => "powerup.wav",
    }
}

/// Raw clip data
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub name: &'static str,
    pub bytes: Vec<u8>,
}

/// All clips needed by the game, loaded into memory
#[derive(Debug, Clone)]
pub struct SoundBank {
    clips: HashMap<SoundEvent, SoundClip>,
}

impl SoundBank {
    const EVENTS: [SoundEvent; 3] = [
        SoundEvent::PaddleHit,
        SoundEvent::BrickHit,
        SoundEvent::PowerUpCollect,
    ];

    /// Read every clip from `dir`. Fails on the first missing or unreadable file.
    pub fn load(dir: &Path) -> Result<Self, GameError> {
        let mut clips = HashMap::new();
        for event in Self::EVENTS {
            let name = clip_name(event);
            let path = dir.join(name);
            let bytes = std::fs::read(&path).map_err(|source| GameError::AssetLoad {
                path: path.clone(),
                source,
            })?;
            clips.insert(event, SoundClip { name, bytes });
        }
        Ok(Self { clips })
    }

    pub fn clip(&self, event: SoundEvent) -> Option<&SoundClip> {
        self.clips.get(&event)
    }
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, clip: &SoundClip, volume: f32);
}

/// Sink that only traces what would have played
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, clip: &SoundClip, volume: f32) {
        log::trace!("play {} ({} bytes) at {:.2}", clip.name, clip.bytes.len(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    bank: Option<SoundBank>,
    sink: Box<dyn AudioSink>,
    volume: f32,
}

impl AudioManager {
    /// Load clips from the configured asset directory. A load failure is
    /// logged once and leaves audio disabled.
    pub fn new(settings: &Settings, sink: Box<dyn AudioSink>) -> Self {
        let bank = match SoundBank::load(&settings.asset_dir) {
            Ok(bank) => Some(bank),
            Err(e) => {
                log::warn!("{e} - game will run without sound");
                None
            }
        };
        Self {
            bank,
            sink,
            volume: settings.effective_volume(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.bank.is_some()
    }

    /// Play every event from the last tick
    pub fn play_events(&mut self, events: &[SoundEvent]) {
        let Some(bank) = &self.bank else {
            return;
        };
        if self.volume <= 0.0 {
            return;
        }
        for &event in events {
            if let Some(clip) = bank.clip(event) {
                self.sink.play(clip, self.volume);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default, Clone)]
    struct RecordingSink(Rc<RefCell<Vec<(&'static str, f32)>>>);

    impl AudioSink for RecordingSink {
        fn play(&mut self, clip: &SoundClip, volume: f32) {
            self.0.borrow_mut().push((clip.name, volume));
        }
    }

    fn asset_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["hit.wav", "brick.wav", "powerup.wav"] {
            std::fs::write(dir.path().join(name), b"RIFF").unwrap();
        }
        dir
    }

    #[test]
    fn test_plays_loaded_clips() {
        let dir = asset_dir();
        let settings = Settings {
            asset_dir: dir.path().to_path_buf(),
            master_volume: 0.5,
            sfx_volume: 1.0,
            ..Default::default()
        };
        let sink = RecordingSink::default();
        let mut audio = AudioManager::new(&settings, Box::new(sink.clone()));
        assert!(audio.enabled());

        audio.play_events(&[SoundEvent::BrickHit, SoundEvent::PaddleHit]);
        assert_eq!(*sink.0.borrow(), vec![("brick.wav", 0.5), ("hit.wav", 0.5)]);
    }

    #[test]
    fn test_missing_clip_disables_audio() {
        let dir = asset_dir();
        std::fs::remove_file(dir.path().join("powerup.wav")).unwrap();

        let err = SoundBank::load(dir.path()).unwrap_err();
        assert!(matches!(err, GameError::AssetLoad { ref path, .. } if path.ends_with("powerup.wav")));

        let settings = Settings {
            asset_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let sink = RecordingSink::default();
        let mut audio = AudioManager::new(&settings, Box::new(sink.clone()));
        assert!(!audio.enabled());
        audio.play_events(&[SoundEvent::PowerUpCollect]);
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_muted_plays_nothing() {
        let dir = asset_dir();
        let settings = Settings {
            asset_dir: dir.path().to_path_buf(),
            muted: true,
            ..Default::default()
        };
        let sink = RecordingSink::default();
        let mut audio = AudioManager::new(&settings, Box::new(sink.clone()));
        audio.play_events(&[SoundEvent::PaddleHit]);
        assert!(sink.0.borrow().is_empty());
    }
}
