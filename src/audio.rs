//! Sound cues and the audio sink interface
//!
//! The game never synthesises audio itself. It names a cue and a volume
//! and hands them to whatever `AudioSink` the host plugged in.

use crate::sim::GameEvent;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    EnemyHit,
    PlayerHit,
    Powerup,
    /// Also doubles as the bomb blast
    GameOver,
}

impl Sound {
    /// Cue name as the browser audio layer knows it
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::EnemyHit => "enemyHit",
            Sound::PlayerHit => "playerHit",
            Sound::Powerup => "powerup",
            Sound::GameOver => "gameOver",
        }
    }
}

pub const BGM_VOLUME: f32 = 0.3;
pub const BGM_PAUSED_VOLUME: f32 = 0.1;
pub const GAME_OVER_VOLUME: f32 = 0.8;

/// Whatever actually makes noise. Failures stay inside the sink.
pub trait AudioSink {
    fn play_sound(&mut self, sound: Sound, volume: f32);
    fn start_bgm(&mut self);
    fn stop_bgm(&mut self);
    fn set_bgm_volume(&mut self, volume: f32);
}

/// Silent sink for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _sound: Sound, _volume: f32) {}
    fn start_bgm(&mut self) {}
    fn stop_bgm(&mut self) {}
    fn set_bgm_volume(&mut self, _volume: f32) {}
}

/// Cue and volume for a simulation event, if it makes a sound.
///
/// Game over is handled by the session, which also stops the music.
pub fn cue_for(event: &GameEvent) -> Option<(Sound, f32)> {
    match event {
        GameEvent::Shot { .. } => Some((Sound::Shoot, 0.3)),
        GameEvent::EnemyDestroyed { .. } => Some((Sound::EnemyHit, 0.4)),
        GameEvent::PlayerHit { .. } => Some((Sound::PlayerHit, 0.6)),
        GameEvent::PowerupCollected { .. } => Some((Sound::Powerup, 0.5)),
        GameEvent::BombDetonated { .. } => Some((Sound::GameOver, 0.3)),
        GameEvent::ShieldAbsorbed | GameEvent::BombPickup | GameEvent::GameOver { .. } => None,
    }
}

/// Applies master/sfx/music levels and mute before forwarding to a sink
pub struct Mixer<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    bgm_level: f32,
}

impl<S: AudioSink> Mixer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            bgm_level: BGM_VOLUME,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.refresh_bgm();
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.refresh_bgm();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_bgm();
    }

    fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    fn refresh_bgm(&mut self) {
        let level = self.bgm_level * self.music_gain();
        self.sink.set_bgm_volume(level);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: AudioSink> AudioSink for Mixer<S> {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        let gain = self.sfx_gain();
        if gain > 0.0 {
            self.sink.play_sound(sound, volume * gain);
        }
    }

    fn start_bgm(&mut self) {
        self.sink.start_bgm();
        self.refresh_bgm();
    }

    fn stop_bgm(&mut self) {
        self.sink.stop_bgm();
    }

    fn set_bgm_volume(&mut self, volume: f32) {
        self.bgm_level = volume;
        self.refresh_bgm();
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        (**self).play_sound(sound, volume);
    }

    fn start_bgm(&mut self) {
        (**self).start_bgm();
    }

    fn stop_bgm(&mut self) {
        (**self).stop_bgm();
    }

    fn set_bgm_volume(&mut self, volume: f32) {
        (**self).set_bgm_volume(volume);
    }
}

/// Sink that remembers what it was asked to do
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub sounds: Vec<(Sound, f32)>,
    pub bgm_playing: bool,
    pub bgm_volume: f32,
    pub bgm_starts: u32,
}

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        self.sounds.push((sound, volume));
    }

    fn start_bgm(&mut self) {
        self.bgm_playing = true;
        self.bgm_starts += 1;
    }

    fn stop_bgm(&mut self) {
        self.bgm_playing = false;
    }

    fn set_bgm_volume(&mut self, volume: f32) {
        self.bgm_volume = volume;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyKind, PowerupKind};
    use glam::Vec2;

    #[test]
    fn test_event_cues() {
        let shot = GameEvent::Shot { origin: Vec2::ZERO };
        assert_eq!(cue_for(&shot), Some((Sound::Shoot, 0.3)));
        let kill = GameEvent::EnemyDestroyed {
            kind: EnemyKind::Basic,
            pos: Vec2::ZERO,
            points: 10,
        };
        assert_eq!(cue_for(&kill), Some((Sound::EnemyHit, 0.4)));
        let pickup = GameEvent::PowerupCollected {
            kind: PowerupKind::Shield,
        };
        assert_eq!(cue_for(&pickup), Some((Sound::Powerup, 0.5)));
        assert_eq!(
            cue_for(&GameEvent::BombDetonated { destroyed: 3 }),
            Some((Sound::GameOver, 0.3))
        );
        assert_eq!(cue_for(&GameEvent::ShieldAbsorbed), None);
    }

    #[test]
    fn test_mixer_scales_sfx() {
        let mut mixer = Mixer::new(RecordingAudio::default());
        mixer.set_master_volume(0.5);
        mixer.set_sfx_volume(0.5);
        mixer.play_sound(Sound::Shoot, 0.4);
        let (sound, vol) = mixer.sink().sounds[0];
        assert_eq!(sound, Sound::Shoot);
        assert!((vol - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut mixer = Mixer::new(RecordingAudio::default());
        mixer.start_bgm();
        mixer.set_muted(true);
        mixer.play_sound(Sound::EnemyHit, 1.0);
        assert!(mixer.sink().sounds.is_empty());
        assert_eq!(mixer.sink().bgm_volume, 0.0);
    }

    #[test]
    fn test_bgm_level_follows_music_volume() {
        let mut mixer = Mixer::new(RecordingAudio::default());
        mixer.set_master_volume(1.0);
        mixer.set_bgm_volume(BGM_PAUSED_VOLUME);
        assert!((mixer.sink().bgm_volume - 0.1).abs() < 1e-6);
        mixer.set_music_volume(0.5);
        assert!((mixer.sink().bgm_volume - 0.05).abs() < 1e-6);
    }
}
