//! Host-side session driver
//!
//! Glues the simulation to the outside world: turns input into commands
//! and controls, owns the frame clock, forwards events to audio and keeps
//! the high score persisted.

use log::info;

use crate::audio::{AudioSink, BGM_PAUSED_VOLUME, BGM_VOLUME, GAME_OVER_VOLUME, Mixer, Sound, cue_for};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{Command, Controls, InputState};
use crate::persistence::{KeyValueStore, load_high_score, save_high_score};
use crate::settings::Settings;
use crate::sim::{GameEvent, UiData, World, autopilot, tick};
use crate::tuning::Tuning;

pub struct Game {
    world: World,
    settings: Settings,
    audio: Mixer<Box<dyn AudioSink>>,
    store: Box<dyn KeyValueStore>,
    accumulator: f32,
    autopilot: bool,
}

impl Game {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        audio: Box<dyn AudioSink>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let high_score = load_high_score(store.as_ref());
        let mut game = Self {
            world: World::new(seed, tuning, high_score),
            settings: Settings::default(),
            audio: Mixer::new(audio),
            store,
            accumulator: 0.0,
            autopilot: false,
        };
        game.apply_settings(settings);
        game.audio.start_bgm();
        game.audio.set_bgm_volume(BGM_VOLUME);
        info!("Session started (seed {seed}, high score {high_score})");
        game
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ui_data(&self) -> UiData {
        self.world.state.ui_data()
    }

    pub fn audio(&self) -> &Mixer<Box<dyn AudioSink>> {
        &self.audio
    }

    /// Demo mode: the built-in pilot replaces player input
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        info!("Autopilot: {enabled}");
    }

    pub fn is_autopilot(&self) -> bool {
        self.autopilot
    }

    fn apply_settings(&mut self, settings: Settings) {
        self.world.particle_cap = settings.max_particles();
        self.audio.set_master_volume(settings.master_volume);
        self.audio.set_sfx_volume(settings.sfx_volume);
        self.audio.set_music_volume(settings.music_volume);
        if !settings.fixed_timestep {
            self.accumulator = 0.0;
        }
        self.settings = settings;
    }

    /// Adopt new settings and persist them
    pub fn update_settings(&mut self, settings: Settings) {
        self.apply_settings(settings);
        self.settings.save(self.store.as_mut());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    /// Fresh run; the stored high score is re-read in case another tab beat it
    pub fn restart(&mut self) {
        let stored = load_high_score(self.store.as_ref());
        self.world.state.high_score = self.world.state.high_score.max(stored);
        self.world.reset();
        self.accumulator = 0.0;
        self.audio.start_bgm();
        self.audio.set_bgm_volume(BGM_VOLUME);
    }

    /// Run one rendered frame of `dt` seconds
    pub fn frame(&mut self, dt: f32, input: &mut InputState) {
        for command in input.commands(self.world.state.phase) {
            self.apply_command(command);
        }

        let controls = if self.autopilot {
            autopilot(&self.world)
        } else {
            Controls::from_input(input)
        };
        input.end_frame();

        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        if self.settings.fixed_timestep {
            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.world, &controls, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop backlog the substep cap could not absorb
            self.accumulator = self.accumulator.min(SIM_DT);
        } else {
            tick(&mut self.world, &controls, dt);
        }

        self.dispatch_events();
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::Restart => self.restart(),
            Command::TogglePause => {
                self.world.state.toggle_pause();
                let volume = if self.world.state.is_paused() {
                    BGM_PAUSED_VOLUME
                } else {
                    BGM_VOLUME
                };
                self.audio.set_bgm_volume(volume);
            }
            Command::Resume => {
                self.world.state.resume();
                self.audio.set_bgm_volume(BGM_VOLUME);
            }
            Command::Bomb => {
                self.world.detonate_bomb();
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.world.drain_events() {
            if let Some((sound, volume)) = cue_for(&event) {
                self.audio.play_sound(sound, volume);
            }
            if let GameEvent::GameOver { score } = event {
                self.on_game_over(score);
            }
        }
    }

    fn on_game_over(&mut self, score: u64) {
        self.audio.stop_bgm();
        self.audio.play_sound(Sound::GameOver, GAME_OVER_VOLUME);
        info!("Game over with {score} points");
        if self.world.state.record_high_score() {
            info!("New high score: {score}");
            save_high_score(self.store.as_mut(), score);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::input::Key;
    use crate::persistence::{HIGH_SCORE_KEY, MemoryStore, StorageError};
    use crate::sim::{Enemy, EnemyKind};

    /// Shared view of what the game sent to audio and storage
    #[derive(Default)]
    struct Log {
        sounds: Vec<(Sound, f32)>,
        bgm_playing: bool,
        bgm_volume: f32,
        store: MemoryStore,
    }

    struct SharedAudio(Rc<RefCell<Log>>);

    impl AudioSink for SharedAudio {
        fn play_sound(&mut self, sound: Sound, volume: f32) {
            self.0.borrow_mut().sounds.push((sound, volume));
        }
        fn start_bgm(&mut self) {
            self.0.borrow_mut().bgm_playing = true;
        }
        fn stop_bgm(&mut self) {
            self.0.borrow_mut().bgm_playing = false;
        }
        fn set_bgm_volume(&mut self, volume: f32) {
            self.0.borrow_mut().bgm_volume = volume;
        }
    }

    struct SharedStore(Rc<RefCell<Log>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().store.get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().store.set(key, value)
        }
    }

    fn full_volume() -> Settings {
        Settings {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            ..Settings::default()
        }
    }

    fn game_with(log: &Rc<RefCell<Log>>, settings: Settings) -> Game {
        Game::new(
            1,
            Tuning::default(),
            settings,
            Box::new(SharedAudio(log.clone())),
            Box::new(SharedStore(log.clone())),
        )
    }

    fn press(game: &mut Game, input: &mut InputState, key: Key) {
        input.key_down(key);
        game.frame(0.0, input);
        input.key_up(key);
    }

    #[test]
    fn test_new_loads_high_score_and_starts_music() {
        let log = Rc::new(RefCell::new(Log::default()));
        log.borrow_mut().store.set(HIGH_SCORE_KEY, "777").unwrap();
        let game = game_with(&log, full_volume());
        assert_eq!(game.ui_data().high_score, 777);
        assert!(log.borrow().bgm_playing);
        assert!((log.borrow().bgm_volume - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_pause_lowers_music() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();

        press(&mut game, &mut input, Key::P);
        assert!(game.world().state.is_paused());
        assert!((log.borrow().bgm_volume - 0.1).abs() < 1e-6);

        press(&mut game, &mut input, Key::Escape);
        assert!(game.world().state.is_playing());
        assert!((log.borrow().bgm_volume - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_paused_frames_do_not_advance() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();
        press(&mut game, &mut input, Key::P);
        for _ in 0..10 {
            game.frame(0.1, &mut input);
        }
        assert!(game.world().enemies.is_empty());
    }

    #[test]
    fn test_space_uses_bomb() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();
        press(&mut game, &mut input, Key::Space);
        assert_eq!(game.world().state.bombs, 2);
        assert!(log.borrow().sounds.contains(&(Sound::GameOver, 0.3)));
    }

    #[test]
    fn test_shots_reach_audio() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();
        input.key_down(Key::ArrowRight);
        game.frame(1.0 / 60.0, &mut input);
        assert_eq!(log.borrow().sounds.first(), Some(&(Sound::Shoot, 0.3)));
    }

    #[test]
    fn test_game_over_saves_high_score_and_restarts() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();
        {
            let world = game.world_mut();
            world.state.lives = 1;
            world.state.credit(250);
            let pos = world.player.pos;
            let tuning = world.tuning.clone();
            world.enemies.push(Enemy::new(EnemyKind::Basic, pos, Vec2::ZERO, 0.0, &tuning));
        }
        game.frame(1.0 / 60.0, &mut input);
        assert!(game.world().state.is_game_over());
        assert!(!log.borrow().bgm_playing);
        assert!(log.borrow().sounds.contains(&(Sound::GameOver, 0.8)));
        assert_eq!(log.borrow().store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("250"));

        press(&mut game, &mut input, Key::R);
        assert!(game.world().state.is_playing());
        assert_eq!(game.ui_data().score, 0);
        assert_eq!(game.ui_data().high_score, 250);
        assert!(log.borrow().bgm_playing);
    }

    /// Run `score` points into a one-life run and end it this frame
    fn end_run_with(game: &mut Game, input: &mut InputState, score: u64) {
        let world = game.world_mut();
        world.state.lives = 1;
        world.state.credit(score);
        let pos = world.player.pos;
        let tuning = world.tuning.clone();
        world.enemies.push(Enemy::new(EnemyKind::Basic, pos, Vec2::ZERO, 0.0, &tuning));
        game.frame(1.0 / 60.0, input);
        assert!(game.world().state.is_game_over());
    }

    #[test]
    fn test_new_high_score_flag() {
        let log = Rc::new(RefCell::new(Log::default()));
        log.borrow_mut().store.set(HIGH_SCORE_KEY, "250").unwrap();
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();

        // Tying the record is not a new record
        end_run_with(&mut game, &mut input, 250);
        assert!(!game.ui_data().new_high_score);
        assert_eq!(game.ui_data().high_score, 250);

        press(&mut game, &mut input, Key::R);
        end_run_with(&mut game, &mut input, 300);
        assert!(game.ui_data().new_high_score);
        assert_eq!(game.ui_data().high_score, 300);
        assert_eq!(log.borrow().store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("300"));

        press(&mut game, &mut input, Key::R);
        assert!(game.world().state.is_playing());
        assert!(!game.ui_data().new_high_score);
        assert_eq!(game.ui_data().high_score, 300);
    }

    #[test]
    fn test_fixed_timestep_substeps() {
        let log = Rc::new(RefCell::new(Log::default()));
        let settings = Settings {
            fixed_timestep: true,
            ..full_volume()
        };
        let mut game = game_with(&log, settings);
        let mut input = InputState::new();
        input.key_down(Key::D);
        // Half a substep: nothing moves yet
        game.frame(SIM_DT * 0.5, &mut input);
        assert_eq!(game.world().player.pos, Vec2::new(400.0, 300.0));
        game.frame(SIM_DT * 0.6, &mut input);
        let moved = game.world().player.pos.x - 400.0;
        assert!((moved - 250.0 * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_huge_dt_is_clamped() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let mut input = InputState::new();
        input.key_down(Key::D);
        game.frame(5.0, &mut input);
        let moved = game.world().player.pos.x - 400.0;
        assert!((moved - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_settings_cap_particles_and_persist() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        let low = Settings {
            particles: false,
            ..Settings::default()
        };
        game.update_settings(low.clone());
        assert_eq!(game.world().particle_cap, 0);
        let stored = Settings::load(&log.borrow().store);
        assert_eq!(stored, low);
    }

    #[test]
    fn test_autopilot_drives_player() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = game_with(&log, full_volume());
        game.set_autopilot(true);
        let mut input = InputState::new();
        for _ in 0..600 {
            game.frame(1.0 / 60.0, &mut input);
        }
        assert!(log.borrow().sounds.iter().any(|(s, _)| *s == Sound::Shoot));
    }
}
