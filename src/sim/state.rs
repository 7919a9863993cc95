//! Scoring, combo, difficulty and the play/pause/game-over state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bomb::BombEffect;
use super::enemy::EnemyKind;
use super::powerup::PowerupKind;
use crate::consts::{COMBO_STEP, COMBO_STEP_BONUS, COMBO_WINDOW, DIFFICULTY_STEP};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Playing,
    Paused,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// Things that happened during a tick, drained by the host for audio/fx
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Shot { origin: Vec2 },
    EnemyDestroyed { kind: EnemyKind, pos: Vec2, points: u64 },
    ShieldAbsorbed,
    PlayerHit { lives_left: u32 },
    PowerupCollected { kind: PowerupKind },
    BombPickup,
    BombDetonated { destroyed: usize },
    GameOver { score: u64 },
}

/// HUD snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiData {
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub high_score: u64,
    /// This run beat the previous record
    pub new_high_score: bool,
    pub combo: u32,
    pub multiplier: f32,
    pub difficulty: f32,
    pub phase: GamePhase,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub max_bombs: u32,
    pub high_score: u64,
    /// Set once the current run has beaten the stored record
    pub new_high_score: bool,
    pub combo_count: u32,
    pub combo_timer: f32,
    pub score_multiplier: f32,
    pub current_spawn_interval: f32,
    pub spawn_timer: f32,
    /// Active shockwave, at most one at a time
    pub bomb_effect: Option<BombEffect>,
    starting_lives: u32,
    starting_bombs: u32,
    spawn_base_interval: f32,
    spawn_min_interval: f32,
    spawn_interval_decay: f32,
    score_multiplier_decay: u32,
}

impl GameState {
    pub fn new(tuning: &Tuning, high_score: u64) -> Self {
        Self {
            phase: GamePhase::Playing,
            score: 0,
            lives: tuning.starting_lives,
            bombs: tuning.starting_bombs,
            max_bombs: tuning.max_bombs,
            high_score,
            new_high_score: false,
            combo_count: 0,
            combo_timer: 0.0,
            score_multiplier: 1.0,
            current_spawn_interval: tuning.enemy_spawn_base_interval,
            spawn_timer: 0.0,
            bomb_effect: None,
            starting_lives: tuning.starting_lives,
            starting_bombs: tuning.starting_bombs,
            spawn_base_interval: tuning.enemy_spawn_base_interval,
            spawn_min_interval: tuning.enemy_spawn_min_interval,
            spawn_interval_decay: tuning.enemy_spawn_interval_decay,
            score_multiplier_decay: tuning.score_multiplier_decay,
        }
    }

    /// Back to a fresh run; the high score survives
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.starting_lives;
        self.bombs = self.starting_bombs;
        self.new_high_score = false;
        self.combo_count = 0;
        self.combo_timer = 0.0;
        self.score_multiplier = 1.0;
        self.current_spawn_interval = self.spawn_base_interval;
        self.spawn_timer = 0.0;
        self.bomb_effect = None;
    }

    /// Credit a kill through the combo chain. Returns the points awarded.
    pub fn add_score(&mut self, base_points: f32) -> u64 {
        self.combo_count += 1;
        self.combo_timer = COMBO_WINDOW;
        self.score_multiplier = 1.0 + (self.combo_count / COMBO_STEP) as f32 * COMBO_STEP_BONUS;
        let points = (base_points * self.score_multiplier).floor().max(0.0) as u64;
        self.score += points;
        points
    }

    /// Credit raw points, bypassing the combo chain
    pub fn credit(&mut self, points: u64) {
        self.score += points;
    }

    pub fn update_combo_timer(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_timer = 0.0;
                self.combo_count = 0;
                self.score_multiplier = 1.0;
            }
        }
    }

    /// Step function of cumulative score
    pub fn difficulty_multiplier(&self) -> f32 {
        let steps = self.score / u64::from(self.score_multiplier_decay.max(1));
        1.0 + steps as f32 * DIFFICULTY_STEP
    }

    /// Lose a life. Returns true when this ended the run.
    pub fn take_damage(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }

    /// Spend a bomb if one is available and none is already going off
    pub fn use_bomb(&mut self) -> bool {
        if self.bombs > 0 && self.bomb_effect.is_none() {
            self.bombs -= 1;
            return true;
        }
        false
    }

    pub fn add_bomb(&mut self) -> bool {
        if self.bombs < self.max_bombs {
            self.bombs += 1;
            return true;
        }
        false
    }

    pub fn is_bomb_effect_active(&self) -> bool {
        self.bomb_effect.is_some()
    }

    pub fn clear_bomb_effect(&mut self) {
        self.bomb_effect = None;
    }

    /// Count down to the next spawn. Returns true when an enemy is due.
    pub fn update_spawn_timer(&mut self, dt: f32) -> bool {
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.current_spawn_interval =
                (self.current_spawn_interval * self.spawn_interval_decay).max(self.spawn_min_interval);
            self.spawn_timer = self.current_spawn_interval;
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => {}
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Adopt the current score as the high score if it beats it
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            return true;
        }
        false
    }

    pub fn ui_data(&self) -> UiData {
        UiData {
            score: self.score,
            lives: self.lives,
            bombs: self.bombs,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            combo: self.combo_count,
            multiplier: self.score_multiplier,
            difficulty: self.difficulty_multiplier(),
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::Arena;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(&Tuning::default(), 0)
    }

    #[test]
    fn test_initial_state() {
        let s = state();
        assert!(s.is_playing());
        assert_eq!(s.lives, 3);
        assert_eq!(s.bombs, 3);
        assert_eq!(s.score_multiplier, 1.0);
        assert_eq!(s.current_spawn_interval, 2.0);
    }

    #[test]
    fn test_fifth_kill_steps_multiplier() {
        let mut s = state();
        let credited: Vec<u64> = (0..5).map(|_| s.add_score(10.0)).collect();
        assert_eq!(credited, vec![10, 10, 10, 10, 15]);
        assert_eq!(s.score, 55);
        assert_eq!(s.combo_count, 5);
        assert_eq!(s.score_multiplier, 1.5);
    }

    #[test]
    fn test_combo_breaks_after_window() {
        let mut s = state();
        for _ in 0..6 {
            s.add_score(10.0);
        }
        s.update_combo_timer(2.9);
        assert_eq!(s.combo_count, 6);
        s.update_combo_timer(0.2);
        assert_eq!(s.combo_count, 0);
        assert_eq!(s.score_multiplier, 1.0);
        assert_eq!(s.add_score(10.0), 10);
    }

    #[test]
    fn test_difficulty_is_stepwise() {
        let mut s = state();
        s.credit(499);
        assert_eq!(s.difficulty_multiplier(), 1.0);
        s.credit(1);
        assert!((s.difficulty_multiplier() - 1.1).abs() < 1e-6);
        s.credit(1000);
        assert!((s.difficulty_multiplier() - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut s = state();
        assert!(!s.take_damage());
        assert!(!s.take_damage());
        assert_eq!(s.lives, 1);
        assert!(s.take_damage());
        assert_eq!(s.lives, 0);
        assert!(s.is_game_over());
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut s = state();
        s.lives = 1;
        s.take_damage();
        s.resume();
        s.toggle_pause();
        s.pause();
        assert!(s.is_game_over());
        s.reset();
        assert!(s.is_playing());
        assert_eq!(s.lives, 3);
    }

    #[test]
    fn test_pause_resume_guards() {
        let mut s = state();
        s.resume();
        assert!(s.is_playing());
        s.pause();
        assert!(s.is_paused());
        s.pause();
        assert!(s.is_paused());
        s.toggle_pause();
        assert!(s.is_playing());
    }

    #[test]
    fn test_use_bomb_guards() {
        let mut s = state();
        assert!(s.use_bomb());
        assert_eq!(s.bombs, 2);
        s.bomb_effect = Some(BombEffect::new(&Arena::default()));
        assert!(!s.use_bomb());
        assert_eq!(s.bombs, 2);
        s.clear_bomb_effect();
        s.bombs = 0;
        assert!(!s.use_bomb());
        assert_eq!(s.bombs, 0);
    }

    #[test]
    fn test_add_bomb_respects_cap() {
        let mut s = state();
        assert!(s.add_bomb());
        assert!(s.add_bomb());
        assert_eq!(s.bombs, 5);
        assert!(!s.add_bomb());
        assert_eq!(s.bombs, 5);
    }

    #[test]
    fn test_spawn_timer_fires_immediately_then_decays() {
        let mut s = state();
        assert!(s.update_spawn_timer(1.0 / 60.0));
        assert!((s.current_spawn_interval - 1.9).abs() < 1e-5);
        assert!((s.spawn_timer - 1.9).abs() < 1e-5);
        assert!(!s.update_spawn_timer(1.0));
    }

    #[test]
    fn test_spawn_interval_floors_at_minimum() {
        let mut s = state();
        for _ in 0..200 {
            s.spawn_timer = 0.0;
            s.update_spawn_timer(0.0);
        }
        assert_eq!(s.current_spawn_interval, 0.3);
    }

    #[test]
    fn test_record_high_score() {
        let mut s = GameState::new(&Tuning::default(), 100);
        s.credit(80);
        assert!(!s.record_high_score());
        s.credit(40);
        assert!(s.record_high_score());
        assert_eq!(s.high_score, 120);
        assert!(s.new_high_score);
        s.reset();
        assert!(!s.new_high_score);
        assert_eq!(s.high_score, 120);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_ui_data_serializes() {
        let mut s = state();
        s.add_score(10.0);
        let json = serde_json::to_value(s.ui_data()).unwrap();
        assert_eq!(json["score"], 10);
        assert_eq!(json["highScore"], 0);
        assert_eq!(json["newHighScore"], false);
        assert_eq!(json["phase"], "playing");
    }

    proptest! {
        #[test]
        fn prop_multiplier_tracks_combo(kills in 1u32..60, base in 1u32..100) {
            let mut s = state();
            let mut expected = 0u64;
            for n in 1..=kills {
                let mult = 1.0 + (n / 5) as f32 * 0.5;
                expected += (base as f32 * mult).floor() as u64;
                s.add_score(base as f32);
            }
            prop_assert_eq!(s.combo_count, kills);
            prop_assert_eq!(s.score_multiplier, 1.0 + (kills / 5) as f32 * 0.5);
            prop_assert_eq!(s.score, expected);
        }
    }
}
