//! The session context: every entity collection plus scoring state
//!
//! One `World` is owned by the host and handed to [`tick`](super::tick::tick)
//! each frame. Nothing in the simulation touches globals.

use glam::Vec2;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::bomb::BombEffect;
use super::enemy::Enemy;
use super::particle::{self, Blast, Particle};
use super::player::Player;
use super::powerup::{Powerup, PowerupKind};
use super::projectile::Projectile;
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Bomb multi-kills above this count earn a bonus
const BOMB_BONUS_THRESHOLD: usize = 5;
const BOMB_BONUS_PER_KILL: u64 = 5;
pub(crate) const BOMB_PICKUP_COLOR: u32 = 0xffff00;

#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub arena: Arena,
    pub player: Player,
    pub bullets: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub powerups: Vec<Powerup>,
    pub state: GameState,
    /// Upper bound on live particles, zero disables them
    pub particle_cap: usize,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl World {
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let arena = Arena::default();
        Self {
            player: Player::new(&arena, &tuning),
            state: GameState::new(&tuning, high_score),
            tuning,
            arena,
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            powerups: Vec::new(),
            particle_cap: usize::MAX,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start a fresh run in the current arena
    pub fn reset(&mut self) {
        self.player = Player::new(&self.arena, &self.tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.powerups.clear();
        self.events.clear();
        self.state.reset();
        info!("New run started (high score {})", self.state.high_score);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
        self.player.pos = self.arena.clamp_circle(self.player.pos, self.player.radius);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand this frame's events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn explode(&mut self, pos: Vec2, color: u32, blast: Blast) {
        if self.particle_cap == 0 {
            return;
        }
        particle::spawn_explosion(&mut self.particles, &mut self.rng, &self.tuning, pos, color, blast);
    }

    pub fn burst(&mut self, pos: Vec2, color: u32, count: u32, kind: particle::ParticleKind) {
        if self.particle_cap == 0 {
            return;
        }
        particle::spawn_burst(&mut self.particles, &mut self.rng, &self.tuning, pos, color, count, kind);
    }

    /// Possibly leave a bomb or a powerup where an enemy died
    pub(crate) fn roll_drop(&mut self, pos: Vec2) {
        if self.rng.random::<f32>() >= self.tuning.powerup_drop_chance {
            return;
        }
        if self.state.bombs < self.state.max_bombs && self.rng.random::<f32>() < self.tuning.bomb_drop_chance {
            self.state.add_bomb();
            self.explode(pos, BOMB_PICKUP_COLOR, Blast::Normal);
            self.push_event(GameEvent::BombPickup);
        } else {
            let kind = PowerupKind::random(&mut self.rng);
            let powerup = Powerup::spawn(kind, pos, &self.tuning, &mut self.rng);
            self.powerups.push(powerup);
        }
    }

    /// Set off a bomb around the player. Returns false when none could be used.
    ///
    /// Every enemy within the blast radius dies for its raw score value.
    /// Splitter children released by the blast survive it.
    pub fn detonate_bomb(&mut self) -> bool {
        if !self.state.is_playing() || !self.state.use_bomb() {
            return false;
        }
        let effect = BombEffect::new(&self.arena);
        let reach = effect.max_radius;
        self.state.bomb_effect = Some(effect);

        let player_pos = self.player.pos;
        let mut children = Vec::new();
        let mut destroyed = 0usize;
        let mut i = self.enemies.len();
        while i > 0 {
            i -= 1;
            if self.enemies[i].pos.distance(player_pos) > reach {
                continue;
            }
            let mut enemy = self.enemies.remove(i);
            self.state.credit(enemy.score_value.floor() as u64);
            destroyed += 1;
            self.explode(enemy.pos, enemy.color, Blast::Normal);
            children.extend(enemy.on_destroy(&self.tuning));
        }
        self.enemies.extend(children);

        if destroyed > BOMB_BONUS_THRESHOLD {
            self.state.credit(destroyed as u64 * BOMB_BONUS_PER_KILL);
        }
        debug!("Bomb destroyed {destroyed} enemies");
        self.push_event(GameEvent::BombDetonated { destroyed });
        true
    }
}
