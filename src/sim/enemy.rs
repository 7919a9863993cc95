//! Enemy kinds and their per-frame behaviour

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::trail::Trail;
use crate::direction_from_angle;
use crate::tuning::Tuning;

/// Children released by a splitter
pub const SPLITTER_CHILDREN: usize = 3;
/// Launch speed of splitter children
pub const SPLITTER_CHILD_SPEED: f32 = 150.0;
/// Fast enemies are re-boosted below this fraction of max speed
const FAST_SPEED_FLOOR: f32 = 0.8;
/// Rate at which homing velocity blends toward the target velocity
const HOMING_BLEND_RATE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Homing,
    Splitter,
    Fast,
    Mini,
}

/// Construction-time parameters for an enemy kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub radius: f32,
    /// Fractional for non-integer multiples of the base score
    pub score_value: f32,
    pub max_speed: f32,
    /// Steering acceleration, homing enemies only
    pub homing_strength: Option<f32>,
    pub trail_length: usize,
    pub pulse_rate: f32,
    pub color: u32,
}

impl EnemyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Homing => "homing",
            EnemyKind::Splitter => "splitter",
            EnemyKind::Fast => "fast",
            EnemyKind::Mini => "mini",
        }
    }

    pub fn params(&self, tuning: &Tuning) -> EnemyParams {
        let r = tuning.enemy_base_radius;
        let score = tuning.base_enemy_score as f32;
        let (radius_scale, score_scale, max_speed) = match self {
            EnemyKind::Basic => (1.0, 1.0, 150.0),
            EnemyKind::Homing => (0.8, 2.0, 120.0),
            EnemyKind::Splitter => (1.2, 3.0, 100.0),
            EnemyKind::Fast => (0.6, 1.5, 300.0),
            EnemyKind::Mini => (0.4, 0.5, 120.0),
        };
        EnemyParams {
            radius: r * radius_scale,
            score_value: score * score_scale,
            max_speed,
            homing_strength: (*self == EnemyKind::Homing).then_some(80.0),
            trail_length: if *self == EnemyKind::Fast { 15 } else { 10 },
            pulse_rate: if *self == EnemyKind::Fast { 10.0 } else { 5.0 },
            color: match self {
                EnemyKind::Basic => 0xff00ff,
                EnemyKind::Homing => 0xff8800,
                EnemyKind::Splitter => 0x88ff00,
                EnemyKind::Fast => 0x00ffff,
                EnemyKind::Mini => 0x88ff88,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub score_value: f32,
    pub max_speed: f32,
    pub homing_strength: Option<f32>,
    pub color: u32,
    /// Splitter children already released
    pub has_spawned: bool,
    pub age: f32,
    pub pulse_phase: f32,
    pulse_rate: f32,
    pub trail: Trail,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, vel: Vec2, pulse_phase: f32, tuning: &Tuning) -> Self {
        let params = kind.params(tuning);
        Self {
            kind,
            pos,
            vel,
            radius: params.radius,
            score_value: params.score_value,
            max_speed: params.max_speed,
            homing_strength: params.homing_strength,
            color: params.color,
            has_spawned: false,
            age: 0.0,
            pulse_phase,
            pulse_rate: params.pulse_rate,
            trail: Trail::new(params.trail_length),
        }
    }

    /// Steer, integrate and bounce off the arena edges
    pub fn update<R: Rng>(&mut self, dt: f32, player_pos: Vec2, arena: &Arena, rng: &mut R) {
        self.age += dt;

        match self.kind {
            EnemyKind::Homing => {
                let strength = self.homing_strength.unwrap_or(0.0);
                let to_player = (player_pos - self.pos).normalize_or_zero();
                let target_speed = (self.vel.length() + strength * dt).min(self.max_speed);
                let target_vel = to_player * target_speed;
                self.vel += (target_vel - self.vel) * (dt * HOMING_BLEND_RATE);
            }
            EnemyKind::Fast if self.vel.length() < self.max_speed * FAST_SPEED_FLOOR => {
                self.vel = self.vel.normalize_or_zero() * self.max_speed;
            }
            _ => {}
        }

        // Soft, jittered bounce on predicted edge crossings
        let next = self.pos + self.vel * dt;
        let crossing = arena.crossing(next, self.radius);
        if crossing.x {
            self.vel.x *= rng.random_range(-1.0f32..=-0.8);
        }
        if crossing.y {
            self.vel.y *= rng.random_range(-1.0f32..=-0.8);
        }

        self.pos += self.vel * dt;
        self.trail.record(self.pos);
        self.pulse_phase += dt * self.pulse_rate;
        self.pos = arena.clamp_circle(self.pos, self.radius);
    }

    /// Destruction hook: a splitter releases its children exactly once
    pub fn on_destroy(&mut self, tuning: &Tuning) -> Vec<Enemy> {
        if self.kind != EnemyKind::Splitter || self.has_spawned {
            return Vec::new();
        }
        self.has_spawned = true;
        (0..SPLITTER_CHILDREN)
            .map(|i| {
                let angle = i as f32 / SPLITTER_CHILDREN as f32 * std::f32::consts::TAU;
                let vel = direction_from_angle(angle) * SPLITTER_CHILD_SPEED;
                Enemy::new(EnemyKind::Mini, self.pos, vel, self.pulse_phase, tuning)
            })
            .collect()
    }
}
