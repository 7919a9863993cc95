//! Collectible powerups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::tuning::Tuning;

pub const POWERUP_RADIUS: f32 = 8.0;
/// Seconds a dropped powerup stays on the field
pub const POWERUP_LIFETIME: f32 = 10.0;
/// Fade-out window at the end of a powerup's life
const FADE_WINDOW: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Triple,
    Laser,
    Shield,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Triple, PowerupKind::Laser, PowerupKind::Shield];

    pub fn color(&self) -> u32 {
        match self {
            PowerupKind::Triple => 0xffff00,
            PowerupKind::Laser => 0xff0000,
            PowerupKind::Shield => 0x00ffff,
        }
    }

    /// HUD glyph
    pub fn symbol(&self) -> char {
        match self {
            PowerupKind::Triple => '3',
            PowerupKind::Laser => 'L',
            PowerupKind::Shield => 'S',
        }
    }

    /// Uniform pick across all kinds
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: f32,
    pub lifetime: f32,
    pub pulse_phase: f32,
}

impl Powerup {
    /// Drop a powerup with a gentle random drift
    pub fn spawn<R: Rng>(kind: PowerupKind, pos: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let vx = (rng.random::<f32>() - 0.5) * tuning.powerup_speed;
        let vy = (rng.random::<f32>() - 0.5) * tuning.powerup_speed;
        let vel = Vec2::new(vx, vy);
        let pulse_phase = rng.random::<f32>() * std::f32::consts::TAU;
        Self::new(kind, pos, vel, pulse_phase)
    }

    pub fn new(kind: PowerupKind, pos: Vec2, vel: Vec2, pulse_phase: f32) -> Self {
        Self {
            kind,
            pos,
            vel,
            radius: POWERUP_RADIUS,
            age: 0.0,
            lifetime: POWERUP_LIFETIME,
            pulse_phase,
        }
    }

    /// Drift and bounce. Returns false once the powerup has expired.
    pub fn update(&mut self, dt: f32, arena: &Arena) -> bool {
        self.age += dt;
        self.pulse_phase += dt * 4.0;
        self.pos += self.vel * dt;

        let crossing = arena.crossing(self.pos, self.radius);
        if crossing.x {
            self.vel.x = -self.vel.x;
        }
        if crossing.y {
            self.vel.y = -self.vel.y;
        }
        self.pos = arena.clamp_circle(self.pos, self.radius);

        !self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Render alpha, fading linearly over the last two seconds
    pub fn fade_alpha(&self) -> f32 {
        if self.age > self.lifetime - FADE_WINDOW {
            ((self.lifetime - self.age) / FADE_WINDOW).max(0.0)
        } else {
            1.0
        }
    }
}
