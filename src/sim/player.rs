//! The player's ship: movement, firing patterns, shield and powerup timers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::powerup::PowerupKind;
use super::projectile::{LASER_SPEED_FACTOR, Projectile};
use super::trail::Trail;
use crate::consts::SHIELD_HITS;
use crate::direction_from_angle;
use crate::input::Controls;
use crate::tuning::Tuning;

/// Angle between triple-shot bullets (22.5 degrees)
pub const TRIPLE_SPREAD: f32 = std::f32::consts::PI / 8.0;
/// Shots leave this far beyond the hull
const MUZZLE_OFFSET: f32 = 4.0;
const PLAYER_TRAIL_LENGTH: usize = 12;

/// Seconds remaining on each powerup, clamped at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerupTimers {
    pub triple: f32,
    pub laser: f32,
    pub shield: f32,
}

impl PowerupTimers {
    pub fn get(&self, kind: PowerupKind) -> f32 {
        match kind {
            PowerupKind::Triple => self.triple,
            PowerupKind::Laser => self.laser,
            PowerupKind::Shield => self.shield,
        }
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        self.get(kind) > 0.0
    }

    fn set(&mut self, kind: PowerupKind, seconds: f32) {
        match kind {
            PowerupKind::Triple => self.triple = seconds,
            PowerupKind::Laser => self.laser = seconds,
            PowerupKind::Shield => self.shield = seconds,
        }
    }

    fn tick(&mut self, dt: f32) {
        for timer in [&mut self.triple, &mut self.laser, &mut self.shield] {
            if *timer > 0.0 {
                *timer = (*timer - dt).max(0.0);
            }
        }
    }
}

/// Result of an enemy touching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still invulnerable, nothing happened
    Ignored,
    /// Shield took the hit
    Absorbed,
    /// Caller must take a life
    LifeLost,
}

/// Projectiles fired in one trigger pull
#[derive(Debug, Clone)]
pub struct Volley {
    pub origin: Vec2,
    pub projectiles: Vec<Projectile>,
}

/// Side effects of one player update for the orchestrator
#[derive(Debug, Clone, Default)]
pub struct PlayerStep {
    pub volley: Option<Volley>,
    /// Normalised movement direction while moving
    pub thrust_dir: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub fire_rate: f32,
    /// Fire cooldown
    pub cd: f32,
    pub invulnerable: f32,
    pub powerups: PowerupTimers,
    pub shield_health: u32,
    pub thrust_phase: f32,
    pub trail: Trail,
    bullet_speed: f32,
    invulnerability_time: f32,
    powerup_duration: f32,
}

impl Player {
    /// New player at the centre of the arena
    pub fn new(arena: &Arena, tuning: &Tuning) -> Self {
        Self {
            pos: arena.center(),
            speed: tuning.player_speed,
            radius: tuning.player_radius,
            fire_rate: tuning.fire_rate,
            cd: 0.0,
            invulnerable: 0.0,
            powerups: PowerupTimers::default(),
            shield_health: 0,
            thrust_phase: 0.0,
            trail: Trail::new(PLAYER_TRAIL_LENGTH),
            bullet_speed: tuning.bullet_speed,
            invulnerability_time: tuning.invulnerability_time,
            powerup_duration: tuning.powerup_duration,
        }
    }

    pub fn update(&mut self, dt: f32, controls: &Controls, arena: &Arena, tuning: &Tuning) -> PlayerStep {
        let mut step = PlayerStep::default();

        // Movement
        if controls.move_dir != Vec2::ZERO {
            let dir = controls.move_dir.normalize_or_zero();
            self.pos += dir * (self.speed * dt);
            self.trail.record(self.pos);
            self.thrust_phase += dt * 15.0;
            step.thrust_dir = Some(dir);
        }
        self.pos = arena.clamp_circle(self.pos, self.radius);

        // Shooting
        if self.cd > 0.0 {
            self.cd -= dt;
        }
        if controls.aim_dir != Vec2::ZERO && self.cd <= 0.0 {
            step.volley = Some(self.fire(controls.aim_dir.normalize_or_zero(), tuning));
            self.cd = self.fire_rate;
        }

        self.powerups.tick(dt);
        if self.invulnerable > 0.0 {
            self.invulnerable -= dt;
        }

        step
    }

    /// Shot pattern priority: triple, then laser, then a single bullet
    fn fire(&self, shot_dir: Vec2, tuning: &Tuning) -> Volley {
        let origin = self.pos + shot_dir * (self.radius + MUZZLE_OFFSET);
        let projectiles = if self.powerups.is_active(PowerupKind::Triple) {
            let base = shot_dir.y.atan2(shot_dir.x);
            (-1..=1)
                .map(|i| {
                    let dir = direction_from_angle(base + i as f32 * TRIPLE_SPREAD);
                    Projectile::bullet(origin, dir * self.bullet_speed, tuning)
                })
                .collect()
        } else if self.powerups.is_active(PowerupKind::Laser) {
            vec![Projectile::laser(
                origin,
                shot_dir * (self.bullet_speed * LASER_SPEED_FACTOR),
                tuning,
            )]
        } else {
            vec![Projectile::bullet(origin, shot_dir * self.bullet_speed, tuning)]
        };
        Volley {
            origin,
            projectiles,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Blink phase for the invulnerability flash
    pub fn is_flashing(&self) -> bool {
        self.is_invulnerable() && ((self.invulnerable * 10.0).floor() as i32) % 2 == 0
    }

    pub fn hit(&mut self) -> HitOutcome {
        if self.is_invulnerable() {
            return HitOutcome::Ignored;
        }
        if self.shield_health > 0 {
            self.shield_health -= 1;
            self.invulnerable = self.invulnerability_time * 0.5;
            return HitOutcome::Absorbed;
        }
        self.invulnerable = self.invulnerability_time;
        HitOutcome::LifeLost
    }

    /// Refresh a powerup to full duration; shields also refill to full health
    pub fn add_powerup(&mut self, kind: PowerupKind) {
        self.powerups.set(kind, self.powerup_duration);
        if kind == PowerupKind::Shield {
            self.shield_health = SHIELD_HITS;
        }
    }
}
