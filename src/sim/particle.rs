//! Cosmetic particles (explosions, sparks, thrust)
//!
//! Particles never affect gameplay; they only need to move, fade, and die.

use glam::Vec2;
use rand::Rng;

use crate::direction_from_angle;
use crate::tuning::Tuning;

/// Per-update velocity retention
pub const PARTICLE_DRAG: f32 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Circle,
    Spark,
}

/// Explosion sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blast {
    Normal,
    Large,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, color: u32, size: f32, kind: ParticleKind) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            color,
            size,
            kind,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
        self.vel *= PARTICLE_DRAG;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Remaining life fraction, used as render alpha
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).max(0.0)
    }
}

/// Spray `count` particles in random directions from `pos`
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    tuning: &Tuning,
    pos: Vec2,
    color: u32,
    count: u32,
    kind: ParticleKind,
) {
    let speed_span = tuning.particle_max_speed - tuning.particle_min_speed;
    for _ in 0..count {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = tuning.particle_min_speed + rng.random::<f32>() * speed_span;
        let (size, life) = match kind {
            ParticleKind::Spark => (3.0 + rng.random::<f32>() * 2.0, tuning.particle_lifetime * 1.5),
            ParticleKind::Circle => (2.0, tuning.particle_lifetime),
        };
        particles.push(Particle::new(
            pos,
            direction_from_angle(angle) * speed,
            life,
            color,
            size,
            kind,
        ));
    }
}

/// Circle burst plus a few bright sparks
pub fn spawn_explosion<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    tuning: &Tuning,
    pos: Vec2,
    color: u32,
    blast: Blast,
) {
    let (circles, sparks) = match blast {
        Blast::Normal => (tuning.particle_count, 4),
        Blast::Large => (tuning.particle_count * 2, 8),
    };
    spawn_burst(particles, rng, tuning, pos, color, circles, ParticleKind::Circle);
    spawn_burst(particles, rng, tuning, pos, color, sparks, ParticleKind::Spark);
}

/// Drop the oldest particles beyond `cap`
pub fn enforce_cap(particles: &mut Vec<Particle>, cap: usize) {
    if particles.len() > cap {
        let excess = particles.len() - cap;
        particles.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_update_applies_drag_and_decay() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(100.0, 0.0), 0.6, 0xffffff, 2.0, ParticleKind::Circle);
        p.update(0.1);
        assert!((p.pos.x - 10.0).abs() < 1e-5);
        assert!((p.vel.x - 98.0).abs() < 1e-4);
        assert!((p.life - 0.5).abs() < 1e-6);
        assert!((p.alpha() - 0.5 / 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_life_monotonic_until_dead() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ONE, 0.3, 0, 1.0, ParticleKind::Spark);
        let mut last = p.life;
        while !p.is_dead() {
            p.update(0.05);
            assert!(p.life < last);
            last = p.life;
        }
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_explosion_counts() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut particles = Vec::new();
        spawn_explosion(&mut particles, &mut rng, &tuning, Vec2::ZERO, 0xff0000, Blast::Normal);
        assert_eq!(particles.len(), 20);
        let sparks = particles.iter().filter(|p| p.kind == ParticleKind::Spark).count();
        assert_eq!(sparks, 4);

        particles.clear();
        spawn_explosion(&mut particles, &mut rng, &tuning, Vec2::ZERO, 0xff0000, Blast::Large);
        assert_eq!(particles.len(), 40);
    }

    #[test]
    fn test_explosion_follows_particle_count() {
        let tuning = Tuning {
            particle_count: 5,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let mut particles = Vec::new();
        spawn_explosion(&mut particles, &mut rng, &tuning, Vec2::ZERO, 0, Blast::Normal);
        assert_eq!(particles.len(), 5 + 4);

        particles.clear();
        spawn_explosion(&mut particles, &mut rng, &tuning, Vec2::ZERO, 0, Blast::Large);
        let circles = particles.iter().filter(|p| p.kind == ParticleKind::Circle).count();
        assert_eq!(circles, 10);
        assert_eq!(particles.len(), 10 + 8);
    }

    #[test]
    fn test_burst_speed_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, &tuning, Vec2::ZERO, 0, 64, ParticleKind::Spark);
        for p in &particles {
            let speed = p.vel.length();
            assert!((50.0 - 1e-3..=150.0 + 1e-3).contains(&speed));
            assert!((p.max_life - 0.9).abs() < 1e-5);
        }
    }

    #[test]
    fn test_enforce_cap_drops_oldest() {
        let mut particles: Vec<Particle> = (0..10)
            .map(|i| Particle::new(Vec2::new(i as f32, 0.0), Vec2::ZERO, 1.0, 0, 1.0, ParticleKind::Circle))
            .collect();
        enforce_cap(&mut particles, 4);
        assert_eq!(particles.len(), 4);
        assert_eq!(particles[0].pos.x, 6.0);
    }
}
