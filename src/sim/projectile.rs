//! Player projectiles
//!
//! A single [`Projectile`] type covers both the plain bullet and the
//! piercing laser; only the laser variant carries a hit counter.

use glam::Vec2;

use super::arena::Arena;
use super::trail::Trail;
use crate::tuning::Tuning;

/// Enemy hits a laser survives before it is used up
pub const LASER_MAX_HITS: u32 = 3;
/// Laser speed relative to a normal bullet
pub const LASER_SPEED_FACTOR: f32 = 1.5;
const LASER_RADIUS_FACTOR: f32 = 1.2;

const BULLET_TRAIL_LENGTH: usize = 15;
const LASER_TRAIL_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Destroyed by the first enemy it touches
    Bullet,
    /// Passes through enemies until `hits` reaches [`LASER_MAX_HITS`]
    Laser { hits: u32 },
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: ProjectileKind,
    pub trail: Trail,
}

impl Projectile {
    pub fn bullet(pos: Vec2, vel: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel,
            radius: tuning.bullet_radius,
            kind: ProjectileKind::Bullet,
            trail: Trail::new(BULLET_TRAIL_LENGTH),
        }
    }

    pub fn laser(pos: Vec2, vel: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel,
            radius: tuning.bullet_radius * LASER_RADIUS_FACTOR,
            kind: ProjectileKind::Laser { hits: 0 },
            trail: Trail::new(LASER_TRAIL_LENGTH),
        }
    }

    pub fn is_piercing(&self) -> bool {
        matches!(self.kind, ProjectileKind::Laser { .. })
    }

    /// Straight-line integration
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.trail.record(self.pos);
    }

    /// Register an enemy hit. Returns true when the projectile is used up.
    pub fn register_hit(&mut self) -> bool {
        match &mut self.kind {
            ProjectileKind::Bullet => true,
            ProjectileKind::Laser { hits } => {
                *hits += 1;
                *hits >= LASER_MAX_HITS
            }
        }
    }

    pub fn is_offscreen(&self, arena: &Arena) -> bool {
        arena.is_offscreen(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_moves_in_straight_line() {
        let tuning = Tuning::default();
        let mut b = Projectile::bullet(Vec2::new(10.0, 10.0), Vec2::new(100.0, -50.0), &tuning);
        b.update(0.1);
        assert!((b.pos - Vec2::new(20.0, 5.0)).length() < 1e-4);
        assert_eq!(b.trail.len(), 1);
        assert!(!b.is_piercing());
    }

    #[test]
    fn test_bullet_consumed_on_first_hit() {
        let tuning = Tuning::default();
        let mut b = Projectile::bullet(Vec2::ZERO, Vec2::X, &tuning);
        assert!(b.register_hit());
    }

    #[test]
    fn test_laser_survives_two_hits() {
        let tuning = Tuning::default();
        let mut laser = Projectile::laser(Vec2::ZERO, Vec2::X, &tuning);
        assert!(laser.is_piercing());
        assert!((laser.radius - 4.8).abs() < 1e-5);
        assert!(!laser.register_hit());
        assert!(!laser.register_hit());
        assert!(laser.register_hit());
        assert_eq!(laser.kind, ProjectileKind::Laser { hits: 3 });
    }

    #[test]
    fn test_offscreen() {
        let tuning = Tuning::default();
        let arena = Arena::new(800.0, 600.0);
        let mut b = Projectile::bullet(Vec2::new(805.0, 300.0), Vec2::new(100.0, 0.0), &tuning);
        assert!(!b.is_offscreen(&arena));
        b.update(0.1);
        assert!(b.is_offscreen(&arena));
    }
}
