//! Edge spawner
//!
//! New enemies enter from a random arena edge, heading inward. The mix of
//! kinds widens as the score climbs.

use glam::Vec2;
use rand::Rng;

use super::arena::Arena;
use super::enemy::{Enemy, EnemyKind};
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Choose a kind from the score bracket and a uniform roll in `[0, 1)`
pub fn pick_kind(score: u64, roll: f32) -> EnemyKind {
    if score > 500 {
        match roll {
            r if r < 0.15 => EnemyKind::Splitter,
            r if r < 0.35 => EnemyKind::Homing,
            r if r < 0.55 => EnemyKind::Fast,
            _ => EnemyKind::Basic,
        }
    } else if score > 200 {
        match roll {
            r if r < 0.2 => EnemyKind::Homing,
            r if r < 0.4 => EnemyKind::Fast,
            _ => EnemyKind::Basic,
        }
    } else if score > 100 && roll < 0.3 {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Position on `edge` and an inward velocity.
///
/// The tangential component is uniform in `±base/2` and the inward
/// component in `[base/2, base]`.
pub fn edge_entry<R: Rng>(rng: &mut R, arena: &Arena, edge: Edge, base_speed: f32) -> (Vec2, Vec2) {
    let along = rng.random::<f32>();
    let tangential = (rng.random::<f32>() - 0.5) * base_speed;
    let inward = base_speed * 0.5 + rng.random::<f32>() * base_speed * 0.5;
    match edge {
        Edge::Top => (Vec2::new(along * arena.width, 0.0), Vec2::new(tangential, inward)),
        Edge::Right => (
            Vec2::new(arena.width, along * arena.height),
            Vec2::new(-inward, tangential),
        ),
        Edge::Bottom => (
            Vec2::new(along * arena.width, arena.height),
            Vec2::new(tangential, -inward),
        ),
        Edge::Left => (Vec2::new(0.0, along * arena.height), Vec2::new(inward, tangential)),
    }
}

/// Build one new enemy at a random edge
pub fn spawn_enemy<R: Rng>(rng: &mut R, arena: &Arena, score: u64, difficulty: f32, tuning: &Tuning) -> Enemy {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let base_speed = tuning.enemy_base_speed * difficulty;
    let kind = pick_kind(score, rng.random::<f32>());
    let (pos, vel) = edge_entry(rng, arena, edge, base_speed);
    let pulse_phase = rng.random::<f32>() * std::f32::consts::TAU;
    Enemy::new(kind, pos, vel, pulse_phase, tuning)
}
