//! Demo/attract-mode pilot
//!
//! Produces the same `Controls` a human would, so the simulation cannot
//! tell the difference.

use glam::Vec2;

use super::world::World;
use crate::input::Controls;

/// Enemies closer than this make the pilot back off
pub const DANGER_RADIUS: f32 = 120.0;
/// Beyond this distance from the centre the pilot drifts back inward
const HOME_RADIUS: f32 = 150.0;

pub fn autopilot(world: &World) -> Controls {
    let me = world.player.pos;

    let aim_dir = world
        .enemies
        .iter()
        .min_by(|a, b| a.pos.distance_squared(me).total_cmp(&b.pos.distance_squared(me)))
        .map(|e| e.pos - me)
        .unwrap_or(Vec2::ZERO);

    // Repulsion from nearby enemies, stronger the closer they are
    let flee: Vec2 = world
        .enemies
        .iter()
        .filter_map(|e| {
            let away = me - e.pos;
            let dist = away.length();
            (dist < DANGER_RADIUS).then(|| away.normalize_or_zero() * (1.0 - dist / DANGER_RADIUS))
        })
        .sum();

    let move_dir = if flee != Vec2::ZERO {
        flee
    } else if let Some(p) = world
        .powerups
        .iter()
        .min_by(|a, b| a.pos.distance_squared(me).total_cmp(&b.pos.distance_squared(me)))
    {
        p.pos - me
    } else {
        let home = world.arena.center() - me;
        if home.length() > HOME_RADIUS { home } else { Vec2::ZERO }
    };

    Controls { move_dir, aim_dir }
}
