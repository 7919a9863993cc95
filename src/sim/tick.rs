//! Per-frame simulation step
//!
//! Advances every entity by `dt`, resolves collisions, then prunes and
//! spawns. The step is a no-op unless the game is playing.

use glam::Vec2;
use log::debug;
use rand::Rng;

use super::collision::{Resolution, resolve_enemies, resolve_powerups};
use super::particle::{self, Particle, ParticleKind};
use super::spawn::spawn_enemy;
use super::state::GameEvent;
use super::world::World;
use crate::input::Controls;

const MUZZLE_FLASH_COLOR: u32 = 0x8888ff;
const MUZZLE_FLASH_SPARKS: u32 = 4;
const THRUST_CHANCE: f32 = 0.3;
const THRUST_SPEED: f32 = 80.0;
const THRUST_SPREAD: f32 = 0.5;
const THRUST_LIFE: f32 = 0.3;
const THRUST_COLOR: u32 = 0x00aa00;

/// Advance the world by one frame
pub fn tick(world: &mut World, controls: &Controls, dt: f32) {
    if !world.state.is_playing() {
        return;
    }

    // Player
    let step = world.player.update(dt, controls, &world.arena, &world.tuning);
    if let Some(dir) = step.thrust_dir {
        emit_thrust(world, dir);
    }
    if let Some(volley) = step.volley {
        world.bullets.extend(volley.projectiles);
        world.burst(volley.origin, MUZZLE_FLASH_COLOR, MUZZLE_FLASH_SPARKS, ParticleKind::Spark);
        world.push_event(GameEvent::Shot { origin: volley.origin });
    }

    // Everything else moves
    for bullet in &mut world.bullets {
        bullet.update(dt);
    }
    let player_pos = world.player.pos;
    for enemy in &mut world.enemies {
        enemy.update(dt, player_pos, &world.arena, &mut world.rng);
    }
    for p in &mut world.particles {
        p.update(dt);
    }
    for powerup in &mut world.powerups {
        powerup.update(dt, &world.arena);
    }
    let blast_over = world
        .state
        .bomb_effect
        .as_mut()
        .is_some_and(|effect| !effect.update(dt));
    if blast_over {
        world.state.clear_bomb_effect();
    }

    // Collisions
    if resolve_enemies(world) == Resolution::GameOver {
        return;
    }
    resolve_powerups(world);

    world.state.update_combo_timer(dt);

    // Prune
    let arena = world.arena;
    world.bullets.retain(|b| !b.is_offscreen(&arena));
    world.particles.retain(|p| !p.is_dead());
    world.powerups.retain(|p| !p.is_expired());

    // Spawn
    if world.state.update_spawn_timer(dt) {
        let difficulty = world.state.difficulty_multiplier();
        let enemy = spawn_enemy(&mut world.rng, &world.arena, world.state.score, difficulty, &world.tuning);
        debug!("Spawned {} enemy at ({:.0}, {:.0})", enemy.kind.as_str(), enemy.pos.x, enemy.pos.y);
        world.enemies.push(enemy);
    }

    particle::enforce_cap(&mut world.particles, world.particle_cap);
}

/// Occasional exhaust puff behind a moving player
fn emit_thrust(world: &mut World, dir: Vec2) {
    if world.particle_cap == 0 || world.rng.random::<f32>() >= THRUST_CHANCE {
        return;
    }
    let back = -dir;
    let jitter = Vec2::new(
        (world.rng.random::<f32>() - 0.5) * THRUST_SPREAD,
        (world.rng.random::<f32>() - 0.5) * THRUST_SPREAD,
    );
    let pos = world.player.pos + back * (world.player.radius + 2.0);
    world.particles.push(Particle::new(
        pos,
        (back + jitter) * THRUST_SPEED,
        THRUST_LIFE,
        THRUST_COLOR,
        1.0,
        ParticleKind::Circle,
    ));
}
