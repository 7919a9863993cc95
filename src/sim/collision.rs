//! Circle overlap tests and per-frame collision resolution
//!
//! Every body in the arena is a circle, so a hit is simply
//! `distance < r1 + r2`. Resolution walks enemies from the back of the
//! list so removals never disturb indices still to be visited.

use glam::Vec2;
use log::debug;

use super::particle::Blast;
use super::player::HitOutcome;
use super::state::GameEvent;
use super::world::World;

const SHIELD_FLASH_COLOR: u32 = 0x00ffff;
const PLAYER_HIT_COLOR: u32 = 0xff0000;

#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// What a collision pass decided for the rest of the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Continue,
    /// The last life was lost; stop simulating this frame
    GameOver,
}

/// Bullets against enemies, then the player against surviving enemies.
///
/// An enemy is destroyed by at most one bullet per frame. Only an enemy
/// that no bullet reached can touch the player.
pub fn resolve_enemies(world: &mut World) -> Resolution {
    let mut spawned = Vec::new();
    let mut i = world.enemies.len();
    while i > 0 {
        i -= 1;
        let (pos, radius) = (world.enemies[i].pos, world.enemies[i].radius);

        if let Some(j) = world
            .bullets
            .iter()
            .rposition(|b| circles_overlap(pos, radius, b.pos, b.radius))
        {
            let mut enemy = world.enemies.remove(i);
            if world.bullets[j].register_hit() {
                world.bullets.remove(j);
            }
            let points = world.state.add_score(enemy.score_value);
            world.explode(enemy.pos, enemy.color, Blast::Normal);
            world.push_event(GameEvent::EnemyDestroyed {
                kind: enemy.kind,
                pos: enemy.pos,
                points,
            });
            spawned.extend(enemy.on_destroy(&world.tuning));
            world.roll_drop(enemy.pos);
            continue;
        }

        if !circles_overlap(world.player.pos, world.player.radius, pos, radius) {
            continue;
        }
        match world.player.hit() {
            HitOutcome::Ignored => {}
            HitOutcome::Absorbed => {
                world.explode(world.player.pos, SHIELD_FLASH_COLOR, Blast::Normal);
                world.push_event(GameEvent::ShieldAbsorbed);
            }
            HitOutcome::LifeLost => {
                world.enemies.remove(i);
                let game_over = world.state.take_damage();
                world.explode(world.player.pos, PLAYER_HIT_COLOR, Blast::Large);
                world.push_event(GameEvent::PlayerHit {
                    lives_left: world.state.lives,
                });
                if game_over {
                    world.enemies.extend(spawned);
                    world.push_event(GameEvent::GameOver {
                        score: world.state.score,
                    });
                    return Resolution::GameOver;
                }
            }
        }
    }
    world.enemies.extend(spawned);
    Resolution::Continue
}

/// Collect every powerup the player touches
pub fn resolve_powerups(world: &mut World) {
    let mut i = world.powerups.len();
    while i > 0 {
        i -= 1;
        let p = &world.powerups[i];
        if !circles_overlap(world.player.pos, world.player.radius, p.pos, p.radius) {
            continue;
        }
        let powerup = world.powerups.remove(i);
        world.player.add_powerup(powerup.kind);
        world.explode(powerup.pos, powerup.kind.color(), Blast::Normal);
        debug!("Collected {:?} powerup", powerup.kind);
        world.push_event(GameEvent::PowerupCollected { kind: powerup.kind });
    }
}
