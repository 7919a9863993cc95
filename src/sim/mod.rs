//! Frame-step simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One `World` context per session, no globals
//! - Seeded RNG only, so a given seed and input sequence replays exactly
//! - Side effects leave as `GameEvent`s for the host to act on

pub mod arena;
pub mod autopilot;
pub mod bomb;
pub mod collision;
pub mod enemy;
pub mod particle;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trail;
pub mod world;

pub use arena::Arena;
pub use autopilot::autopilot;
pub use bomb::BombEffect;
pub use collision::circles_overlap;
pub use enemy::{Enemy, EnemyKind};
pub use particle::{Blast, Particle, ParticleKind};
pub use player::{HitOutcome, Player, PowerupTimers};
pub use powerup::{Powerup, PowerupKind};
pub use projectile::{Projectile, ProjectileKind};
pub use state::{GameEvent, GamePhase, GameState, UiData};
pub use tick::tick;
pub use trail::Trail;
pub use world::World;
