//! GeoShooter - A twin-stick neon arena shooter
//!
//! Core modules:
//! - `sim`: Frame-step simulation (entities, collisions, scoring, FSM)
//! - `game`: Host session driver (commands, frame clock, audio, high score)
//! - `input`: Keyboard/gamepad snapshot and dead-zone resolution
//! - `audio`: Sound cue sink interface
//! - `persistence`: Key/value storage for high score and settings
//! - `platform`: Browser/native logging, seeding and storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// 2D vector used for every position and velocity in the simulation.
///
/// `normalize_or_zero` is the only normalisation used by the core, so a
/// zero vector normalises to exactly `(0, 0)`.
pub type Vector2 = glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz) when the accumulator is enabled
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Bullets further than this outside the arena are pruned
    pub const OFFSCREEN_MARGIN: f32 = 10.0;

    /// Default arena size before the host reports real bounds
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Combo chain window (seconds of silence that break a combo)
    pub const COMBO_WINDOW: f32 = 3.0;
    /// Kills per multiplier step
    pub const COMBO_STEP: u32 = 5;
    /// Multiplier gained per step
    pub const COMBO_STEP_BONUS: f32 = 0.5;

    /// Difficulty gained per `score_multiplier_decay` points
    pub const DIFFICULTY_STEP: f32 = 0.1;

    /// Shield absorbs this many hits when collected
    pub const SHIELD_HITS: u32 = 3;

    /// Gamepad stick dead-zones
    pub const MOVE_DEAD_ZONE: f32 = 0.2;
    pub const AIM_DEAD_ZONE: f32 = 0.25;
}

/// Convert an angle to a unit direction
#[inline]
pub fn direction_from_angle(theta: f32) -> Vector2 {
    Vector2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        let v = Vector2::ZERO.normalize_or_zero();
        assert_eq!(v, Vector2::ZERO);
    }

    #[test]
    fn test_vector_ops_return_new_values() {
        let a = Vector2::new(3.0, 4.0);
        let b = a + Vector2::new(1.0, 1.0);
        let c = a * 2.0;
        assert_eq!(a, Vector2::new(3.0, 4.0));
        assert_eq!(b, Vector2::new(4.0, 5.0));
        assert_eq!(c, Vector2::new(6.0, 8.0));
        assert_eq!((b - a), Vector2::new(1.0, 1.0));
        assert!((a.length() - 5.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_unit_length(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            prop_assume!(x.abs() > 1e-3 || y.abs() > 1e-3);
            let n = Vector2::new(x, y).normalize_or_zero();
            prop_assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}
