//! Data-driven game balance
//!
//! Every tunable gameplay constant lives in [`Tuning`]. Values are checked
//! once at load time so the simulation never sees a negative radius or an
//! out-of-range probability.

use serde::{Deserialize, Serialize};

/// Errors produced while loading a tuning table
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed
    Json(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "tuning JSON error: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value for `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_radius: f32,
    /// Seconds between volleys
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,

    // === Enemies ===
    pub enemy_base_radius: f32,
    pub enemy_base_speed: f32,
    pub enemy_spawn_base_interval: f32,
    pub enemy_spawn_min_interval: f32,
    /// Interval shrink factor applied on every spawn
    pub enemy_spawn_interval_decay: f32,

    // === Scoring ===
    pub base_enemy_score: u32,
    /// Points needed for each difficulty step
    pub score_multiplier_decay: u32,

    // === Particles ===
    pub particle_count: u32,
    pub particle_lifetime: f32,
    pub particle_min_speed: f32,
    pub particle_max_speed: f32,

    // === Session ===
    pub starting_lives: u32,
    /// Seconds of invulnerability after losing a life
    pub invulnerability_time: f32,

    // === Powerups ===
    pub powerup_drop_chance: f32,
    /// Seconds a collected powerup stays active
    pub powerup_duration: f32,
    pub powerup_speed: f32,

    // === Bombs ===
    pub starting_bombs: u32,
    pub max_bombs: u32,
    /// Chance that a successful drop roll becomes a bomb instead of a powerup
    pub bomb_drop_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 250.0,
            player_radius: 10.0,
            fire_rate: 0.15,
            bullet_speed: 450.0,
            bullet_radius: 4.0,

            enemy_base_radius: 12.0,
            enemy_base_speed: 100.0,
            enemy_spawn_base_interval: 2.0,
            enemy_spawn_min_interval: 0.3,
            enemy_spawn_interval_decay: 0.95,

            base_enemy_score: 10,
            score_multiplier_decay: 500,

            particle_count: 16,
            particle_lifetime: 0.6,
            particle_min_speed: 50.0,
            particle_max_speed: 150.0,

            starting_lives: 3,
            invulnerability_time: 1.5,

            powerup_drop_chance: 0.15,
            powerup_duration: 15.0,
            powerup_speed: 60.0,

            starting_bombs: 3,
            max_bombs: 5,
            bomb_drop_chance: 0.2,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a finite value greater than zero",
        })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a probability in [0, 1]",
        })
    }
}

impl Tuning {
    /// Parse a tuning table from JSON (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would corrupt simulation state
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("playerSpeed", self.player_speed)?;
        positive("playerRadius", self.player_radius)?;
        positive("fireRate", self.fire_rate)?;
        positive("bulletSpeed", self.bullet_speed)?;
        positive("bulletRadius", self.bullet_radius)?;
        positive("enemyBaseRadius", self.enemy_base_radius)?;
        positive("enemyBaseSpeed", self.enemy_base_speed)?;
        positive("enemySpawnBaseInterval", self.enemy_spawn_base_interval)?;
        positive("enemySpawnMinInterval", self.enemy_spawn_min_interval)?;
        positive("particleLifetime", self.particle_lifetime)?;
        positive("particleMaxSpeed", self.particle_max_speed)?;
        positive("invulnerabilityTime", self.invulnerability_time)?;
        positive("powerupDuration", self.powerup_duration)?;
        probability("powerupDropChance", self.powerup_drop_chance)?;
        probability("bombDropChance", self.bomb_drop_chance)?;

        if !(self.enemy_spawn_interval_decay > 0.0 && self.enemy_spawn_interval_decay <= 1.0) {
            return Err(TuningError::Invalid {
                field: "enemySpawnIntervalDecay",
                reason: "must be in (0, 1]",
            });
        }
        if self.enemy_spawn_min_interval > self.enemy_spawn_base_interval {
            return Err(TuningError::Invalid {
                field: "enemySpawnMinInterval",
                reason: "must not exceed enemySpawnBaseInterval",
            });
        }
        if !(0.0..=self.particle_max_speed).contains(&self.particle_min_speed) {
            return Err(TuningError::Invalid {
                field: "particleMinSpeed",
                reason: "must be in [0, particleMaxSpeed]",
            });
        }
        if !(0.0..).contains(&self.powerup_speed) {
            return Err(TuningError::Invalid {
                field: "powerupSpeed",
                reason: "must not be negative",
            });
        }
        if self.score_multiplier_decay == 0 {
            return Err(TuningError::Invalid {
                field: "scoreMultiplierDecay",
                reason: "must be greater than zero",
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "startingLives",
                reason: "must be greater than zero",
            });
        }
        if self.starting_bombs > self.max_bombs {
            return Err(TuningError::Invalid {
                field: "startingBombs",
                reason: "must not exceed maxBombs",
            });
        }
        Ok(())
    }
}
