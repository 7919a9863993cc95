//! Bomb shockwave effect

use super::arena::Arena;

/// Seconds the shockwave takes to reach full size
pub const BOMB_DURATION: f32 = 1.0;
/// Fraction of the larger arena dimension covered by the blast
pub const BOMB_REACH: f32 = 0.7;
const WAVE_COUNT: usize = 3;
const WAVE_STAGGER: f32 = 0.1;

/// One visual ring of the shockwave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombWave {
    pub delay: f32,
}

#[derive(Debug, Clone)]
pub struct BombEffect {
    pub radius: f32,
    pub max_radius: f32,
    pub duration: f32,
    pub age: f32,
    pub waves: [BombWave; WAVE_COUNT],
}

impl BombEffect {
    pub fn new(arena: &Arena) -> Self {
        Self {
            radius: 0.0,
            max_radius: arena.max_dimension() * BOMB_REACH,
            duration: BOMB_DURATION,
            age: 0.0,
            waves: std::array::from_fn(|i| BombWave {
                delay: i as f32 * WAVE_STAGGER,
            }),
        }
    }

    /// Grow the blast with square-root easing. Returns false once finished.
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        if self.age <= self.duration {
            let progress = self.age / self.duration;
            self.radius = self.max_radius * progress.sqrt();
        }
        self.age < self.duration
    }

    /// Progress (0..=1) and radius of each staggered ring that has started
    pub fn rings(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.waves.iter().filter_map(move |wave| {
            let wave_age = self.age - wave.delay;
            (wave_age > 0.0).then(|| {
                let progress = (wave_age / self.duration).min(1.0);
                (progress, self.max_radius * progress.sqrt())
            })
        })
    }

    /// Overlay alpha, fading out over the duration
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.duration).max(0.0)
    }
}
