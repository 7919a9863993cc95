//! Bounded position history for fade-rendered trails

use std::collections::VecDeque;

use glam::Vec2;

/// Trail history, oldest point first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    max_len: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Trail {
    pub fn new(max_len: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    /// Record a position, dropping the oldest once full
    pub fn record(&mut self, pos: Vec2) {
        self.points.push_back(pos);
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Points paired with their fade alpha (0 for the oldest, 1 for the newest)
    pub fn faded_points(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let n = self.points.len().max(1) as f32;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (*p, i as f32 / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_drops_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.record(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_trail_clear() {
        let mut trail = Trail::new(4);
        trail.record(Vec2::ONE);
        trail.clear();
        assert!(trail.is_empty());
    }
}
