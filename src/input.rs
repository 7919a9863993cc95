//! Keyboard and gamepad state
//!
//! The host records raw key/button state here; each frame it is resolved
//! into continuous `Controls` for the simulation and edge-triggered
//! `Commands` for the session.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::{AIM_DEAD_ZONE, MOVE_DEAD_ZONE};
use crate::sim::GamePhase;

/// Keys the game listens to, named after DOM `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    P,
    Escape,
    R,
}

impl Key {
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "KeyW" => Key::W,
            "KeyA" => Key::A,
            "KeyS" => Key::S,
            "KeyD" => Key::D,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Space" => Key::Space,
            "KeyP" => Key::P,
            "Escape" => Key::Escape,
            "KeyR" => Key::R,
            _ => return None,
        })
    }
}

/// Standard-mapping gamepad buttons we care about
pub mod button {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const SELECT: usize = 8;
    pub const START: usize = 9;
}

/// One frame of gamepad state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    fn stick(&self, x: usize, y: usize, dead_zone: f32) -> Vec2 {
        match (self.axes.get(x), self.axes.get(y)) {
            (Some(&ax), Some(&ay)) => {
                let v = Vec2::new(ax, ay);
                if v.length() > dead_zone { v } else { Vec2::ZERO }
            }
            _ => Vec2::ZERO,
        }
    }

    fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
}

/// Continuous per-frame steering. Directions are raw sums; the player
/// normalises them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Controls {
    pub move_dir: Vec2,
    pub aim_dir: Vec2,
}

impl Controls {
    /// WASD plus left stick to move, arrows plus right stick to aim
    pub fn from_input(input: &InputState) -> Self {
        let axis = |neg: Key, pos: Key| -> f32 {
            f32::from(u8::from(input.is_down(pos))) - f32::from(u8::from(input.is_down(neg)))
        };
        let mut move_dir = Vec2::new(axis(Key::A, Key::D), axis(Key::W, Key::S));
        let mut aim_dir = Vec2::new(
            axis(Key::ArrowLeft, Key::ArrowRight),
            axis(Key::ArrowUp, Key::ArrowDown),
        );
        if let Some(pad) = &input.gamepad {
            move_dir += pad.stick(0, 1, MOVE_DEAD_ZONE);
            aim_dir += pad.stick(2, 3, AIM_DEAD_ZONE);
        }
        Self { move_dir, aim_dir }
    }
}

/// One-shot session commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    TogglePause,
    Resume,
    Bomb,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    pub gamepad: Option<GamepadSnapshot>,
    prev_buttons: Vec<bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Convenience for DOM events; unknown codes are ignored
    pub fn key_down_code(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_down(key);
        }
    }

    pub fn key_up_code(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_up(key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn set_gamepad(&mut self, pad: Option<GamepadSnapshot>) {
        self.gamepad = pad;
    }

    /// Any of `indices` is down now while none of them was down last frame
    fn button_edge(&self, indices: &[usize]) -> bool {
        let Some(pad) = &self.gamepad else {
            return false;
        };
        let now = indices.iter().any(|&i| pad.pressed(i));
        let before = indices
            .iter()
            .any(|&i| self.prev_buttons.get(i).copied().unwrap_or(false));
        now && !before
    }

    /// Commands triggered this frame, filtered by what the phase allows
    pub fn commands(&self, phase: GamePhase) -> Vec<Command> {
        let mut out = Vec::new();
        match phase {
            GamePhase::GameOver => {
                if self.just_pressed(Key::R) || self.button_edge(&[button::START]) {
                    out.push(Command::Restart);
                }
            }
            GamePhase::Playing | GamePhase::Paused => {
                if self.just_pressed(Key::P) || self.button_edge(&[button::SELECT]) {
                    out.push(Command::TogglePause);
                } else if phase == GamePhase::Paused && self.just_pressed(Key::Escape) {
                    out.push(Command::Resume);
                }
                if phase == GamePhase::Playing
                    && (self.just_pressed(Key::Space) || self.button_edge(&[button::A, button::B]))
                {
                    out.push(Command::Bomb);
                }
            }
        }
        out
    }

    /// Forget one-shot presses and latch gamepad buttons for edge detection
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.prev_buttons = self
            .gamepad
            .as_ref()
            .map(|p| p.buttons.clone())
            .unwrap_or_default();
    }
}
