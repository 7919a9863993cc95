//! Browser bindings
//!
//! JavaScript owns the canvas, the animation frame loop and the Web Audio
//! graph. It feeds DOM key codes and gamepad snapshots into [`WebGame`],
//! calls `frame(dt)` once per animation frame and reads state back as JSON.

use js_sys::{Function, Reflect};
use log::warn;
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::audio::{AudioSink, Sound};
use crate::game::Game;
use crate::input::{GamepadSnapshot, InputState};
use crate::persistence::{KeyValueStore, StorageError};
use crate::settings::{QualityPreset, Settings};
use crate::tuning::Tuning;

/// Console logger plus readable panics in the devtools console
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // A second init just means a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(js_error)?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }
}

/// Forwards cues to a JS object exposing `playSound(name, volume)`,
/// `startBGM()`, `stopBGM()` and `setBGMVolume(volume)`. Missing methods
/// and thrown exceptions are ignored.
pub struct JsAudio {
    target: JsValue,
}

impl JsAudio {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn call(&self, method: &str, args: &[JsValue]) {
        if self.target.is_null() || self.target.is_undefined() {
            return;
        }
        let Ok(func) = Reflect::get(&self.target, &JsValue::from_str(method)) else {
            return;
        };
        let Some(func) = func.dyn_ref::<Function>() else {
            return;
        };
        let result = match args {
            [] => func.call0(&self.target),
            [a] => func.call1(&self.target, a),
            [a, b] => func.call2(&self.target, a, b),
            _ => return,
        };
        if let Err(e) = result {
            warn!("Audio call {method} failed: {e:?}");
        }
    }
}

impl AudioSink for JsAudio {
    fn play_sound(&mut self, sound: Sound, volume: f32) {
        self.call(
            "playSound",
            &[JsValue::from_str(sound.name()), JsValue::from_f64(f64::from(volume))],
        );
    }

    fn start_bgm(&mut self) {
        self.call("startBGM", &[]);
    }

    fn stop_bgm(&mut self) {
        self.call("stopBGM", &[]);
    }

    fn set_bgm_volume(&mut self, volume: f32) {
        self.call("setBGMVolume", &[JsValue::from_f64(f64::from(volume))]);
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    input: InputState,
}

impl WebGame {
    fn build(tuning: Tuning, audio: JsValue, width: f32, height: f32) -> WebGame {
        init_logging();
        let store = LocalStore;
        let settings = Settings::load(&store);
        let mut game = Game::new(
            time_seed(),
            tuning,
            settings,
            Box::new(JsAudio::new(audio)),
            Box::new(store),
        );
        game.resize(width, height);
        WebGame {
            game,
            input: InputState::new(),
        }
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(audio: JsValue, width: f32, height: f32) -> WebGame {
        Self::build(Tuning::default(), audio, width, height)
    }

    /// Start with balance overrides; rejected tuning is reported to JS
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(tuning_json: &str, audio: JsValue, width: f32, height: f32) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| {
            warn!("Rejected tuning: {e}");
            JsValue::from_str(&e.to_string())
        })?;
        Ok(Self::build(tuning, audio, width, height))
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, code: &str) {
        self.input.key_down_code(code);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, code: &str) {
        self.input.key_up_code(code);
    }

    /// Latest gamepad state; `buttons` holds 1 for pressed, 0 otherwise
    #[wasm_bindgen(js_name = setGamepad)]
    pub fn set_gamepad(&mut self, axes: Vec<f32>, buttons: Vec<u8>) {
        self.input.set_gamepad(Some(GamepadSnapshot {
            axes,
            buttons: buttons.into_iter().map(|b| b != 0).collect(),
        }));
    }

    #[wasm_bindgen(js_name = clearGamepad)]
    pub fn clear_gamepad(&mut self) {
        self.input.set_gamepad(None);
    }

    /// Advance by `dt` seconds of wall-clock time
    pub fn frame(&mut self, dt: f32) {
        self.game.frame(dt, &mut self.input);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    #[wasm_bindgen(js_name = setAutopilot)]
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.game.set_autopilot(enabled);
    }

    /// Switch the effects preset by name; unknown names are ignored
    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&mut self, name: &str) {
        match QualityPreset::parse(name) {
            Some(quality) => {
                let settings = Settings {
                    quality,
                    ..self.game.settings().clone()
                };
                self.game.update_settings(settings);
            }
            None => warn!("Unknown quality preset {name:?}"),
        }
    }

    /// Replace every preference at once from the options menu
    #[wasm_bindgen(js_name = setSettingsJson)]
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let mut settings: Settings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.sanitize();
        self.game.update_settings(settings);
        Ok(())
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> String {
        serde_json::to_string(self.game.settings()).unwrap_or_default()
    }

    /// HUD values as JSON
    #[wasm_bindgen(js_name = uiJson)]
    pub fn ui_json(&self) -> String {
        serde_json::to_string(&self.game.ui_data()).unwrap_or_default()
    }

    /// Everything the canvas renderer draws, as JSON
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> String {
        let world = self.game.world();
        let trails = self.game.settings().trails;
        let trail_of = |t: &crate::sim::Trail| -> Vec<[f32; 3]> {
            if trails {
                t.faded_points().map(|(p, a)| [p.x, p.y, a]).collect()
            } else {
                Vec::new()
            }
        };
        let player = &world.player;
        let scene = json!({
            "player": {
                "x": player.pos.x,
                "y": player.pos.y,
                "r": player.radius,
                "flashing": player.is_flashing(),
                "shield": player.shield_health,
                "thrustPhase": player.thrust_phase,
                "powerups": player.powerups,
                "trail": trail_of(&player.trail),
            },
            "enemies": world.enemies.iter().map(|e| json!({
                "kind": e.kind.as_str(),
                "x": e.pos.x,
                "y": e.pos.y,
                "r": e.radius,
                "color": e.color,
                "pulse": e.pulse_phase,
                "trail": trail_of(&e.trail),
            })).collect::<Vec<_>>(),
            "bullets": world.bullets.iter().map(|b| json!({
                "x": b.pos.x,
                "y": b.pos.y,
                "r": b.radius,
                "laser": b.is_piercing(),
                "trail": trail_of(&b.trail),
            })).collect::<Vec<_>>(),
            "powerups": world.powerups.iter().map(|p| json!({
                "kind": p.kind,
                "symbol": p.kind.symbol().to_string(),
                "x": p.pos.x,
                "y": p.pos.y,
                "r": p.radius,
                "color": p.kind.color(),
                "pulse": p.pulse_phase,
                "alpha": p.fade_alpha(),
            })).collect::<Vec<_>>(),
            "particles": world.particles.iter().map(|p| [p.pos.x, p.pos.y, p.size, p.alpha()]).collect::<Vec<_>>(),
            "particleColors": world.particles.iter().map(|p| p.color).collect::<Vec<_>>(),
            "bomb": world.state.bomb_effect.as_ref().map(|b| json!({
                "x": player.pos.x,
                "y": player.pos.y,
                "radius": b.radius,
                "alpha": b.alpha(),
                "rings": b.rings().map(|(progress, r)| [progress, r]).collect::<Vec<_>>(),
            })),
        });
        scene.to_string()
    }
}
