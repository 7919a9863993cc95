//! GeoShooter entry point
//!
//! The browser build is driven from JavaScript through `WebGame`. Natively
//! this runs a headless attract-mode session with the autopilot at the
//! controls and reports how it went.
//!
//! Usage: `geo-shooter [seconds] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use geo_shooter::audio::NullAudio;
    use geo_shooter::consts::SIM_DT;
    use geo_shooter::input::InputState;
    use geo_shooter::persistence::FileStore;
    use geo_shooter::{Game, Settings, Tuning, platform};

    platform::init_logging();
    log::info!("GeoShooter (native) starting headless demo...");

    let mut args = std::env::args().skip(1);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not use tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let store = FileStore::new(std::env::temp_dir().join("geo-shooter.json"));
    let settings = Settings::load(&store);
    let mut game = Game::new(
        platform::time_seed(),
        tuning,
        settings,
        Box::new(NullAudio),
        Box::new(store),
    );
    game.set_autopilot(true);

    let mut input = InputState::new();
    let frames = (seconds / SIM_DT) as u32;
    for _ in 0..frames {
        game.frame(SIM_DT, &mut input);
        if game.world().state.is_game_over() {
            break;
        }
    }

    let ui = game.ui_data();
    if ui.new_high_score {
        println!("NEW HIGH SCORE!");
    }
    println!(
        "score {} | lives {} | bombs {} | high score {} | difficulty x{:.1}",
        ui.score, ui.lives, ui.bombs, ui.high_score, ui.difficulty
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `WebGame`, this is just to satisfy the compiler
}
