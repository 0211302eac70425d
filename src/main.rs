/// Entry point and tick driver.

mod config;
mod domain;
mod logging;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use config::GameConfig;
use sim::level::embedded_level;
use sim::step;
use sim::world::GameState;
use ui::gamepad::GamepadState;
use ui::input::{InputState, KEYS_PAUSE, KEYS_QUIT, KEYS_RESTART};
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

fn main() {
    let (config, config_err) = match GameConfig::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (GameConfig::default(), Some(e)),
    };
    logging::init(&config.log_level);
    if let Some(e) = config_err {
        log::warn!("{e}; using default configuration");
    }

    let mut state = match GameState::new(embedded_level()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Level load failed: {e}");
            std::process::exit(1);
        }
    };

    let mut renderer = Renderer::new(config.display.cell_width);

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut state, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
        std::process::exit(1);
    }
}

fn game_loop(
    state: &mut GameState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new(&config.gamepad);
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);

    loop {
        let frame_start = Instant::now();

        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(state, &kb, &gp)? {
            break;
        }

        for &input in kb.commands().iter().chain(gp.moves()) {
            state.push_input(input);
        }

        let events = step::step(state);
        if let Some(sfx) = sound {
            sfx.play_events(&events);
        }

        step::draw(state, renderer);
        renderer.present(state)?;

        std::thread::sleep(tick_rate.saturating_sub(frame_start.elapsed()));
    }

    Ok(())
}

/// Pause, restart and quit. Returns true when the player asked to quit.
fn handle_meta(
    state: &mut GameState,
    kb: &InputState,
    gp: &GamepadState,
) -> Result<bool, sim::level::LevelError> {
    if kb.any_pressed(KEYS_QUIT) || gp.quit_pressed() {
        return Ok(true);
    }

    if kb.any_pressed(KEYS_PAUSE) || gp.pause_pressed() {
        state.toggle_pause();
        return Ok(false);
    }

    if kb.any_pressed(KEYS_RESTART) || gp.restart_pressed() {
        if state.paused {
            state.toggle_pause();
        }
        state.restart()?;
        state.set_message("Level Restarted", 30);
    }

    Ok(false)
}
