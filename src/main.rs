//! Headless demo run
//!
//! Drives the simulation with a simple look-ahead autopilot until the run
//! ends, logging effects as they happen. Useful as a smoke run and as a
//! reference for wiring a real host around the sim.

use std::time::{SystemTime, UNIX_EPOCH};

use neon_dash::sim::{FeatureKind, GamePhase, GameState, TickInput, start_run, tick};
use neon_dash::view::{EffectsEmitter, emit_events};

struct LogEmitter;

impl EffectsEmitter for LogEmitter {
    fn on_jump(&mut self, x: f32, y: f32) {
        log::debug!("jump at ({x:.0}, {y:.0})");
    }
    fn on_land(&mut self, x: f32, y: f32, color: &'static str) {
        log::debug!("land at ({x:.0}, {y:.0}) [{color}]");
    }
    fn on_stage_complete(&mut self, x: f32, y: f32, color: &'static str) {
        log::info!("stage complete burst at ({x:.0}, {y:.0}) [{color}]");
    }
    fn on_death(&mut self, x: f32, y: f32) {
        log::info!("death at ({x:.0}, {y:.0})");
    }
}

/// Jump when a hazard sits within a speed-scaled window ahead of the player.
fn should_jump(state: &GameState) -> bool {
    if state.player.velocity_y != 0.0 {
        return false; // commit to the current arc
    }
    let lookahead = state.stage.speed * 20.0;
    let front = state.player.right();
    state.features.iter().any(|f| {
        let screen_x = f.screen_x(state.scroll);
        if screen_x < front || screen_x > front + lookahead {
            return false;
        }
        match f.kind {
            FeatureKind::Spikes | FeatureKind::Gap => true,
            FeatureKind::Block => state.player.bottom() > f.initial_y,
            _ => false,
        }
    })
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    start_run(&mut state);

    let mut emitter = LogEmitter;
    let mut ticks = 0u64;
    while state.phase == GamePhase::Playing && ticks < 200_000 {
        let input = TickInput {
            jump: should_jump(&state),
        };
        let events = tick(&mut state, &input);
        emit_events(&events, &mut emitter);
        ticks += 1;
    }

    match state.phase {
        GamePhase::Won => println!("run won! score {}", state.score),
        _ => println!(
            "run over on stage {} after {ticks} ticks, score {}",
            state.stage_index, state.score
        ),
    }
}
