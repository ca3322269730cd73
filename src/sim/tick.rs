//! Fixed-tick run loop: input, stage loading, and per-tick advancement

use crate::consts::*;
use crate::sim::collision::{self, Outcome};
use crate::sim::terrain::generate_stage;
use crate::sim::physics;
use crate::sim::state::{GameEvent, GamePhase, GameState, Player, stage_roster};
use crate::stage_color;

/// Player commands gathered for one tick. One-shot: the caller rebuilds it
/// every tick, so a held key does not auto-repeat jumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
}

/// Begin a fresh run on stage 1. Resets everything but the seed.
pub fn start_run(state: &mut GameState) {
    *state = GameState::new(state.seed);
    load_stage(state, 1);
    state.phase = GamePhase::Playing;
    log::info!("run started (seed {})", state.seed);
}

/// Install the given stage: fresh terrain from the stage's sub-seeded RNG,
/// player back at the spawn point, scroll and intro timer reset.
pub fn load_stage(state: &mut GameState, stage_index: u32) {
    let stage = stage_roster()[(stage_index - 1) as usize].clone();
    let mut rng = state.stage_rng(stage_index);
    state.features = generate_stage(&stage.params, stage.length, &mut rng);
    state.stage = stage;
    state.stage_index = stage_index;
    state.scroll = 0.0;
    state.player = Player::spawn();
    state.jumping = false;
    state.stage_text_ticks = STAGE_TEXT_TICKS;
    log::info!(
        "stage {stage_index} loaded: {} features, speed {}",
        state.features.len(),
        state.stage.speed
    );
}

/// Advance the simulation one tick.
///
/// Outside the `Playing` phase this is a no-op, which makes stopping and
/// dying naturally idempotent. Returns the events the presentation layer
/// should react to, in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    if state.stage_text_ticks > 0 {
        state.stage_text_ticks -= 1;
    }

    if input.jump && physics::jump(&mut state.player) {
        state.jumping = true;
        events.push(GameEvent::Jumped {
            x: state.player.center_x(),
            y: state.player.pos.y + state.player.size / 2.0,
        });
    }

    physics::update_player(&mut state.player);

    // Drop terrain a full screen behind the viewport
    let cutoff = state.scroll - CANVAS_WIDTH;
    state.features.retain(|f| f.right() >= cutoff);

    let time_secs = state.time_secs();
    let resolution = collision::resolve(
        &mut state.player,
        &state.features,
        state.scroll,
        time_secs,
    );
    if resolution.outcome == Outcome::Dead {
        state.phase = GamePhase::GameOver;
        state.stage_text_ticks = 0;
        events.push(GameEvent::Died {
            x: state.player.center_x(),
            y: state.player.pos.y + state.player.size / 2.0,
        });
        log::info!(
            "run over on stage {} with score {}",
            state.stage_index,
            state.score
        );
        return events;
    }
    if resolution.landed {
        state.jumping = false;
        events.push(GameEvent::Landed {
            x: state.player.center_x(),
            y: state.player.bottom(),
            color: stage_color(state.stage_index),
        });
    } else if state.player.velocity_y == 0.0 && state.player.bottom() >= GROUND_Y {
        state.jumping = false;
    }

    state.scroll += state.stage.speed;
    state.score += state.stage.speed.floor() as u64;

    if state.scroll >= state.stage.length {
        let next = state.stage_index + 1;
        events.push(GameEvent::StageCompleted {
            stage: state.stage_index,
            x: CANVAS_WIDTH / 2.0,
            y: CANVAS_HEIGHT / 2.0,
            color: stage_color(next),
        });
        if next <= STAGE_COUNT {
            load_stage(state, next);
        } else {
            state.phase = GamePhase::Won;
            state.stage_text_ticks = 0;
            events.push(GameEvent::RunWon { score: state.score });
            log::info!("run won with score {}", state.score);
        }
    }

    events
}
