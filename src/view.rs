//! Presentation-layer interfaces
//!
//! The sim never draws. Each tick the host takes a [`FrameSnapshot`] for its
//! renderer and forwards the tick's events to an [`EffectsEmitter`]. Both
//! directions are plain data; nothing here feeds back into the simulation.

use crate::consts::*;
use crate::sim::{Feature, GameEvent, GamePhase, GameState, Player};
use crate::stage_color;

/// A terrain feature currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleFeature<'a> {
    pub feature: &'a Feature,
    /// Left edge in screen space
    pub screen_x: f32,
    /// Top edge this tick (oscillation already applied)
    pub top_y: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot<'a> {
    pub player: &'a Player,
    pub features: Vec<VisibleFeature<'a>>,
    pub stage_index: u32,
    /// Theme color of the current stage
    pub stage_color: &'static str,
    pub score: u64,
    pub phase: GamePhase,
    /// Nonzero while the stage intro text should show
    pub stage_text_ticks: u32,
}

/// Build the frame snapshot, filtering terrain down to what is on screen.
pub fn snapshot(state: &GameState) -> FrameSnapshot<'_> {
    let time_secs = state.time_secs();
    let features = state
        .features
        .iter()
        .filter_map(|f| {
            let screen_x = f.screen_x(state.scroll);
            if screen_x + f.width >= 0.0 && screen_x <= CANVAS_WIDTH {
                Some(VisibleFeature {
                    feature: f,
                    screen_x,
                    top_y: f.top_y(time_secs),
                })
            } else {
                None
            }
        })
        .collect();
    FrameSnapshot {
        player: &state.player,
        features,
        stage_index: state.stage_index,
        stage_color: stage_color(state.stage_index),
        score: state.score,
        phase: state.phase,
        stage_text_ticks: state.stage_text_ticks,
    }
}

/// Draws frames. Implemented by the host (canvas, terminal, tests).
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>);
}

/// Receives gameplay moments for particle bursts and similar flourishes.
pub trait EffectsEmitter {
    fn on_jump(&mut self, x: f32, y: f32);
    fn on_land(&mut self, x: f32, y: f32, color: &'static str);
    fn on_stage_complete(&mut self, x: f32, y: f32, color: &'static str);
    fn on_death(&mut self, x: f32, y: f32);
}

/// Forward a tick's events to an effects emitter.
pub fn emit_events(events: &[GameEvent], emitter: &mut dyn EffectsEmitter) {
    for event in events {
        match event {
            GameEvent::Jumped { x, y } => emitter.on_jump(*x, *y),
            GameEvent::Landed { x, y, color } => emitter.on_land(*x, *y, *color),
            GameEvent::StageCompleted { x, y, color, .. } => {
                emitter.on_stage_complete(*x, *y, *color);
            }
            GameEvent::Died { x, y } => emitter.on_death(*x, *y),
            // Win is a UI state change, not a particle burst
            GameEvent::RunWon { .. } => {}
        }
    }
}
