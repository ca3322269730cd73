//! Neon Dash - a side-scrolling auto-runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stage generation, physics, collisions)
//! - `view`: Plain-data interfaces for renderers and effect emitters

pub mod sim;
pub mod view;

/// Game configuration constants
pub mod consts {
    /// Logical canvas width; all sim coordinates live in this space
    pub const CANVAS_WIDTH: f32 = 800.0;
    /// Logical canvas height
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Side length of the player square
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Vertical impulse applied on jump (negative = up)
    pub const JUMP_FORCE: f32 = -10.0;
    /// Fall speed cap (prevents tunneling through thin platforms in one tick)
    pub const MAX_FALL_SPEED: f32 = 15.0;
    /// Scroll speed of stage 1; later stages run faster
    pub const BASE_SPEED: f32 = 5.0;

    /// Height of the ground strip at the bottom of the canvas
    pub const GROUND_THICKNESS: f32 = 10.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_THICKNESS;

    /// Vertical window for classifying a platform contact as a landing
    pub const LANDING_TOLERANCE: f32 = 15.0;
    /// Vertical overlap both edges must exceed before a side hit kills
    pub const SIDE_IMPACT_MARGIN: f32 = 10.0;

    /// On-screen x the player eases toward while the world scrolls past
    pub const PLAYER_ANCHOR_X: f32 = CANVAS_WIDTH / 3.0;
    /// Fraction of the anchor gap closed per tick
    pub const ANCHOR_EASING: f32 = 0.1;
    /// Player spawn x
    pub const PLAYER_START_X: f32 = 100.0;

    /// World x where stage generation places its first feature
    pub const GEN_START_X: f32 = 500.0;
    /// Oscillating platforms never rise above this line
    pub const CEILING_MARGIN: f32 = 50.0;

    /// Nominal tick rate (frame-driven, not wall-clock scaled)
    pub const TICK_HZ: u32 = 60;
    /// Seconds of simulation time per tick
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Stage intro text stays up this many ticks (1.5 s)
    pub const STAGE_TEXT_TICKS: u32 = 90;

    /// Number of stages in a full run
    pub const STAGE_COUNT: u32 = 4;

    /// Theme color per stage, for renderers and effect emitters
    pub const STAGE_COLORS: [&str; STAGE_COUNT as usize] =
        ["#00ffaa", "#00ff88", "#00b37d", "#00ff55"];
    /// Spikes and death effects
    pub const SPIKES_COLOR: &str = "#ff5555";
}

/// Do two horizontal spans overlap?
#[inline]
pub fn spans_overlap(a_start: f32, a_end: f32, b_start: f32, b_end: f32) -> bool {
    a_start < b_end && a_end > b_start
}

/// Theme color for a 1-based stage index (wraps past the last stage)
pub fn stage_color(stage_index: u32) -> &'static str {
    let idx = stage_index.saturating_sub(1) as usize % consts::STAGE_COLORS.len();
    consts::STAGE_COLORS[idx]
}
