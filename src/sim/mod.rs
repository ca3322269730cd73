//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{Outcome, Resolution, resolve};
pub use terrain::{choose_weighted, generate_stage};
pub use physics::{jump, update_player};
pub use state::{
    Feature, FeatureKind, GameEvent, GamePhase, GameState, Player, Stage, StageParams,
    stage_roster,
};
pub use tick::{TickInput, load_stage, start_run, tick};
