//! Run state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start_run`
    Ready,
    /// Active run
    Playing,
    /// Run ended by death or an external stop
    GameOver,
    /// All four stages cleared
    Won,
}

/// Kinds of terrain the generator can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Solid obstacle resting on the floor
    Block,
    /// Elevated platform the player can land on
    Platform,
    /// Platform riding a vertical sine wave
    OscillatingPlatform,
    /// Lethal on any contact
    Spikes,
    /// Hole in the ground strip
    Gap,
}

/// A placed terrain element in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,
    /// Left edge, world coordinates
    pub world_x: f32,
    pub width: f32,
    pub height: f32,
    /// Top edge at rest; gaps carry the ground line as a sentinel
    pub initial_y: f32,
    /// Oscillation peak-to-peak range (oscillating platforms only)
    pub osc_range: f32,
    /// Oscillation angular speed in rad/s (oscillating platforms only)
    pub osc_speed: f32,
}

impl Feature {
    /// A terrain gap; `initial_y` holds the ground line as a sentinel
    pub fn gap(world_x: f32, width: f32) -> Self {
        Self {
            kind: FeatureKind::Gap,
            world_x,
            width,
            height: GROUND_THICKNESS,
            initial_y: GROUND_Y,
            osc_range: 0.0,
            osc_speed: 0.0,
        }
    }

    #[inline]
    pub fn is_gap(&self) -> bool {
        self.kind == FeatureKind::Gap
    }

    /// Right edge, world coordinates
    #[inline]
    pub fn right(&self) -> f32 {
        self.world_x + self.width
    }

    /// Left edge in screen space for the given scroll offset
    #[inline]
    pub fn screen_x(&self, scroll: f32) -> f32 {
        self.world_x - scroll
    }

    /// Top edge this tick. Oscillating platforms ride a sine on the
    /// elapsed simulation time; everything else sits at its rest height.
    pub fn top_y(&self, time_secs: f32) -> f32 {
        match self.kind {
            FeatureKind::OscillatingPlatform => {
                self.initial_y + (time_secs * self.osc_speed).sin() * self.osc_range / 2.0
            }
            _ => self.initial_y,
        }
    }

    /// Does the feature sit on the ground strip?
    pub fn rests_on_ground(&self) -> bool {
        self.initial_y + self.height >= GROUND_Y
    }
}

/// Generation parameters for one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageParams {
    /// Min horizontal space between consecutive features
    pub min_gap: f32,
    /// Max horizontal space between consecutive features
    pub max_gap: f32,
    /// Relative placement weights per obstacle kind (need not sum to 1)
    pub kind_weights: Vec<(FeatureKind, f32)>,
    pub min_height: f32,
    pub max_height: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Spikes use a fixed height per stage
    pub spike_height: f32,
    /// Baseline oscillation range; each platform randomizes ±20%
    pub osc_range: f32,
    /// Baseline oscillation speed; each platform randomizes ±20%
    pub osc_speed: f32,
    /// Chance to propose a terrain gap instead of an obstacle
    pub gap_probability: f32,
    pub min_gap_width: f32,
    /// Largest gap width (must stay jumpable)
    pub max_gap_width: f32,
}

/// A fixed-length segment of the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// World distance that triggers completion
    pub length: f32,
    /// Scroll advance per tick
    pub speed: f32,
    pub params: StageParams,
}

/// The four stage definitions, in play order
pub fn stage_roster() -> [Stage; STAGE_COUNT as usize] {
    use FeatureKind::*;
    [
        Stage {
            length: 3000.0,
            speed: BASE_SPEED,
            params: StageParams {
                min_gap: 150.0,
                max_gap: 350.0,
                kind_weights: vec![
                    (Block, 0.3),
                    (Platform, 0.4),
                    (Spikes, 0.2),
                    (OscillatingPlatform, 0.1),
                ],
                min_height: 30.0,
                max_height: 150.0,
                min_width: 30.0,
                max_width: 120.0,
                spike_height: 50.0,
                osc_range: 80.0,
                osc_speed: 1.2,
                gap_probability: 0.1,
                min_gap_width: 80.0,
                max_gap_width: 150.0,
            },
        },
        Stage {
            length: 4000.0,
            speed: 6.0,
            params: StageParams {
                min_gap: 120.0,
                max_gap: 300.0,
                kind_weights: vec![
                    (Block, 0.25),
                    (Platform, 0.35),
                    (Spikes, 0.25),
                    (OscillatingPlatform, 0.15),
                ],
                min_height: 30.0,
                max_height: 180.0,
                min_width: 30.0,
                max_width: 150.0,
                spike_height: 60.0,
                osc_range: 100.0,
                osc_speed: 1.5,
                gap_probability: 0.12,
                min_gap_width: 90.0,
                max_gap_width: 160.0,
            },
        },
        Stage {
            length: 5000.0,
            speed: 7.0,
            params: StageParams {
                min_gap: 100.0,
                max_gap: 280.0,
                kind_weights: vec![
                    (Block, 0.2),
                    (Platform, 0.3),
                    (Spikes, 0.3),
                    (OscillatingPlatform, 0.2),
                ],
                min_height: 40.0,
                max_height: 200.0,
                min_width: 30.0,
                max_width: 180.0,
                spike_height: 70.0,
                osc_range: 120.0,
                osc_speed: 1.8,
                gap_probability: 0.15,
                min_gap_width: 100.0,
                max_gap_width: 180.0,
            },
        },
        Stage {
            length: 6000.0,
            speed: 8.0,
            params: StageParams {
                min_gap: 80.0,
                max_gap: 250.0,
                kind_weights: vec![
                    (Block, 0.15),
                    (Platform, 0.25),
                    (Spikes, 0.35),
                    (OscillatingPlatform, 0.25),
                ],
                min_height: 40.0,
                max_height: 220.0,
                min_width: 30.0,
                max_width: 200.0,
                spike_height: 80.0,
                osc_range: 150.0,
                osc_speed: 2.0,
                gap_probability: 0.18,
                min_gap_width: 110.0,
                max_gap_width: 200.0,
            },
        },
    ]
}

/// The player square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in screen space
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    pub velocity_y: f32,
    /// Visual tilt in radians, derived from velocity each tick
    pub rotation: f32,
    /// Remaining jump budget (0-2)
    pub jumps_left: u8,
}

impl Player {
    /// A fresh player at the stage start position, resting on the floor
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_SIZE),
            size: PLAYER_SIZE,
            velocity_y: 0.0,
            rotation: 0.0,
            jumps_left: 2,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }
}

/// Events emitted during a tick.
/// The presentation layer consumes these for particle effects and UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jumped { x: f32, y: f32 },
    Landed { x: f32, y: f32, color: &'static str },
    StageCompleted { stage: u32, x: f32, y: f32, color: &'static str },
    Died { x: f32, y: f32 },
    RunWon { score: u64 },
}

/// Complete run state. Owns the active player and the current stage's
/// terrain; prior stages' terrain is discarded wholesale on transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed; stage terrain derives sub-seeds from it
    pub seed: u64,
    pub phase: GamePhase,
    /// 1-based stage index (1..=4)
    pub stage_index: u32,
    /// World distance scrolled into the current stage
    pub scroll: f32,
    /// Monotonic, accrued from scroll speed
    pub score: u64,
    /// Player is airborne from a jump (cosmetic, exposed to the view)
    pub jumping: bool,
    /// Ticks remaining on the stage intro text
    pub stage_text_ticks: u32,
    /// Simulation tick counter; drives oscillation phase
    pub time_ticks: u64,
    pub player: Player,
    pub stage: Stage,
    pub features: Vec<Feature>,
}

impl GameState {
    /// Create a fresh state for the given seed, waiting on `start_run`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Ready,
            stage_index: 1,
            scroll: 0.0,
            score: 0,
            jumping: false,
            stage_text_ticks: 0,
            time_ticks: 0,
            player: Player::spawn(),
            stage: stage_roster()[0].clone(),
            features: Vec::new(),
        }
    }

    /// Halt the run. Idempotent: stopping a run that is not playing
    /// changes nothing.
    pub fn stop(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            self.stage_text_ticks = 0;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Elapsed simulation time in seconds
    #[inline]
    pub fn time_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Terrain RNG for a stage. The same run seed always yields the same
    /// terrain for a given stage index.
    pub(crate) fn stage_rng(&self, stage_index: u32) -> Pcg32 {
        Pcg32::seed_from_u64(
            (stage_index as u64)
                .wrapping_mul(2654435761)
                .wrapping_add(self.seed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_roster_shape() {
        let stages = stage_roster();
        assert_eq!(stages.len(), 4);
        // Lengths and speeds rise with the stage index
        for pair in stages.windows(2) {
            assert!(pair[1].length > pair[0].length);
            assert!(pair[1].speed > pair[0].speed);
        }
        // Every stage rolls over all four obstacle kinds
        for stage in &stages {
            assert_eq!(stage.params.kind_weights.len(), 4);
            assert!(
                stage
                    .params
                    .kind_weights
                    .iter()
                    .all(|&(kind, w)| kind != FeatureKind::Gap && w > 0.0)
            );
        }
    }

    #[test]
    fn test_gap_sentinel_rests_on_ground() {
        let gap = Feature::gap(1000.0, 120.0);
        assert!(gap.is_gap());
        assert_eq!(gap.initial_y, GROUND_Y);
        assert!(gap.rests_on_ground());
    }

    #[test]
    fn test_oscillating_top_moves_with_time() {
        let feature = Feature {
            kind: FeatureKind::OscillatingPlatform,
            world_x: 0.0,
            width: 80.0,
            height: 30.0,
            initial_y: 300.0,
            osc_range: 100.0,
            osc_speed: 1.0,
        };
        assert_eq!(feature.top_y(0.0), 300.0);
        // sin(pi/2) = 1 -> half the range below rest
        let quarter = std::f32::consts::FRAC_PI_2;
        assert!((feature.top_y(quarter) - 350.0).abs() < 0.001);
        // Static features ignore time entirely
        let block = Feature {
            kind: FeatureKind::Block,
            ..feature
        };
        assert_eq!(block.top_y(quarter), 300.0);
    }

    #[test]
    fn test_stage_rng_is_stable() {
        use rand::RngCore;
        let state = GameState::new(42);
        let mut a = state.stage_rng(2);
        let mut b = state.stage_rng(2);
        assert_eq!(a.next_u64(), b.next_u64());
        // Different stage index diverges
        let mut c = state.stage_rng(3);
        assert_ne!(a.next_u64(), c.next_u64());
    }

    #[test]
    fn test_spawn_rests_on_floor() {
        let player = Player::spawn();
        assert_eq!(player.bottom(), GROUND_Y);
        assert_eq!(player.jumps_left, 2);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let mut state = GameState::new(7);
        state.stop();
        assert_eq!(state.phase, GamePhase::Ready);
    }
}
