//! Procedural stage generation
//!
//! Terrain is laid out left to right by a cursor walk: advance by a random
//! spacing, then place a gap or a weighted-choice obstacle. Everything draws
//! from the caller's RNG, so a given seed always produces the same stage.

use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Feature, FeatureKind, StageParams};
use crate::spans_overlap;

/// Pick an obstacle kind proportionally to its weight. Weights need not sum
/// to 1. Falls back to the first entry on float drift or a non-positive total.
pub fn choose_weighted<R: Rng>(rng: &mut R, weights: &[(FeatureKind, f32)]) -> FeatureKind {
    let total: f32 = weights.iter().map(|&(_, w)| w).sum();
    if total <= 0.0 {
        return weights[0].0;
    }
    let mut roll = rng.random_range(0.0..total);
    for &(kind, weight) in weights {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    weights[0].0
}

/// Generate the terrain for one stage.
///
/// The cursor starts at [`GEN_START_X`] and stops a `max_gap` short of the
/// stage end so the finish line stays clear. Gaps never come back to back,
/// and a floor-resting obstacle that would straddle an earlier gap is
/// discarded without advancing the cursor.
pub fn generate_stage<R: Rng>(
    params: &StageParams,
    stage_length: f32,
    rng: &mut R,
) -> Vec<Feature> {
    let mut features: Vec<Feature> = Vec::new();
    let mut cursor = GEN_START_X;

    while cursor < stage_length - params.max_gap {
        cursor += rng.random_range(params.min_gap..params.max_gap);

        let mut place_gap = rng.random::<f32>() < params.gap_probability;
        let mut kind = FeatureKind::Gap;
        if !place_gap {
            kind = choose_weighted(rng, &params.kind_weights);
        }

        // A gap right after a gap becomes an obstacle instead
        if place_gap && features.last().is_some_and(Feature::is_gap) {
            place_gap = false;
            kind = choose_weighted(rng, &params.kind_weights);
        }

        if place_gap {
            let gap_width = rng.random_range(params.min_gap_width..params.max_gap_width);
            features.push(Feature::gap(cursor, gap_width));
            cursor += gap_width;
            continue;
        }

        let feature = place_obstacle(kind, cursor, params, rng);

        // Floor-resting obstacles must not straddle a hole in the ground.
        // Elevated platforms may span one; the player can still fall through.
        if feature.rests_on_ground() && overlaps_any_gap(&features, &feature) {
            continue;
        }

        cursor += feature.width;
        features.push(feature);
    }

    log::debug!(
        "generated {} features over {stage_length} units ({} gaps)",
        features.len(),
        features.iter().filter(|f| f.is_gap()).count(),
    );
    features
}

fn place_obstacle<R: Rng>(
    kind: FeatureKind,
    world_x: f32,
    params: &StageParams,
    rng: &mut R,
) -> Feature {
    match kind {
        FeatureKind::Spikes => {
            // Spikes stay narrow and keep the stage's fixed height so their
            // silhouette reads consistently at speed
            let width = rng.random_range(params.min_width..params.max_width * 0.5);
            let height = params.spike_height;
            Feature {
                kind,
                world_x,
                width,
                height,
                initial_y: GROUND_Y - height,
                osc_range: 0.0,
                osc_speed: 0.0,
            }
        }
        FeatureKind::Block => {
            let width = rng.random_range(params.min_width..params.max_width);
            let height = rng.random_range(params.min_height..params.max_height);
            Feature {
                kind,
                world_x,
                width,
                height,
                initial_y: GROUND_Y - height,
                osc_range: 0.0,
                osc_speed: 0.0,
            }
        }
        FeatureKind::Platform | FeatureKind::OscillatingPlatform => {
            let width = rng.random_range(params.min_width..params.max_width);
            let height = rng.random_range(params.min_height..params.max_height);

            // Keep the platform within double-jump reach, but never sunk
            // below 150 units off the canvas bottom
            let highest_reachable = GROUND_Y - PLAYER_SIZE - (JUMP_FORCE * 25.0).abs()
                + rng.random::<f32>() * 50.0;
            let lowest = CANVAS_HEIGHT - height - 150.0;
            let mut initial_y = lowest
                .max(rng.random::<f32>() * (GROUND_Y - height - highest_reachable) + highest_reachable);

            let (mut osc_range, mut osc_speed) = (0.0, 0.0);
            if kind == FeatureKind::OscillatingPlatform {
                osc_range = params.osc_range * rng.random_range(0.8..1.2);
                osc_speed = params.osc_speed * rng.random_range(0.8..1.2);
                // Shift the rest position so the whole swing stays between
                // the ceiling margin and the floor
                let lowest_swing = initial_y + osc_range / 2.0;
                let highest_swing = initial_y - osc_range / 2.0;
                if lowest_swing > GROUND_Y - height {
                    initial_y -= lowest_swing - (GROUND_Y - height);
                }
                if highest_swing < CEILING_MARGIN {
                    initial_y += CEILING_MARGIN - highest_swing;
                }
            }

            Feature {
                kind,
                world_x,
                width,
                height,
                initial_y,
                osc_range,
                osc_speed,
            }
        }
        // Gaps are placed by Feature::gap, not here
        FeatureKind::Gap => Feature::gap(world_x, params.min_gap_width),
    }
}

fn overlaps_any_gap(features: &[Feature], candidate: &Feature) -> bool {
    features.iter().any(|f| {
        f.is_gap() && spans_overlap(candidate.world_x, candidate.right(), f.world_x, f.right())
    })
}
