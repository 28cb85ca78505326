//! Jump resolution
//!
//! Turns a charge level into a landing spot, then applies whatever the
//! ground does to the frog: snow is harmless, ice slides, lava burns.
//! Everything here is synchronous; timing belongs to the sequencer.

use rand::Rng;

use super::collectibles::{collect_along_slide, collect_at_landing};
use super::state::{JumpOutcome, Session, TerrainKind};
use super::terrain::{ice_slide_end, terrain_kind_at};
use crate::consts::*;
use crate::skins::Skin;
use crate::tuning::Tuning;
use crate::px_to_meters;

/// Standard normal sample via the Box-Muller transform
pub fn box_muller(rng: &mut impl Rng) -> f64 {
    // 1 - [0, 1) keeps u1 away from zero so ln stays finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Random distance multiplier: mean 1.0, clamped to [0.7, 1.3]
pub fn jump_multiplier(rng: &mut impl Rng, sd: f64) -> f64 {
    (1.0 + box_muller(rng) * sd).clamp(JUMP_MULTIPLIER_MIN, JUMP_MULTIPLIER_MAX)
}

/// Flight distance in meters before any slide
pub fn flight_meters(charge_power: u8, skin: &Skin, multiplier: f64, max_jump_meters: f32) -> f32 {
    let power = charge_power.min(MAX_CHARGE) as f32;
    let multiplier = multiplier.clamp(JUMP_MULTIPLIER_MIN, JUMP_MULTIPLIER_MAX) as f32;
    let base = (power / MAX_CHARGE as f32) * max_jump_meters;
    base * skin.jump_bonus * multiplier
}

/// Resolve a jump with a freshly drawn variance multiplier
pub fn resolve_jump(
    rng: &mut impl Rng,
    session: &mut Session,
    charge_power: u8,
    skin: &Skin,
    tuning: &Tuning,
) -> JumpOutcome {
    let multiplier = jump_multiplier(rng, tuning.jump_variance_sd);
    resolve_jump_with_multiplier(session, charge_power, skin, multiplier, tuning)
}

/// Resolve a jump with a known variance multiplier.
///
/// Marks any collectibles picked up as collected in `session`.
pub fn resolve_jump_with_multiplier(
    session: &mut Session,
    charge_power: u8,
    skin: &Skin,
    multiplier: f64,
    tuning: &Tuning,
) -> JumpOutcome {
    let flight = flight_meters(charge_power, skin, multiplier, tuning.max_jump_meters);
    let pixel_distance = flight * PX_PER_METER;
    let landing = FROG_START_PX + pixel_distance;
    let landing_terrain = terrain_kind_at(&session.terrains, landing);

    let mut final_position = landing;
    let mut hazard_hit = false;
    let mut did_slide = false;
    let mut collected = Vec::new();

    match landing_terrain {
        Some(TerrainKind::Ice) => {
            let slide_budget = pixel_distance * tuning.ice_slide_factor;
            did_slide = slide_budget > 0.0;
            final_position = ice_slide_end(&session.terrains, landing, slide_budget);
            hazard_hit = terrain_kind_at(&session.terrains, final_position) == Some(TerrainKind::Lava);
            collected.extend(collect_along_slide(
                &mut session.collectibles,
                landing,
                final_position,
            ));
        }
        Some(TerrainKind::Lava) => hazard_hit = true,
        Some(TerrainKind::Snow) | None => {}
    }

    if let Some(item) = collect_at_landing(&mut session.collectibles, landing, tuning.catch_radius_px) {
        collected.push(item);
    }

    let outcome = JumpOutcome {
        charge_power: charge_power.min(MAX_CHARGE),
        multiplier,
        landing_position: landing,
        final_position,
        flight_meters: flight,
        total_meters: px_to_meters(final_position),
        landing_terrain,
        hazard_hit,
        did_slide,
        collected,
    };

    log::info!(
        "Jump: power={} flight={:.2}m total={:.2}m terrain={:?} slide={} hazard={} items={}",
        outcome.charge_power,
        outcome.flight_meters,
        outcome.total_meters,
        outcome.landing_terrain,
        outcome.did_slide,
        outcome.hazard_hit,
        outcome.collected.len()
    );

    outcome
}
