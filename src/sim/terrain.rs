//! Procedural terrain strip
//!
//! The strip is split into equal zones, one segment per zone. A segment
//! starts within the first 30% of its zone so plain ground usually shows
//! between patches. Widths are not clamped to the zone, so a wide patch can
//! spill into the next one; lookups therefore scan the sorted list and take
//! the first match rather than assuming containment.

use rand::Rng;

use super::state::{TerrainKind, TerrainSegment};
use crate::consts::*;

/// Weighted terrain draw: lava 12%, ice 55%, snow 33%
pub fn roll_terrain_kind(rng: &mut impl Rng) -> TerrainKind {
    let roll: f32 = rng.random();
    if roll < LAVA_WEIGHT {
        TerrainKind::Lava
    } else if roll < LAVA_WEIGHT + ICE_WEIGHT {
        TerrainKind::Ice
    } else {
        TerrainKind::Snow
    }
}

/// Generate 3-5 terrain segments over `[track_start, track_start + track_length)`.
///
/// Segments come back sorted by `start`; ids are assigned in that order
/// starting at `first_id`.
pub fn generate_terrain(
    rng: &mut impl Rng,
    track_start: f32,
    track_length: f32,
    first_id: u32,
) -> Vec<TerrainSegment> {
    let count = rng.random_range(TERRAIN_MIN_SEGMENTS..=TERRAIN_MAX_SEGMENTS);
    let zone_size = track_length / count as f32;

    let mut segments: Vec<TerrainSegment> = (0..count)
        .map(|i| {
            let zone_start = track_start + i as f32 * zone_size;
            let start = zone_start + rng.random::<f32>() * (zone_size * TERRAIN_START_SPREAD);
            let width = (TERRAIN_MIN_WIDTH + rng.random_range(0..TERRAIN_WIDTH_RANGE)) as f32;
            let kind = roll_terrain_kind(rng);
            TerrainSegment::new(0, kind, start, width)
        })
        .collect();

    segments.sort_by(|a, b| a.start.total_cmp(&b.start));
    for (i, segment) in segments.iter_mut().enumerate() {
        segment.id = first_id + i as u32;
    }

    log::debug!(
        "Generated {} terrain segments: {:?}",
        segments.len(),
        segments
            .iter()
            .map(|s| (s.kind, s.start.round() as i32, s.end.round() as i32))
            .collect::<Vec<_>>()
    );

    segments
}

/// First segment (in sorted order) whose closed range contains `position`.
///
/// `None` means plain ground.
pub fn terrain_at(terrains: &[TerrainSegment], position: f32) -> Option<&TerrainSegment> {
    terrains.iter().find(|t| t.contains(position))
}

/// Kind of terrain under `position`, if any
pub fn terrain_kind_at(terrains: &[TerrainSegment], position: f32) -> Option<TerrainKind> {
    terrain_at(terrains, position).map(|t| t.kind)
}

/// Walk forward pixel by pixel from `start` while the ground stays icy.
///
/// Stops on the first step that reaches non-ice ground, or when the slide
/// budget runs out. Returns the final position.
pub fn ice_slide_end(terrains: &[TerrainSegment], start: f32, slide_distance: f32) -> f32 {
    let mut position = start;
    let mut remaining = slide_distance;

    while remaining > 0.0 {
        position += 1.0;
        remaining -= 1.0;

        if terrain_kind_at(terrains, position) != Some(TerrainKind::Ice) {
            break;
        }
    }

    position
}
