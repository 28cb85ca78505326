//! Collectible placement, bonus and pickup checks

use rand::Rng;

use super::state::{Collectible, ColorTag, TerrainKind, TerrainSegment};
use super::terrain::terrain_kind_at;
use crate::consts::*;
use crate::px_to_meters;

/// Draw a color: `rare_chance` for the black rare edition, otherwise one of
/// the six common colors with equal odds
pub fn roll_color(rng: &mut impl Rng, rare_chance: f64) -> ColorTag {
    if rng.random_bool(rare_chance) {
        return ColorTag::Black;
    }
    ColorTag::COMMON[rng.random_range(0..ColorTag::COMMON.len())]
}

/// Sample a position in the placement range, steering clear of lava.
///
/// Gives up after [`COLLECTIBLE_MAX_RETRIES`] resamples and keeps the last
/// position even if it is still on lava.
pub fn place_collectible(rng: &mut impl Rng, terrains: &[TerrainSegment]) -> f32 {
    let mut position = rng.random_range(COLLECTIBLE_MIN_PX..COLLECTIBLE_MAX_PX);
    let mut attempts = 0;
    while attempts < COLLECTIBLE_MAX_RETRIES {
        if terrain_kind_at(terrains, position) != Some(TerrainKind::Lava) {
            break;
        }
        position = rng.random_range(COLLECTIBLE_MIN_PX..COLLECTIBLE_MAX_PX);
        attempts += 1;
    }
    if terrain_kind_at(terrains, position) == Some(TerrainKind::Lava) {
        log::debug!("Collectible placed on lava at {position:.0}px after {attempts} retries");
    }
    position
}

/// Spawn `count` collectibles (clamped to 1..=3), ids starting at `first_id`
pub fn spawn_collectibles(
    rng: &mut impl Rng,
    terrains: &[TerrainSegment],
    count: usize,
    rare_chance: f64,
    first_id: u32,
) -> Vec<Collectible> {
    let count = count.clamp(1, 3);
    (0..count)
        .map(|i| {
            let position = place_collectible(rng, terrains);
            let color = roll_color(rng, rare_chance);
            Collectible::new(first_id + i as u32, position, color)
        })
        .collect()
}

/// Spawn a session's worth (1-3) of collectibles
pub fn spawn_session_collectibles(
    rng: &mut impl Rng,
    terrains: &[TerrainSegment],
    rare_chance: f64,
    first_id: u32,
) -> Vec<Collectible> {
    let count = rng.random_range(1..=3);
    spawn_collectibles(rng, terrains, count, rare_chance, first_id)
}

/// XP bonus for picking up a collectible: farther ones are worth more,
/// rare ones ten times as much
pub fn collectible_bonus(collectible: &Collectible) -> u32 {
    let meters = px_to_meters(collectible.position);
    let distance_bonus = (meters * COLLECTIBLE_DISTANCE_MULTIPLIER).floor().max(0.0) as u32;
    let bonus = COLLECTIBLE_BASE_BONUS + distance_bonus;
    if collectible.is_rare {
        bonus * RARE_MULTIPLIER
    } else {
        bonus
    }
}

/// Collect the first uncollected item (spawn order) within `radius` of
/// `landing`. At most one item is picked up.
pub fn collect_at_landing(
    collectibles: &mut [Collectible],
    landing: f32,
    radius: f32,
) -> Option<Collectible> {
    let item = collectibles
        .iter_mut()
        .find(|c| !c.collected && (landing - c.position).abs() <= radius)?;
    item.collected = true;
    Some(item.clone())
}

/// Collect every uncollected item inside the closed range `[from, to]`
pub fn collect_along_slide(collectibles: &mut [Collectible], from: f32, to: f32) -> Vec<Collectible> {
    collectibles
        .iter_mut()
        .filter(|c| !c.collected && c.position >= from && c.position <= to)
        .map(|c| {
            c.collected = true;
            c.clone()
        })
        .collect()
}

/// The collected item worth the most XP (first one wins ties)
pub fn most_valuable(collected: &[Collectible]) -> Option<&Collectible> {
    collected.iter().fold(None, |best: Option<&Collectible>, c| match best {
        Some(b) if collectible_bonus(c) <= collectible_bonus(b) => Some(b),
        _ => Some(c),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn item(id: u32, position: f32) -> Collectible {
        Collectible::new(id, position, ColorTag::Pink)
    }

    #[test]
    fn test_spawn_count_and_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let items = spawn_session_collectibles(&mut rng, &[], RARE_CHANCE, 10);
            assert!((1..=3).contains(&items.len()));
            for (i, c) in items.iter().enumerate() {
                assert!(c.position >= COLLECTIBLE_MIN_PX && c.position < COLLECTIBLE_MAX_PX);
                assert!(!c.collected);
                assert_eq!(c.id, 10 + i as u32);
                assert_eq!(c.is_rare, c.color == ColorTag::Black);
            }
        }
        assert_eq!(spawn_collectibles(&mut rng, &[], 0, RARE_CHANCE, 1).len(), 1);
        assert_eq!(spawn_collectibles(&mut rng, &[], 9, RARE_CHANCE, 1).len(), 3);
    }

    #[test]
    fn test_placement_avoids_lava() {
        // Lava over half the placement range: with 10 retries a lava
        // placement needs 11 straight lava samples
        let lava = vec![TerrainSegment::new(1, TerrainKind::Lava, 150.0, 825.0)];
        let mut rng = Pcg32::seed_from_u64(5);
        let on_lava = (0..2000)
            .filter(|_| terrain_kind_at(&lava, place_collectible(&mut rng, &lava)) == Some(TerrainKind::Lava))
            .count();
        assert!(on_lava <= 5, "{on_lava} placements on lava");
    }

    #[test]
    fn test_placement_gives_up_on_all_lava() {
        let lava = vec![TerrainSegment::new(1, TerrainKind::Lava, 0.0, 5000.0)];
        let mut rng = Pcg32::seed_from_u64(5);
        let position = place_collectible(&mut rng, &lava);
        assert!(position >= COLLECTIBLE_MIN_PX && position < COLLECTIBLE_MAX_PX);
        assert_eq!(terrain_kind_at(&lava, position), Some(TerrainKind::Lava));
    }

    #[test]
    fn test_rare_rate_converges() {
        let mut rng = Pcg32::seed_from_u64(36);
        let n = 200_000;
        let rare = (0..n)
            .filter(|_| roll_color(&mut rng, RARE_CHANCE) == ColorTag::Black)
            .count();
        let rate = rare as f64 / n as f64;
        assert!((rate - 1.0 / 36.0).abs() < 0.002, "rare rate {rate}");
    }

    #[test]
    fn test_common_colors_uniform() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut counts = [0u32; 6];
        for _ in 0..60_000 {
            let color = roll_color(&mut rng, 0.0);
            let idx = ColorTag::COMMON.iter().position(|c| *c == color).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!((9_000..11_000).contains(&count), "{counts:?}");
        }
    }

    #[test]
    fn test_collectible_bonus() {
        // 350px is 10m: 30 + 20
        let mut c = item(1, 350.0);
        assert_eq!(collectible_bonus(&c), 50);
        c.is_rare = true;
        assert_eq!(collectible_bonus(&c), 500);
        // Floors the distance part: 5.5m -> 11
        assert_eq!(collectible_bonus(&item(2, 215.0)), 41);
    }

    #[test]
    fn test_landing_collects_first_in_spawn_order() {
        let mut items = vec![item(1, 540.0), item(2, 505.0), item(3, 460.0)];
        let got = collect_at_landing(&mut items, 500.0, 50.0).unwrap();
        // Not the nearest (id 2), but the first encountered
        assert_eq!(got.id, 1);
        assert!(items[0].collected);
        assert!(!items[1].collected && !items[2].collected);

        let got = collect_at_landing(&mut items, 500.0, 50.0).unwrap();
        assert_eq!(got.id, 2);
    }

    #[test]
    fn test_landing_radius_inclusive() {
        let mut items = vec![item(1, 550.0)];
        assert!(collect_at_landing(&mut items, 500.0, 49.0).is_none());
        assert!(collect_at_landing(&mut items, 500.0, 50.0).is_some());
        assert!(collect_at_landing(&mut items, 500.0, 50.0).is_none());
    }

    #[test]
    fn test_slide_collects_range() {
        let mut items = vec![item(1, 300.0), item(2, 400.0), item(3, 401.0), item(4, 250.0)];
        let got = collect_along_slide(&mut items, 300.0, 400.0);
        let ids: Vec<_> = got.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!items[2].collected && !items[3].collected);
    }

    #[test]
    fn test_most_valuable_prefers_first_on_tie() {
        let mut rare = item(3, 200.0);
        rare.is_rare = true;
        let items = vec![item(1, 300.0), item(2, 300.0), rare];
        assert_eq!(most_valuable(&items).unwrap().id, 3);
        assert_eq!(most_valuable(&items[..2]).unwrap().id, 1);
        assert!(most_valuable(&[]).is_none());
    }
}
