//! Player progression
//!
//! Persisted profile, XP rewards, leveling and skin unlocks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collectibles::collectible_bonus;
use crate::sim::state::JumpOutcome;
use crate::skins::{self, Skin, SkinId};

/// XP required to advance from `level` to `level + 1`:
/// `floor(100 * 1.5^(level - 1))`
pub fn xp_needed(level: u32) -> u64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let needed = (XP_BASE * XP_GROWTH.powi(exponent)).floor();
    if needed >= u64::MAX as f64 {
        u64::MAX
    } else {
        needed as u64
    }
}

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProfile {
    pub level: u32,
    pub xp: u64,
    /// Longest clean jump, in meters
    pub best_jump: f32,
    pub current_skin: SkinId,
    pub unlocked_skins: BTreeSet<SkinId>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            best_jump: 0.0,
            current_skin: SkinId::Default,
            unlocked_skins: BTreeSet::from([SkinId::Default]),
        }
    }
}

impl PlayerProfile {
    /// Equipped skin's catalog entry
    pub fn skin(&self) -> &'static Skin {
        self.current_skin.skin()
    }

    pub fn xp_needed(&self) -> u64 {
        xp_needed(self.level)
    }

    pub fn is_unlocked(&self, id: SkinId) -> bool {
        self.unlocked_skins.contains(&id)
    }

    /// Repair a profile loaded from storage so the invariants hold again
    pub fn normalize(mut self) -> Self {
        self.level = self.level.max(1);
        if !self.best_jump.is_finite() || self.best_jump < 0.0 {
            self.best_jump = 0.0;
        }
        self.unlocked_skins.insert(SkinId::Default);
        if !self.unlocked_skins.contains(&self.current_skin) {
            self.current_skin = SkinId::Default;
        }
        let levels = self.level_up();
        if levels > 0 {
            log::warn!("Stored XP exceeded level threshold, applied {levels} level(s)");
        }
        self.unlock_skins();
        self
    }

    /// Spend XP on levels while there is enough; returns levels gained
    fn level_up(&mut self) -> u32 {
        let start = self.level;
        while self.xp >= xp_needed(self.level) {
            self.xp -= xp_needed(self.level);
            self.level += 1;
        }
        self.level - start
    }

    /// Unlock every skin the current level allows; returns the new ones
    fn unlock_skins(&mut self) -> Vec<&'static Skin> {
        let fresh: Vec<&'static Skin> = skins::unlocked_at(self.level)
            .filter(|s| !self.unlocked_skins.contains(&s.id))
            .collect();
        self.unlocked_skins.extend(fresh.iter().map(|s| s.id));
        fresh
    }
}

/// Equip an unlocked skin. Returns false (and changes nothing) when locked.
pub fn select_skin(profile: &mut PlayerProfile, id: SkinId) -> bool {
    if !profile.is_unlocked(id) {
        log::debug!("Skin {} is locked", id.as_str());
        return false;
    }
    profile.current_skin = id;
    log::info!("Equipped skin {}", id.as_str());
    true
}

/// Title of the result popup, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultHeadline {
    Burned,
    NewRecord,
    RareFind,
    MultiCatch,
    CollectibleBonus,
    IceSlide,
    GreatJump,
}

impl ResultHeadline {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultHeadline::Burned => "Burned!",
            ResultHeadline::NewRecord => "New Record!",
            ResultHeadline::RareFind => "RARE FIND!",
            ResultHeadline::MultiCatch => "Multi-Catch!",
            ResultHeadline::CollectibleBonus => "Collectible Bonus!",
            ResultHeadline::IceSlide => "Ice Slide!",
            ResultHeadline::GreatJump => "Great Jump!",
        }
    }
}

/// Bonus at or above which a catch counts as a rare find
pub const RARE_FIND_BONUS: u32 = 300;

/// XP breakdown and progression changes from one jump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSummary {
    /// Distance to the resting spot, including any slide
    pub distance_meters: f32,
    pub base_xp: u32,
    pub collectible_bonus: u32,
    pub hazard_penalty: u32,
    /// `max(0, base + bonus - penalty)`
    pub xp_gained: u32,
    pub level: u32,
    pub levels_gained: u32,
    pub new_unlocks: Vec<String>,
    pub is_new_best: bool,
    pub hazard_hit: bool,
    pub did_slide: bool,
    pub collected_count: usize,
    pub headline: ResultHeadline,
}

/// Apply a jump's rewards to the profile
pub fn apply_reward(outcome: &JumpOutcome, profile: &mut PlayerProfile) -> RewardSummary {
    let base_xp = (outcome.flight_meters * XP_PER_METER).floor().max(0.0) as u32;
    let bonus: u32 = outcome.collected.iter().map(collectible_bonus).sum();
    let penalty = if outcome.hazard_hit { LAVA_XP_PENALTY } else { 0 };
    let xp_gained = base_xp.saturating_add(bonus).saturating_sub(penalty);

    let is_new_best = !outcome.hazard_hit && outcome.total_meters > profile.best_jump;
    if is_new_best {
        profile.best_jump = outcome.total_meters;
    }

    profile.xp = profile.xp.saturating_add(xp_gained as u64);
    let levels_gained = profile.level_up();
    let new_unlocks: Vec<String> = profile
        .unlock_skins()
        .into_iter()
        .map(|s| s.name.to_string())
        .collect();

    let headline = if outcome.hazard_hit {
        ResultHeadline::Burned
    } else if is_new_best {
        ResultHeadline::NewRecord
    } else if bonus >= RARE_FIND_BONUS {
        ResultHeadline::RareFind
    } else if outcome.collected.len() > 1 {
        ResultHeadline::MultiCatch
    } else if bonus > 0 {
        ResultHeadline::CollectibleBonus
    } else if outcome.did_slide {
        ResultHeadline::IceSlide
    } else {
        ResultHeadline::GreatJump
    };

    if levels_gained > 0 {
        log::info!("Level up! Now level {}", profile.level);
    }
    for name in &new_unlocks {
        log::info!("Unlocked skin: {name}");
    }

    RewardSummary {
        distance_meters: outcome.total_meters,
        base_xp,
        collectible_bonus: bonus,
        hazard_penalty: penalty,
        xp_gained,
        level: profile.level,
        levels_gained,
        new_unlocks,
        is_new_best,
        hazard_hit: outcome.hazard_hit,
        did_slide: outcome.did_slide,
        collected_count: outcome.collected.len(),
        headline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, ColorTag, TerrainKind};
    use proptest::prelude::*;

    fn outcome(flight: f32, total: f32) -> JumpOutcome {
        JumpOutcome {
            charge_power: 100,
            multiplier: 1.0,
            landing_position: crate::meters_to_px(flight),
            final_position: crate::meters_to_px(total),
            flight_meters: flight,
            total_meters: total,
            landing_terrain: None,
            hazard_hit: false,
            did_slide: false,
            collected: Vec::new(),
        }
    }

    #[test]
    fn test_xp_needed_values() {
        assert_eq!(xp_needed(1), 100);
        assert_eq!(xp_needed(2), 150);
        assert_eq!(xp_needed(3), 225);
        assert_eq!(xp_needed(4), 337);
        assert_eq!(xp_needed(0), 100);
    }

    #[test]
    fn test_full_jump_gives_75_xp() {
        let mut profile = PlayerProfile::default();
        let summary = apply_reward(&outcome(15.0, 15.0), &mut profile);
        assert_eq!(summary.base_xp, 75);
        assert_eq!(summary.xp_gained, 75);
        assert_eq!(profile.xp, 75);
        assert_eq!(profile.best_jump, 15.0);
        assert!(summary.is_new_best);
        assert_eq!(summary.headline, ResultHeadline::NewRecord);
    }

    #[test]
    fn test_lava_penalty_and_best_unchanged() {
        let mut profile = PlayerProfile {
            best_jump: 3.0,
            ..Default::default()
        };
        let mut o = outcome(12.0, 12.0);
        o.hazard_hit = true;
        o.landing_terrain = Some(TerrainKind::Lava);
        let summary = apply_reward(&o, &mut profile);
        assert_eq!(summary.base_xp, 60);
        assert_eq!(summary.hazard_penalty, 100);
        assert_eq!(summary.xp_gained, 0);
        assert_eq!(profile.best_jump, 3.0);
        assert!(!summary.is_new_best);
        assert_eq!(summary.headline, ResultHeadline::Burned);
    }

    #[test]
    fn test_penalty_offsets_bonus() {
        let mut profile = PlayerProfile::default();
        let mut o = outcome(10.0, 10.0);
        o.hazard_hit = true;
        let mut c = Collectible::new(1, 350.0, ColorTag::Red);
        c.collected = true;
        o.collected.push(c);
        let summary = apply_reward(&o, &mut profile);
        // 50 + 50 - 100
        assert_eq!(summary.xp_gained, 0);

        o.flight_meters = 14.0;
        let summary = apply_reward(&o, &mut profile);
        assert_eq!(summary.xp_gained, 20);
    }

    #[test]
    fn test_level_up_carries_remainder() {
        let mut profile = PlayerProfile {
            xp: 95,
            best_jump: 100.0,
            ..Default::default()
        };
        // 2m jump -> 10 XP
        let summary = apply_reward(&outcome(2.0, 2.0), &mut profile);
        assert_eq!(summary.xp_gained, 10);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 5);
        assert_eq!(summary.levels_gained, 1);
        assert_eq!(summary.headline, ResultHeadline::GreatJump);
    }

    #[test]
    fn test_multi_level_and_unlocks() {
        let mut profile = PlayerProfile::default();
        let mut o = outcome(1.0, 1.0);
        let mut rare = Collectible::new(1, 1550.0, ColorTag::Black);
        rare.collected = true;
        o.collected.push(rare);
        // (30 + 100) * 10 = 1300 bonus + 5 base
        let summary = apply_reward(&o, &mut profile);
        assert_eq!(summary.collectible_bonus, 1300);
        assert_eq!(summary.xp_gained, 1305);
        // 100 + 150 + 225 + 337 = 812; 1305 - 812 = 493 < 506
        assert_eq!(profile.level, 5);
        assert_eq!(profile.xp, 493);
        assert_eq!(summary.levels_gained, 4);
        assert_eq!(summary.new_unlocks, vec!["Golden Frog", "Royal Frog"]);
        assert!(profile.is_unlocked(SkinId::Royal));
        assert!(!profile.is_unlocked(SkinId::Cosmic));
    }

    #[test]
    fn test_headline_priorities() {
        let mut profile = PlayerProfile {
            best_jump: 100.0,
            ..Default::default()
        };
        let mut o = outcome(5.0, 5.0);
        o.did_slide = true;
        assert_eq!(apply_reward(&o, &mut profile).headline, ResultHeadline::IceSlide);

        let mut c = Collectible::new(1, 200.0, ColorTag::Red);
        c.collected = true;
        o.collected.push(c.clone());
        assert_eq!(
            apply_reward(&o, &mut profile).headline,
            ResultHeadline::CollectibleBonus
        );

        o.collected.push(c);
        assert_eq!(apply_reward(&o, &mut profile).headline, ResultHeadline::MultiCatch);
    }

    #[test]
    fn test_select_skin_requires_unlock() {
        let mut profile = PlayerProfile::default();
        assert!(!select_skin(&mut profile, SkinId::Golden));
        assert_eq!(profile.current_skin, SkinId::Default);
        profile.unlocked_skins.insert(SkinId::Golden);
        assert!(select_skin(&mut profile, SkinId::Golden));
        assert_eq!(profile.skin().jump_bonus, 1.3);
    }

    #[test]
    fn test_profile_json_shape() {
        let json = serde_json::to_value(PlayerProfile::default()).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["bestJump"], 0.0);
        assert_eq!(json["currentSkin"], "default");
        assert_eq!(json["unlockedSkins"], serde_json::json!(["default"]));
    }

    #[test]
    fn test_normalize_repairs_invariants() {
        let raw = r#"{"level":0,"xp":400,"currentSkin":"cosmic","unlockedSkins":[],"isJumping":true,"power":55}"#;
        let profile: PlayerProfile = serde_json::from_str(raw).unwrap();
        let profile = profile.normalize();
        // 400 XP at level 1: 100 + 150 -> level 3 with 150
        assert_eq!(profile.level, 3);
        assert_eq!(profile.xp, 150);
        assert_eq!(profile.current_skin, SkinId::Default);
        assert!(profile.is_unlocked(SkinId::Default));
        assert!(profile.is_unlocked(SkinId::Golden));
    }

    proptest! {
        #[test]
        fn prop_xp_needed_strictly_increasing(level in 1u32..60) {
            prop_assert!(xp_needed(level + 1) > xp_needed(level));
        }

        #[test]
        fn prop_xp_below_threshold_after_reward(
            level in 1u32..15,
            start_frac in 0.0f64..1.0,
            flight in 0.0f32..40.0,
            hazard in any::<bool>(),
            rare_count in 0usize..3,
        ) {
            let xp = (xp_needed(level) as f64 * start_frac) as u64;
            let mut profile = PlayerProfile { level, xp, ..Default::default() };
            let mut o = outcome(flight, flight);
            o.hazard_hit = hazard;
            for i in 0..rare_count {
                let mut c = Collectible::new(i as u32, 1700.0, ColorTag::Black);
                c.collected = true;
                o.collected.push(c);
            }
            let before_level = profile.level;
            apply_reward(&o, &mut profile);
            prop_assert!(profile.xp < xp_needed(profile.level));
            prop_assert!(profile.level >= before_level);
        }
    }
}
