//! Froggy Jump - A charge-and-leap frog game
//!
//! Core modules:
//! - `sim`: Session simulation (terrain, collectibles, jumps, energy, sequencing)
//! - `progression`: Player profile, XP rewards, leveling and skin unlocks
//! - `skins`: Static skin catalog
//! - `tuning`: Data-driven game balance
//! - `persistence`: Profile save/load
//! - `platform`: Browser bindings (wasm32 only)

pub mod persistence;
pub mod platform;
pub mod progression;
pub mod sim;
pub mod skins;
pub mod tuning;

pub use progression::{PlayerProfile, RewardSummary, ResultHeadline};
pub use skins::{Skin, SkinId};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: u32 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 16;

    /// Track geometry (pixels)
    pub const FROG_START_PX: f32 = 50.0;
    pub const PX_PER_METER: f32 = 30.0;
    pub const TERRAIN_TRACK_START: f32 = 200.0;
    pub const TERRAIN_TRACK_LENGTH: f32 = 1800.0;

    /// Terrain generation
    pub const TERRAIN_MIN_SEGMENTS: u32 = 3;
    pub const TERRAIN_MAX_SEGMENTS: u32 = 5;
    /// Fraction of a zone in which a segment may start
    pub const TERRAIN_START_SPREAD: f32 = 0.3;
    pub const TERRAIN_MIN_WIDTH: u32 = 150;
    pub const TERRAIN_WIDTH_RANGE: u32 = 250;
    pub const LAVA_WEIGHT: f32 = 0.12;
    pub const ICE_WEIGHT: f32 = 0.55;

    /// Collectibles
    pub const COLLECTIBLE_MIN_PX: f32 = 150.0;
    pub const COLLECTIBLE_MAX_PX: f32 = 1800.0;
    pub const COLLECTIBLE_MAX_RETRIES: u32 = 10;
    pub const COLLECTIBLE_CATCH_PX: f32 = 50.0;
    pub const RARE_CHANCE: f64 = 1.0 / 36.0;
    pub const COLLECTIBLE_BASE_BONUS: u32 = 30;
    pub const COLLECTIBLE_DISTANCE_MULTIPLIER: f32 = 2.0;
    pub const RARE_MULTIPLIER: u32 = 10;

    /// Jump
    pub const MAX_CHARGE: u8 = 100;
    pub const CHARGE_STEP: u8 = 2;
    pub const CHARGE_INTERVAL_MS: u32 = 30;
    pub const MAX_JUMP_METERS: f32 = 15.0;
    pub const JUMP_VARIANCE_SD: f64 = 0.08;
    pub const JUMP_MULTIPLIER_MIN: f64 = 0.7;
    pub const JUMP_MULTIPLIER_MAX: f64 = 1.3;
    /// Slide budget as a fraction of the jump's pixel distance
    pub const ICE_SLIDE_FACTOR: f32 = 0.9;

    /// Rewards
    pub const XP_PER_METER: f32 = 5.0;
    pub const LAVA_XP_PENALTY: u32 = 100;
    pub const XP_BASE: f64 = 100.0;
    pub const XP_GROWTH: f64 = 1.5;

    /// Energy (seconds)
    pub const ENERGY_TICK_MS: u32 = 1000;
    pub const AWAKE_DURATION: u32 = 120;
    pub const BASE_SLEEP_DURATION: u32 = 60;
    pub const LOW_ENERGY_WARNING: u32 = 30;

    /// Sequencing (milliseconds)
    pub const FLIGHT_MS: u32 = 1000;
    pub const SLIDE_MS: u32 = 500;
    pub const SETTLE_MS: u32 = 100;
    pub const REVEAL_MS: u32 = 2000;
    pub const PREVIEW_LEAD_IN_MS: u32 = 800;
    pub const PREVIEW_TAIL_MS: u32 = 500;

    /// Persistence key
    pub const STORAGE_KEY: &str = "froggyJump";
}

/// Convert a track position (pixels) to meters jumped from the start pad
#[inline]
pub fn px_to_meters(px: f32) -> f32 {
    (px - consts::FROG_START_PX) / consts::PX_PER_METER
}

/// Rounded meter label for a track position
#[inline]
pub fn px_to_label_meters(px: f32) -> i32 {
    px_to_meters(px).round() as i32
}

/// Convert meters jumped to a track position (pixels)
#[inline]
pub fn meters_to_px(meters: f32) -> f32 {
    consts::FROG_START_PX + meters * consts::PX_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_meter_conversion() {
        assert_eq!(px_to_meters(50.0), 0.0);
        assert_eq!(px_to_meters(500.0), 15.0);
        assert_eq!(meters_to_px(15.0), 500.0);
        assert_eq!(px_to_label_meters(200.0), 5);
        assert_eq!(px_to_label_meters(214.0), 5);
        assert_eq!(px_to_label_meters(216.0), 6);
    }
}
