//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Jump distance at full charge with no skin bonus (meters)
    pub max_jump_meters: f32,
    /// Standard deviation of the jump variance multiplier
    pub jump_variance_sd: f64,
    /// Slide budget as a fraction of the jump's pixel distance
    pub ice_slide_factor: f32,
    /// How close the landing must be to catch a collectible (pixels)
    pub catch_radius_px: f32,
    /// Probability that a collectible is the rare edition
    pub rare_chance: f64,
    /// First pixel of the terrain strip
    pub track_start: f32,
    /// Length of the terrain strip (pixels)
    pub track_length: f32,
    /// Seconds awake before the frog falls asleep
    pub awake_duration: u32,
    /// Sleep seconds before the skin's cooldown reduction
    pub base_sleep_duration: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_jump_meters: MAX_JUMP_METERS,
            jump_variance_sd: JUMP_VARIANCE_SD,
            ice_slide_factor: ICE_SLIDE_FACTOR,
            catch_radius_px: COLLECTIBLE_CATCH_PX,
            rare_chance: RARE_CHANCE,
            track_start: TERRAIN_TRACK_START,
            track_length: TERRAIN_TRACK_LENGTH,
            awake_duration: AWAKE_DURATION,
            base_sleep_duration: BASE_SLEEP_DURATION,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp every field into a range the simulation can handle
    pub fn sanitized(mut self) -> Self {
        self.max_jump_meters = self.max_jump_meters.max(0.0);
        self.jump_variance_sd = self.jump_variance_sd.max(0.0);
        self.ice_slide_factor = self.ice_slide_factor.clamp(0.0, 1.0);
        self.catch_radius_px = self.catch_radius_px.max(0.0);
        self.rare_chance = self.rare_chance.clamp(0.0, 1.0);
        self.track_length = self.track_length.max(1.0);
        self.awake_duration = self.awake_duration.max(1);
        self
    }
}
