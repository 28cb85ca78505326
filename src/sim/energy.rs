//! Awake/sleep energy cycle
//!
//! The frog stays awake for a fixed number of seconds of play, then sleeps
//! for a skin-dependent cooldown. The awake countdown pauses while a jump is
//! in progress; the sleep countdown always runs.

use serde::{Deserialize, Serialize};

use crate::skins::Skin;

/// Energy state transition produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyTransition {
    FellAsleep { duration: u32 },
    WokeUp,
}

/// Energy state machine, driven by one tick per second
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    /// Seconds of play left before sleep
    pub awake_remaining: u32,
    /// Seconds of sleep left
    pub sleep_remaining: u32,
    /// Sleep length fixed when sleep began
    pub sleep_duration: u32,
    pub sleeping: bool,
    awake_duration: u32,
    base_sleep_duration: u32,
}

impl Energy {
    /// Fully rested and awake
    pub fn new(awake_duration: u32, base_sleep_duration: u32) -> Self {
        Self {
            awake_remaining: awake_duration,
            sleep_remaining: 0,
            sleep_duration: 0,
            sleeping: false,
            awake_duration,
            base_sleep_duration,
        }
    }

    /// Sleep length for a skin: `floor(base * cooldown_reduction)`
    pub fn sleep_duration_for(&self, skin: &Skin) -> u32 {
        (self.base_sleep_duration as f32 * skin.cooldown_reduction).floor() as u32
    }

    /// Whether a jump may be started (ignoring jump/preview gating)
    pub fn can_jump(&self) -> bool {
        !self.sleeping
    }

    /// Advance one second.
    ///
    /// `jump_in_progress` pauses the awake countdown. `skin` is the skin
    /// equipped right now; it only matters if this tick puts the frog to
    /// sleep, since the sleep length is snapshotted on entry.
    pub fn tick(&mut self, jump_in_progress: bool, skin: &Skin) -> Option<EnergyTransition> {
        if self.sleeping {
            self.sleep_remaining = self.sleep_remaining.saturating_sub(1);
            if self.sleep_remaining == 0 {
                self.wake_up();
                return Some(EnergyTransition::WokeUp);
            }
            return None;
        }

        if jump_in_progress {
            return None;
        }

        self.awake_remaining = self.awake_remaining.saturating_sub(1);
        if self.awake_remaining == 0 {
            let duration = self.fall_asleep(skin);
            return Some(EnergyTransition::FellAsleep { duration });
        }
        None
    }

    fn fall_asleep(&mut self, skin: &Skin) -> u32 {
        self.sleeping = true;
        self.sleep_duration = self.sleep_duration_for(skin);
        self.sleep_remaining = self.sleep_duration;
        log::info!("Frog fell asleep for {}s", self.sleep_duration);
        self.sleep_duration
    }

    fn wake_up(&mut self) {
        self.sleeping = false;
        self.sleep_remaining = 0;
        self.awake_remaining = self.awake_duration;
        log::info!("Frog woke up");
    }

    /// Fraction of the current sleep already elapsed, in `[0, 1]`
    pub fn sleep_progress(&self) -> f32 {
        if !self.sleeping || self.sleep_duration == 0 {
            return 0.0;
        }
        (self.sleep_duration - self.sleep_remaining.min(self.sleep_duration)) as f32
            / self.sleep_duration as f32
    }

    /// Awake time is running low
    pub fn is_low_energy(&self) -> bool {
        !self.sleeping && self.awake_remaining <= crate::consts::LOW_ENERGY_WARNING
    }
}

/// Format seconds as `M:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
