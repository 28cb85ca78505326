//! Frog skins
//!
//! Static catalog. Skins unlock with level and trade cosmetic flair for a
//! jump bonus and shorter sleep.

use serde::{Deserialize, Serialize};

/// Skin identifiers (serialized with the ids used in saved profiles)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SkinId {
    #[default]
    Default,
    Golden,
    Royal,
    Cosmic,
    Rainbow,
}

impl SkinId {
    pub const ALL: [SkinId; 5] = [
        SkinId::Default,
        SkinId::Golden,
        SkinId::Royal,
        SkinId::Cosmic,
        SkinId::Rainbow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinId::Default => "default",
            SkinId::Golden => "golden",
            SkinId::Royal => "royal",
            SkinId::Cosmic => "cosmic",
            SkinId::Rainbow => "rainbow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" | "classic" => Some(SkinId::Default),
            "golden" | "gold" => Some(SkinId::Golden),
            "royal" => Some(SkinId::Royal),
            "cosmic" => Some(SkinId::Cosmic),
            "rainbow" => Some(SkinId::Rainbow),
            _ => None,
        }
    }

    /// Catalog entry for this skin
    pub fn skin(&self) -> &'static Skin {
        // CATALOG is declared in the same order as the enum
        &CATALOG[*self as usize]
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skin {
    pub id: SkinId,
    pub name: &'static str,
    /// Jump distance multiplier (>= 1.0)
    pub jump_bonus: f32,
    /// Level at which the skin unlocks
    pub unlock_level: u32,
    /// Sleep duration multiplier in (0, 1]; lower recovers faster
    pub cooldown_reduction: f32,
}

impl Skin {
    /// Jump bonus as a whole percentage (e.g. 30 for a 1.3x bonus)
    pub fn bonus_percent(&self) -> i32 {
        ((self.jump_bonus - 1.0) * 100.0).round() as i32
    }

    /// Sleep time saved as a whole percentage
    pub fn sleep_saving_percent(&self) -> i32 {
        ((1.0 - self.cooldown_reduction) * 100.0).round() as i32
    }
}

pub static CATALOG: [Skin; 5] = [
    Skin {
        id: SkinId::Default,
        name: "Classic Froggy",
        jump_bonus: 1.0,
        unlock_level: 1,
        cooldown_reduction: 1.0,
    },
    Skin {
        id: SkinId::Golden,
        name: "Golden Frog",
        jump_bonus: 1.3,
        unlock_level: 3,
        cooldown_reduction: 0.8,
    },
    Skin {
        id: SkinId::Royal,
        name: "Royal Frog",
        jump_bonus: 1.6,
        unlock_level: 5,
        cooldown_reduction: 0.6,
    },
    Skin {
        id: SkinId::Cosmic,
        name: "Cosmic Frog",
        jump_bonus: 2.0,
        unlock_level: 8,
        cooldown_reduction: 0.4,
    },
    Skin {
        id: SkinId::Rainbow,
        name: "Rainbow Frog",
        jump_bonus: 2.5,
        unlock_level: 10,
        cooldown_reduction: 0.25,
    },
];

/// Skins available at a given level, in catalog order
pub fn unlocked_at(level: u32) -> impl Iterator<Item = &'static Skin> {
    CATALOG.iter().filter(move |s| s.unlock_level <= level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_ids() {
        for id in SkinId::ALL {
            assert_eq!(id.skin().id, id);
        }
    }

    #[test]
    fn test_catalog_invariants() {
        for skin in &CATALOG {
            assert!(skin.jump_bonus >= 1.0);
            assert!(skin.cooldown_reduction > 0.0 && skin.cooldown_reduction <= 1.0);
        }
        assert_eq!(SkinId::Default.skin().unlock_level, 1);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for id in SkinId::ALL {
            assert_eq!(SkinId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(SkinId::from_str("GOLD"), Some(SkinId::Golden));
        assert_eq!(SkinId::from_str("plaid"), None);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(SkinId::Golden.skin().bonus_percent(), 30);
        assert_eq!(SkinId::Golden.skin().sleep_saving_percent(), 20);
        assert_eq!(SkinId::Rainbow.skin().sleep_saving_percent(), 75);
    }

    #[test]
    fn test_unlocked_at() {
        let ids: Vec<_> = unlocked_at(5).map(|s| s.id).collect();
        assert_eq!(ids, vec![SkinId::Default, SkinId::Golden, SkinId::Royal]);
    }

    #[test]
    fn test_serde_ids() {
        assert_eq!(serde_json::to_string(&SkinId::Rainbow).unwrap(), "\"rainbow\"");
        let id: SkinId = serde_json::from_str("\"golden\"").unwrap();
        assert_eq!(id, SkinId::Golden);
    }
}
