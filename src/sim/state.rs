//! Game state and core simulation types
//!
//! Session data (terrain, collectibles) is pure data with ids; the view
//! layer keeps its own handles keyed by those ids.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectibles::spawn_session_collectibles;
use super::energy::Energy;
use super::preview::PreviewSequence;
use super::sequence::JumpSequence;
use super::terrain::generate_terrain;
use crate::progression::{PlayerProfile, RewardSummary};
use crate::skins::SkinId;
use crate::tuning::Tuning;

/// Ground types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    /// Cosmetic splash only
    Snow,
    /// Slippery: the frog slides forward
    Ice,
    /// Hazard: burns the frog and costs XP
    Lava,
}

impl TerrainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainKind::Snow => "Snow",
            TerrainKind::Ice => "Ice",
            TerrainKind::Lava => "Lava",
        }
    }
}

/// A patch of special ground on the track (pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSegment {
    pub id: u32,
    pub kind: TerrainKind,
    pub start: f32,
    pub end: f32,
    pub width: f32,
}

impl TerrainSegment {
    pub fn new(id: u32, kind: TerrainKind, start: f32, width: f32) -> Self {
        Self {
            id,
            kind,
            start,
            end: start + width,
            width,
        }
    }

    /// Closed-range containment
    #[inline]
    pub fn contains(&self, position: f32) -> bool {
        position >= self.start && position <= self.end
    }

    pub fn midpoint(&self) -> f32 {
        self.start + self.width / 2.0
    }
}

/// Collectible colors; `Black` is the rare edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Pink,
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Black,
}

impl ColorTag {
    /// The non-rare palette
    pub const COMMON: [ColorTag; 6] = [
        ColorTag::Pink,
        ColorTag::Red,
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Yellow,
        ColorTag::Purple,
    ];
}

/// A bonus item on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub position: f32,
    pub collected: bool,
    pub is_rare: bool,
    pub color: ColorTag,
}

impl Collectible {
    pub fn new(id: u32, position: f32, color: ColorTag) -> Self {
        Self {
            id,
            position,
            collected: false,
            is_rare: color == ColorTag::Black,
            color,
        }
    }
}

/// One jump's worth of track: regenerated every session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// 1-based session counter
    pub index: u32,
    /// Sorted by `start`
    pub terrains: Vec<TerrainSegment>,
    pub collectibles: Vec<Collectible>,
}

/// Everything that happened in a resolved jump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpOutcome {
    pub charge_power: u8,
    pub multiplier: f64,
    /// Where the flight ended (pixels)
    pub landing_position: f32,
    /// Where the frog came to rest after any slide (pixels)
    pub final_position: f32,
    /// Flight distance, excluding the slide
    pub flight_meters: f32,
    /// Distance from the start pad to the resting spot
    pub total_meters: f32,
    pub landing_terrain: Option<TerrainKind>,
    pub hazard_hit: bool,
    pub did_slide: bool,
    /// Slide pickups first, then the landing pickup
    pub collected: Vec<Collectible>,
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Camera tour of the new track; input locked
    Preview,
    /// Waiting for the player to start charging
    Ready,
    /// Power bar filling
    Charging,
    /// Flight, slide and reveal animations running
    Jumping,
    /// Result popup shown, waiting for dismissal
    Result,
}

/// Where a preview stop points the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewTarget {
    Terrain { id: u32, kind: TerrainKind },
    Collectible { id: u32, rare: bool },
}

/// Banner shown during a preview stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewBadge {
    Preview,
    Danger,
    Secret,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted {
        index: u32,
        terrains: Vec<TerrainSegment>,
        collectibles: Vec<Collectible>,
    },
    PreviewStop {
        position: f32,
        meters: i32,
        target: PreviewTarget,
        badge: PreviewBadge,
    },
    PreviewFinished,
    ChargeChanged {
        power: u8,
    },
    JumpStarted {
        from: f32,
        to: f32,
    },
    /// Frog position for the camera to follow during flight and slide
    CameraFollow {
        position: f32,
    },
    Landed {
        position: f32,
        terrain: Option<TerrainKind>,
    },
    HazardHit {
        position: f32,
    },
    CollectibleRevealed {
        id: u32,
        bonus: u32,
        rare: bool,
    },
    JumpResolved {
        summary: RewardSummary,
    },
    ProfileChanged,
    SkinSelected {
        skin: SkinId,
    },
    FellAsleep {
        duration: u32,
    },
    WokeUp,
    EnergyChanged {
        awake_remaining: u32,
        sleep_remaining: u32,
    },
}

/// Complete runtime state, owned by a single controller
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub session: Session,
    pub profile: PlayerProfile,
    pub energy: Energy,
    pub phase: GamePhase,
    /// Charge level, 0..=100
    pub power: u8,
    pub preview: Option<PreviewSequence>,
    pub jump: Option<JumpSequence>,
    /// Summary of the jump awaiting dismissal
    pub result: Option<RewardSummary>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) charge_accum_ms: u32,
    pub(crate) energy_accum_ms: u32,
    pub(crate) events: VecDeque<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New game with default tuning; starts the first session
    pub fn new(seed: u64, profile: PlayerProfile) -> Self {
        Self::with_tuning(seed, profile, Tuning::default())
    }

    pub fn with_tuning(seed: u64, profile: PlayerProfile, tuning: Tuning) -> Self {
        let energy = Energy::new(tuning.awake_duration, tuning.base_sleep_duration);
        let mut state = Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            session: Session::default(),
            profile,
            energy,
            phase: GamePhase::Preview,
            power: 0,
            preview: None,
            jump: None,
            result: None,
            time_ticks: 0,
            charge_accum_ms: 0,
            energy_accum_ms: 0,
            events: VecDeque::new(),
            next_id: 1,
        };
        state.start_session();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Discard the old track, lay out a fresh one and start its preview
    pub fn start_session(&mut self) {
        let terrain_first = self.next_id;
        let terrains = generate_terrain(
            &mut self.rng,
            self.tuning.track_start,
            self.tuning.track_length,
            terrain_first,
        );
        self.next_id += terrains.len() as u32;

        let collectibles = spawn_session_collectibles(
            &mut self.rng,
            &terrains,
            self.tuning.rare_chance,
            self.next_id,
        );
        self.next_id += collectibles.len() as u32;

        self.session = Session {
            index: self.session.index + 1,
            terrains,
            collectibles,
        };
        self.power = 0;
        self.jump = None;
        self.result = None;
        self.preview = Some(PreviewSequence::new(
            &self.session.terrains,
            &self.session.collectibles,
        ));
        self.phase = GamePhase::Preview;

        log::info!(
            "Session {}: {} terrain patches, {} collectibles",
            self.session.index,
            self.session.terrains.len(),
            self.session.collectibles.len()
        );

        self.push_event(GameEvent::SessionStarted {
            index: self.session.index,
            terrains: self.session.terrains.clone(),
            collectibles: self.session.collectibles.clone(),
        });
    }

    /// A jump is in flight or its result is still on screen
    pub fn is_jumping(&self) -> bool {
        matches!(self.phase, GamePhase::Jumping | GamePhase::Result)
    }

    pub fn is_preview_playing(&self) -> bool {
        self.phase == GamePhase::Preview
    }

    /// Charging may begin right now
    pub fn can_start_charging(&self) -> bool {
        self.phase == GamePhase::Ready && self.energy.can_jump()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Take all pending presentation events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}
