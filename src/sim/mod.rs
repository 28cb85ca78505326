//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (track order, then entity ID)
//! - No rendering or platform dependencies

pub mod collectibles;
pub mod energy;
pub mod jump;
pub mod preview;
pub mod sequence;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collectibles::{collectible_bonus, spawn_collectibles, spawn_session_collectibles};
pub use energy::{Energy, EnergyTransition, format_clock};
pub use jump::{resolve_jump, resolve_jump_with_multiplier};
pub use preview::{PreviewSequence, PreviewStop, TargetSummary};
pub use sequence::{JumpSequence, JumpStep};
pub use state::{
    Collectible, ColorTag, GameEvent, GamePhase, GameState, JumpOutcome, PreviewBadge,
    PreviewTarget, Session, TerrainKind, TerrainSegment,
};
pub use terrain::{generate_terrain, terrain_at};
pub use tick::{FixedStep, TickInput, tick};
