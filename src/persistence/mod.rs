//! Player profile persistence
//!
//! The profile is stored as a single JSON record under [`STORAGE_KEY`].
//! Loading never fails: a missing or unreadable record falls back to a
//! fresh profile. Saving reports errors to the caller.

use std::io;

use crate::progression::PlayerProfile;

pub use crate::consts::STORAGE_KEY;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

/// Errors raised by profile storage backends.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend cannot be reached (no window, storage disabled, quota)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A key-value slot holding the raw profile record
pub trait ProfileStore {
    /// Raw record, `None` when nothing has been saved yet
    fn load_raw(&self) -> PersistenceResult<Option<String>>;

    fn save_raw(&mut self, data: &str) -> PersistenceResult<()>;
}

/// In-memory store, used by tests and the headless demo
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub data: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load_raw(&self) -> PersistenceResult<Option<String>> {
        Ok(self.data.clone())
    }

    fn save_raw(&mut self, data: &str) -> PersistenceResult<()> {
        self.data = Some(data.to_string());
        Ok(())
    }
}

/// Parse a stored record and repair its invariants
pub fn decode_profile(raw: &str) -> PersistenceResult<PlayerProfile> {
    let profile: PlayerProfile = serde_json::from_str(raw)?;
    Ok(profile.normalize())
}

/// Load the profile, falling back to a fresh one on any failure
pub fn load_profile(store: &impl ProfileStore) -> PlayerProfile {
    let raw = match store.load_raw() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::info!("No saved profile found, starting fresh");
            return PlayerProfile::default();
        }
        Err(e) => {
            log::warn!("Failed to read saved profile: {}", e);
            return PlayerProfile::default();
        }
    };

    match decode_profile(&raw) {
        Ok(profile) => {
            log::info!(
                "Loaded profile: level {}, best {:.1}m, skin {}",
                profile.level,
                profile.best_jump,
                profile.current_skin.as_str()
            );
            profile
        }
        Err(e) => {
            log::warn!("Saved profile is corrupt, starting fresh: {}", e);
            PlayerProfile::default()
        }
    }
}

/// Write the whole profile record
pub fn save_profile(store: &mut impl ProfileStore, profile: &PlayerProfile) -> PersistenceResult<()> {
    let json = serde_json::to_string(profile)?;
    store.save_raw(&json)?;
    log::debug!("Profile saved (level {})", profile.level);
    Ok(())
}
