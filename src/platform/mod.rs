//! Platform abstraction layer
//!
//! Browser bindings for the simulation core:
//! - LocalStorage profile store
//! - `FroggyJump` handle driven by the page's animation frame loop
//!
//! Native builds use [`crate::persistence::FileStore`] instead.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{FroggyJump, LocalStorageStore};
