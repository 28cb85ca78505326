//! wasm32 bindings

use wasm_bindgen::prelude::*;

use crate::persistence::{
    PersistenceError, PersistenceResult, ProfileStore, STORAGE_KEY, load_profile, save_profile,
};
use crate::sim::{FixedStep, GameEvent, GameState, TargetSummary, TickInput, tick};
use crate::skins::{CATALOG, SkinId};
use crate::tuning::Tuning;

/// Profile record in `window.localStorage`
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> PersistenceResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| PersistenceError::Unavailable("localStorage disabled".into()))
    }
}

impl ProfileStore for LocalStorageStore {
    fn load_raw(&self) -> PersistenceResult<Option<String>> {
        Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))
    }

    fn save_raw(&mut self, data: &str) -> PersistenceResult<()> {
        Self::storage()?
            .set_item(STORAGE_KEY, data)
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))
    }
}

fn to_js(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Game handle owned by the page
#[wasm_bindgen]
pub struct FroggyJump {
    state: GameState,
    clock: FixedStep,
    input: TickInput,
    store: LocalStorageStore,
}

#[wasm_bindgen]
impl FroggyJump {
    /// Load the saved profile and start the first session.
    ///
    /// `seed` defaults to the current time; `tuning_json` holds optional
    /// balance overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> Result<FroggyJump, JsValue> {
        console_error_panic_hook::set_once();
        // A second handle on the same page finds the logger already set
        let _ = console_log::init_with_level(log::Level::Info);

        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let store = LocalStorageStore;
        let profile = load_profile(&store);
        log::info!("Froggy Jump initialized with seed: {}", seed);

        Ok(Self {
            state: GameState::with_tuning(seed, profile, tuning),
            clock: FixedStep::default(),
            input: TickInput::default(),
            store,
        })
    }

    /// Run the simulation for a frame of `dt_ms`; returns the events as JSON
    pub fn update(&mut self, dt_ms: f64) -> Result<String, JsValue> {
        for _ in 0..self.clock.steps(dt_ms) {
            let input = self.input.clone();
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input = TickInput::default();
        }

        let events = self.state.drain_events();
        if events.contains(&GameEvent::ProfileChanged) {
            self.save();
        }
        serde_json::to_string(&events).map_err(to_js)
    }

    pub fn press(&mut self) {
        self.input.press = true;
    }

    pub fn release(&mut self) {
        self.input.release = true;
    }

    /// Close the collectible reveal or the result popup
    pub fn dismiss(&mut self) {
        self.input.dismiss = true;
    }

    /// Queue a skin change; `false` if the id is unknown or still locked
    pub fn select_skin(&mut self, id: &str) -> bool {
        match SkinId::from_str(id) {
            Some(id) if self.state.profile.is_unlocked(id) => {
                self.input.select_skin = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn power(&self) -> u8 {
        self.state.power
    }

    pub fn profile_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.profile).map_err(to_js)
    }

    pub fn skins_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&CATALOG).map_err(to_js)
    }

    /// Targets panel for the current session
    pub fn targets_json(&self) -> Result<String, JsValue> {
        let summary = TargetSummary::build(
            &self.state.session.terrains,
            &self.state.session.collectibles,
        );
        serde_json::to_string(&summary).map_err(to_js)
    }

    pub fn energy_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.energy).map_err(to_js)
    }
}

impl FroggyJump {
    fn save(&mut self) {
        if let Err(e) = save_profile(&mut self.store, &self.state.profile) {
            log::warn!("Failed to save profile: {}", e);
        }
    }
}
