//! Froggy Jump entry point
//!
//! On the web the page drives `froggy_jump::platform::FroggyJump`. Natively
//! this runs a short headless session loop with logging, persisting the
//! profile next to the working directory.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Froggy Jump (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let jumps = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(5);

    headless::run(seed, jumps);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the FroggyJump handle, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use froggy_jump::consts::SIM_DT_MS;
    use froggy_jump::persistence::{FileStore, load_profile, save_profile};
    use froggy_jump::sim::{GameEvent, GamePhase, GameState, TargetSummary, TickInput, tick};

    /// Hold the button this long before letting go
    const CHARGE_HOLD_MS: u32 = 1200;
    /// Safety valve for a stuck phase
    const MAX_TICKS_PER_JUMP: u32 = 60_000;

    pub fn run(seed: u64, jumps: u32) {
        let mut store = FileStore::in_dir(".");
        let profile = load_profile(&store);
        let mut state = GameState::new(seed, profile);

        for _ in 0..jumps {
            let summary = TargetSummary::build(&state.session.terrains, &state.session.collectibles);
            for line in summary.lines() {
                log::info!("{}", line);
            }

            play_one(&mut state);
            report(&mut state, &mut store);

            // Dismiss the result, starting the next session
            tick(&mut state, &TickInput { dismiss: true, ..Default::default() });
        }

        log::info!(
            "Done: level {} ({}/{} xp), best {:.1}m",
            state.profile.level,
            state.profile.xp,
            state.profile.xp_needed(),
            state.profile.best_jump
        );
    }

    fn play_one(state: &mut GameState) {
        let idle = TickInput::default();
        let mut held_ms = 0;

        for _ in 0..MAX_TICKS_PER_JUMP {
            let input = match state.phase {
                GamePhase::Ready if state.can_start_charging() => TickInput {
                    press: true,
                    ..Default::default()
                },
                GamePhase::Charging => {
                    held_ms += SIM_DT_MS;
                    TickInput {
                        release: held_ms >= CHARGE_HOLD_MS,
                        ..Default::default()
                    }
                }
                GamePhase::Result => return,
                _ => idle.clone(),
            };
            tick(state, &input);
        }
        log::warn!("Jump did not finish within {} ticks", MAX_TICKS_PER_JUMP);
    }

    fn report(state: &mut GameState, store: &mut FileStore) {
        for event in state.drain_events() {
            match event {
                GameEvent::Landed { position, terrain } => {
                    log::debug!("Landed at {:.0}px on {:?}", position, terrain)
                }
                GameEvent::FellAsleep { duration } => log::info!("Zzz for {}s", duration),
                GameEvent::JumpResolved { summary } => log::info!(
                    "{}: {:.1}m, +{} xp (level {})",
                    summary.headline.as_str(),
                    summary.distance_meters,
                    summary.xp_gained,
                    summary.level
                ),
                _ => {}
            }
        }
        if let Err(e) = save_profile(store, &state.profile) {
            log::warn!("Failed to save profile to {}: {}", store.path().display(), e);
        }
    }
}
