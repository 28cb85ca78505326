//! Fixed timestep simulation tick
//!
//! Core game loop: charging, energy, preview and jump playback all advance
//! here in 10ms steps. The outcome of a jump is computed synchronously on
//! release; the remaining phases only pace its presentation.

use super::energy::EnergyTransition;
use super::jump::resolve_jump;
use super::sequence::JumpSequence;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::progression::{apply_reward, select_skin};
use crate::skins::SkinId;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump button pressed (start charging)
    pub press: bool,
    /// Jump button released (launch)
    pub release: bool,
    /// Close the collectible reveal or the result popup
    pub dismiss: bool,
    /// Equip a skin
    pub select_skin: Option<SkinId>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    let dt = SIM_DT_MS;
    state.time_ticks += 1;

    if let Some(id) = input.select_skin {
        if select_skin(&mut state.profile, id) {
            state.push_event(GameEvent::SkinSelected { skin: id });
            state.push_event(GameEvent::ProfileChanged);
        }
    }

    tick_energy(state, dt);

    match state.phase {
        GamePhase::Preview => {
            let Some(preview) = state.preview.as_mut() else {
                state.phase = GamePhase::Ready;
                return;
            };
            let stops = preview.advance(dt);
            let finished = preview.is_finished();
            for stop in stops {
                state.push_event(GameEvent::PreviewStop {
                    position: stop.position,
                    meters: stop.meters,
                    target: stop.target,
                    badge: stop.badge,
                });
            }
            if finished {
                state.preview = None;
                state.phase = GamePhase::Ready;
                state.push_event(GameEvent::PreviewFinished);
            }
        }

        GamePhase::Ready | GamePhase::Charging => {
            if state.phase == GamePhase::Ready && input.press {
                start_charging(state);
            }
            if state.phase == GamePhase::Charging {
                if state.energy.sleeping {
                    // Dozed off mid-charge: the charge is lost
                    cancel_charging(state);
                    return;
                }
                charge(state, dt);
                if input.release {
                    release_charge(state);
                }
            }
        }

        GamePhase::Jumping => {
            let Some(jump) = state.jump.as_mut() else {
                state.phase = GamePhase::Result;
                return;
            };
            let events = jump.advance(dt, input.dismiss);
            let finished = jump.is_finished();
            let summary = finished.then(|| jump.summary().clone());
            state.events.extend(events);
            if let Some(summary) = summary {
                state.jump = None;
                state.result = Some(summary);
                state.phase = GamePhase::Result;
            }
        }

        GamePhase::Result => {
            if input.dismiss {
                state.start_session();
            }
        }
    }
}

fn tick_energy(state: &mut GameState, dt: u32) {
    state.energy_accum_ms += dt;
    while state.energy_accum_ms >= ENERGY_TICK_MS {
        state.energy_accum_ms -= ENERGY_TICK_MS;

        let jumping = state.is_jumping();
        let skin = state.profile.skin();
        let transition = state.energy.tick(jumping, skin);
        state.push_event(GameEvent::EnergyChanged {
            awake_remaining: state.energy.awake_remaining,
            sleep_remaining: state.energy.sleep_remaining,
        });
        match transition {
            Some(EnergyTransition::FellAsleep { duration }) => {
                state.push_event(GameEvent::FellAsleep { duration })
            }
            Some(EnergyTransition::WokeUp) => state.push_event(GameEvent::WokeUp),
            None => {}
        }
    }
}

fn start_charging(state: &mut GameState) {
    if !state.can_start_charging() {
        log::debug!(
            "Charge rejected: phase={:?} sleeping={}",
            state.phase,
            state.energy.sleeping
        );
        return;
    }
    state.phase = GamePhase::Charging;
    state.power = 0;
    state.charge_accum_ms = 0;
    state.push_event(GameEvent::ChargeChanged { power: 0 });
}

fn cancel_charging(state: &mut GameState) {
    state.phase = GamePhase::Ready;
    state.power = 0;
    state.charge_accum_ms = 0;
    state.push_event(GameEvent::ChargeChanged { power: 0 });
}

fn charge(state: &mut GameState, dt: u32) {
    state.charge_accum_ms += dt;
    let before = state.power;
    while state.charge_accum_ms >= CHARGE_INTERVAL_MS {
        state.charge_accum_ms -= CHARGE_INTERVAL_MS;
        state.power = state.power.saturating_add(CHARGE_STEP).min(MAX_CHARGE);
    }
    if state.power != before {
        state.push_event(GameEvent::ChargeChanged { power: state.power });
    }
}

fn release_charge(state: &mut GameState) {
    let power = state.power;
    state.charge_accum_ms = 0;
    if power == 0 {
        state.phase = GamePhase::Ready;
        return;
    }

    let skin = state.profile.skin();
    let outcome = resolve_jump(
        &mut state.rng,
        &mut state.session,
        power,
        skin,
        &state.tuning,
    );
    let summary = apply_reward(&outcome, &mut state.profile);
    state.push_event(GameEvent::ProfileChanged);

    state.jump = Some(JumpSequence::new(&outcome, summary));
    state.phase = GamePhase::Jumping;
}

/// Fixed-step accumulator for variable frame times
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator_ms: f64,
}

impl FixedStep {
    /// Number of simulation steps to run for a frame of `dt_ms`
    pub fn steps(&mut self, dt_ms: f64) -> u32 {
        // Clamp long frames (tab in background) like a pause
        self.accumulator_ms += dt_ms.clamp(0.0, 100.0);
        let step = SIM_DT_MS as f64;
        let mut steps = 0;
        while self.accumulator_ms >= step && steps < MAX_SUBSTEPS {
            self.accumulator_ms -= step;
            steps += 1;
        }
        steps
    }
}
