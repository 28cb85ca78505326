//! Jump presentation timeline
//!
//! The outcome of a jump is known the moment the player lets go; this
//! sequence only paces how it is revealed: flight, landing, slide, a short
//! settle, the collectible reveal and finally the result popup.

use std::collections::VecDeque;

use super::collectibles::{collectible_bonus, most_valuable};
use super::state::{GameEvent, JumpOutcome, TerrainKind};
use crate::consts::*;
use crate::progression::RewardSummary;

/// A timed step of the jump presentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpStep {
    Flight { from: f32, to: f32 },
    Slide { from: f32, to: f32 },
    /// Pause for terrain effects to play out
    Settle,
    /// Collectible popup; skippable
    Reveal { id: u32, bonus: u32, rare: bool },
    /// Result popup; holds until the player dismisses it
    Result,
}

#[derive(Debug, Clone, PartialEq)]
struct TimedStep {
    step: JumpStep,
    duration_ms: u32,
}

/// Step-by-step playback of a resolved jump
#[derive(Debug, Clone, PartialEq)]
pub struct JumpSequence {
    steps: VecDeque<TimedStep>,
    elapsed_ms: u32,
    entered: bool,
    landing_terrain: Option<TerrainKind>,
    hazard_hit: bool,
    final_position: f32,
    summary: RewardSummary,
}

impl JumpSequence {
    pub fn new(outcome: &JumpOutcome, summary: RewardSummary) -> Self {
        let mut steps = VecDeque::new();
        steps.push_back(TimedStep {
            step: JumpStep::Flight {
                from: FROG_START_PX,
                to: outcome.landing_position,
            },
            duration_ms: FLIGHT_MS,
        });
        if outcome.did_slide {
            steps.push_back(TimedStep {
                step: JumpStep::Slide {
                    from: outcome.landing_position,
                    to: outcome.final_position,
                },
                duration_ms: SLIDE_MS,
            });
        }
        steps.push_back(TimedStep {
            step: JumpStep::Settle,
            duration_ms: SETTLE_MS,
        });
        if let Some(best) = most_valuable(&outcome.collected) {
            steps.push_back(TimedStep {
                step: JumpStep::Reveal {
                    id: best.id,
                    bonus: collectible_bonus(best),
                    rare: best.is_rare,
                },
                duration_ms: REVEAL_MS,
            });
        }
        steps.push_back(TimedStep {
            step: JumpStep::Result,
            duration_ms: 0,
        });

        Self {
            steps,
            elapsed_ms: 0,
            entered: false,
            landing_terrain: outcome.landing_terrain,
            hazard_hit: outcome.hazard_hit,
            final_position: outcome.final_position,
            summary,
        }
    }

    /// Step currently playing
    pub fn current(&self) -> Option<JumpStep> {
        self.steps.front().map(|t| t.step)
    }

    /// The result popup has been reached
    pub fn is_finished(&self) -> bool {
        self.entered && matches!(self.current(), Some(JumpStep::Result) | None)
    }

    pub fn summary(&self) -> &RewardSummary {
        &self.summary
    }

    /// Advance by `dt_ms`. `skip` closes a collectible reveal early.
    ///
    /// Leftover time carries into the next step, so a large `dt_ms` can
    /// play several steps at once.
    pub fn advance(&mut self, dt_ms: u32, skip: bool) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut budget = dt_ms;

        while let Some(TimedStep { step, duration_ms }) = self.steps.front().cloned() {
            if !self.entered {
                self.entered = true;
                self.on_enter(step, &mut events);
            }
            if step == JumpStep::Result {
                break;
            }

            let remaining = duration_ms.saturating_sub(self.elapsed_ms);
            let skipped = skip && matches!(step, JumpStep::Reveal { .. });
            if !skipped && budget < remaining {
                self.elapsed_ms += budget;
                self.on_progress(step, self.elapsed_ms as f32 / duration_ms as f32, &mut events);
                break;
            }

            if !skipped {
                budget -= remaining;
            }
            self.on_progress(step, 1.0, &mut events);
            self.on_complete(step, &mut events);
            self.steps.pop_front();
            self.elapsed_ms = 0;
            self.entered = false;
        }

        events
    }

    fn on_enter(&self, step: JumpStep, events: &mut Vec<GameEvent>) {
        match step {
            JumpStep::Flight { from, to } => events.push(GameEvent::JumpStarted { from, to }),
            JumpStep::Reveal { id, bonus, rare } => {
                events.push(GameEvent::CollectibleRevealed { id, bonus, rare })
            }
            JumpStep::Result => events.push(GameEvent::JumpResolved {
                summary: self.summary.clone(),
            }),
            JumpStep::Slide { .. } | JumpStep::Settle => {}
        }
    }

    fn on_progress(&self, step: JumpStep, t: f32, events: &mut Vec<GameEvent>) {
        match step {
            JumpStep::Flight { from, to } | JumpStep::Slide { from, to } => {
                events.push(GameEvent::CameraFollow {
                    position: from + (to - from) * t.clamp(0.0, 1.0),
                });
            }
            _ => {}
        }
    }

    fn on_complete(&self, step: JumpStep, events: &mut Vec<GameEvent>) {
        match step {
            JumpStep::Flight { to, .. } => {
                events.push(GameEvent::Landed {
                    position: to,
                    terrain: self.landing_terrain,
                });
                if self.hazard_hit && self.landing_terrain == Some(TerrainKind::Lava) {
                    events.push(GameEvent::HazardHit { position: to });
                }
            }
            JumpStep::Slide { .. } => {
                if self.hazard_hit {
                    events.push(GameEvent::HazardHit {
                        position: self.final_position,
                    });
                }
            }
            _ => {}
        }
    }
}
