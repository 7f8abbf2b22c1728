//! Fixed timestep simulation tick
//!
//! Core game loop that advances the meadow by one step.

use super::collision::collides;
use super::state::{GamePhase, GameState};
use crate::settings::HazardPenalty;

/// Sampled input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump held (repeats while grounded)
    pub jump: bool,
    /// Horizontal drag distance from where the drag began, while dragging
    pub drag: Option<f32>,
    /// One-shot jump from a tap away from the butterfly
    pub tap_jump: bool,
}

/// Hit flash fades over roughly a third of a second
const HIT_FLASH_DECAY: f32 = 0.85;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    state.hit_flash *= HIT_FLASH_DECAY;
    if state.hit_flash < 0.01 {
        state.hit_flash = 0.0;
    }

    for cloud in &mut state.clouds {
        cloud.update(state.world);
    }

    // Bees move first and are checked against the butterfly's previous spot.
    // A contact is new when that bee was clear of the butterfly last check.
    state.bee_contact.resize(state.bees.len(), false);
    for i in 0..state.bees.len() {
        state.bees[i].update();
        let touching = collides(&state.player, &state.bees[i]);
        let first_contact = touching && !state.bee_contact[i];
        state.bee_contact[i] = touching;
        let penalize = match state.settings.hazard_penalty {
            HazardPenalty::PerTick => touching,
            HazardPenalty::PerContact => first_contact,
        };
        if penalize {
            state.bee_hit();
            if state.phase != GamePhase::Playing {
                return;
            }
        }
    }

    state
        .player
        .update(input, &state.tuning, state.world, &state.platforms);

    for i in 0..state.flowers.len() {
        if !state.flowers[i].collected && collides(&state.player, &state.flowers[i]) {
            state.collect_flower(i);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
    }

    for particle in &mut state.particles {
        particle.update(&state.tuning);
    }
    state.particles.retain(|p| p.is_alive());
}
