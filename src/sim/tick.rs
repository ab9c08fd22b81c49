//! Simulation tick
//!
//! One call advances the whole round by a single frame, in a fixed order:
//! player, then each bot (decide, then move), then dying obstacles, then
//! consumption. The host owns timing and calls [`tick`] once per frame.

use glam::Vec2;

use super::ai;
use super::collision;
use super::physics::{homing_target, integrate};
use super::state::{ConsumeEvent, EntityKind, RoundState, Snapshot};
use crate::steer_toward;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer offset from the screen center (world units)
    pub target_offset: Vec2,
    /// Demo mode - the player is steered by the bot policy
    pub autopilot: bool,
}

/// Move the entity at `index` one step, homing dying entities on their predator
fn step_entity(state: &mut RoundState, index: usize, dt: f32) {
    let bounds = state.bounds();
    let predator_pos = homing_target(&state.entities, &state.entities[index]);
    integrate(
        &mut state.entities[index],
        predator_pos,
        dt,
        bounds,
        &state.config.tuning,
    );
}

/// Advance the round by one frame of `frame_dt` seconds.
///
/// `frame_dt` is clamped to the configured maximum so a long hitch cannot
/// tunnel entities through walls or skip consumption checks.
pub fn tick(state: &mut RoundState, input: &TickInput, frame_dt: f32) -> Snapshot {
    let dt = state.config.tuning.clamp_dt(frame_dt);
    state.time_ticks += 1;

    // Player
    if let Some(p) = state.player_index() {
        if state.entities[p].is_active() {
            let offset = if input.autopilot {
                ai::autopilot_offset(state, p)
            } else {
                input.target_offset
            };
            let tuning = &state.config.tuning;
            let player = &mut state.entities[p];
            // Offset is relative to the player, so steer from the origin
            player.vel = steer_toward(Vec2::ZERO, offset, tuning.player_speed, tuning.input_dead_zone);
        }
        step_entity(state, p, dt);
    }

    // Bots decide against everyone's current positions, then move
    for i in 0..state.entities.len() {
        if state.entities[i].kind != EntityKind::Bot {
            continue;
        }
        ai::update_bot(state, i);
        step_entity(state, i, dt);
    }

    // Obstacles only move while being swallowed
    for i in 0..state.entities.len() {
        let e = &state.entities[i];
        if e.kind.is_obstacle() && e.is_dying() {
            step_entity(state, i, dt);
        }
    }

    let mut events: Vec<ConsumeEvent> = Vec::new();
    collision::resolve(state, |event| events.push(*event));

    state.snapshot(dt, events)
}
