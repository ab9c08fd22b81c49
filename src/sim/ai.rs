//! Bot decision making
//!
//! Every tick each active bot re-picks what to do from scratch, in priority
//! order: flee the nearest bigger hole in view, else chase the nearest smaller
//! hole (or, failing that, the nearest swallowable obstacle), else wander.
//! Only the wander point survives between ticks.

use glam::Vec2;
use rand::Rng;

use super::spawn::random_point;
use super::state::{Entity, EntityId, RoundState};
use crate::steer_toward;
use crate::tuning::Tuning;

/// What a hole decided to do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Flee { threat: EntityId },
    Chase { target: EntityId },
    Wander,
}

/// Outcome of one decision: the intent, the point to head for, and the
/// (possibly refreshed) wander point to keep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub intent: Intent,
    pub target: Vec2,
    pub wander_target: Option<Vec2>,
}

/// Nearest entity passing `pred` within `range` of `me`; first one wins ties
fn nearest<'a>(
    me: &Entity,
    candidates: impl Iterator<Item = &'a Entity>,
    range: f32,
    pred: impl Fn(&Entity) -> bool,
) -> Option<&'a Entity> {
    let mut best: Option<(&Entity, f32)> = None;
    for other in candidates {
        let dist = me.distance_to(other);
        if dist > range || !pred(other) {
            continue;
        }
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((other, dist));
        }
    }
    best.map(|(e, _)| e)
}

/// Pick flee / chase / wander for `entities[me]` from what it can see
pub fn select_intent(entities: &[Entity], me: usize, tuning: &Tuning) -> Intent {
    let this = &entities[me];
    let buffer = tuning.eating_buffer;
    let others = move || {
        entities
            .iter()
            .filter(move |e| e.id != this.id && e.is_active())
    };

    let threat = nearest(this, others().filter(|e| e.kind.is_hole()), tuning.view_range, |e| {
        e.radius > this.radius + buffer
    });
    if let Some(threat) = threat {
        return Intent::Flee { threat: threat.id };
    }

    let prey = nearest(this, others().filter(|e| e.kind.is_hole()), tuning.view_range, |e| {
        e.radius < this.radius - buffer
    })
    .or_else(|| {
        nearest(this, others().filter(|e| e.kind.is_obstacle()), tuning.view_range, |e| {
            this.radius > e.radius
        })
    });
    match prey {
        Some(prey) => Intent::Chase { target: prey.id },
        None => Intent::Wander,
    }
}

/// Full decision for `entities[me]`, including the wander point refresh
pub fn decide<R: Rng>(
    entities: &[Entity],
    me: usize,
    tuning: &Tuning,
    bounds: Vec2,
    margin: f32,
    rng: &mut R,
) -> Decision {
    let this = &entities[me];
    let find = |id: EntityId| entities.iter().find(|e| e.id == id);
    let mut wander_target = this.wander_target;

    let intent = select_intent(entities, me, tuning);
    let target = match intent {
        Intent::Flee { threat } => {
            let away = find(threat).map_or(Vec2::ZERO, |t| this.pos - t.pos);
            if away.length_squared() > 0.0 {
                // May land outside the map; integration clamps
                this.pos + away.normalize() * tuning.flee_distance
            } else {
                wander_target.unwrap_or(this.pos)
            }
        }
        Intent::Chase { target } => find(target).map_or(this.pos, |t| t.pos),
        Intent::Wander => match wander_target {
            Some(point) => {
                let reached = point.distance(this.pos) < tuning.wander_reach;
                if reached || rng.random_bool(tuning.wander_retarget_chance) {
                    let fresh = random_point(rng, bounds, margin);
                    log::debug!("hole {} wanders to {:?}", this.id, fresh);
                    wander_target = Some(fresh);
                    fresh
                } else {
                    point
                }
            }
            None => {
                let center = bounds / 2.0;
                wander_target = Some(center);
                center
            }
        },
    };

    Decision {
        intent,
        target,
        wander_target,
    }
}

/// Recompute the velocity of the bot at `index`; inactive entities are skipped
pub fn update_bot(state: &mut RoundState, index: usize) {
    if !state.entities[index].is_active() {
        return;
    }
    let tuning = &state.config.tuning;
    let bounds = Vec2::new(state.config.map_width, state.config.map_height);
    let decision = decide(
        &state.entities,
        index,
        tuning,
        bounds,
        state.config.border_margin,
        &mut state.rng,
    );

    let bot = &mut state.entities[index];
    bot.wander_target = decision.wander_target;
    bot.vel = steer_toward(bot.pos, decision.target, tuning.bot_speed, tuning.arrive_radius);
}

/// Pointer offset that steers the player with the bot policy (demo mode)
pub fn autopilot_offset(state: &mut RoundState, index: usize) -> Vec2 {
    if !state.entities[index].is_active() {
        return Vec2::ZERO;
    }
    let bounds = Vec2::new(state.config.map_width, state.config.map_height);
    let decision = decide(
        &state.entities,
        index,
        &state.config.tuning,
        bounds,
        state.config.border_margin,
        &mut state.rng,
    );
    let player = &mut state.entities[index];
    player.wander_target = decision.wander_target;
    decision.target - player.pos
}
