//! Movement integration and the swallow animation

use glam::Vec2;

use super::state::{Entity, Life};
use crate::clamp_to_bounds;
use crate::tuning::Tuning;

/// Advance one entity by `dt`.
///
/// Alive entities move by velocity and are clamped so their edge stays inside
/// `bounds`. Dying entities slide toward `predator_pos` (if the predator still
/// exists) while shrinking; at the cutoff scale they become dead with zero
/// radius. Dead entities are left untouched.
pub fn integrate(entity: &mut Entity, predator_pos: Option<Vec2>, dt: f32, bounds: Vec2, tuning: &Tuning) {
    match entity.life {
        Life::Alive => {
            entity.pos += entity.vel * dt;
            entity.pos = clamp_to_bounds(entity.pos, entity.radius, bounds);
        }
        Life::Dying { .. } => {
            if let Some(target) = predator_pos {
                entity.pos += (target - entity.pos) * tuning.swallow_rate * dt;
            }

            entity.scale -= tuning.shrink_rate * dt;
            if entity.scale <= tuning.dead_scale {
                entity.scale = 0.0;
                entity.radius = 0.0;
                entity.vel = Vec2::ZERO;
                entity.life = Life::Dead;
            }
        }
        Life::Dead => {}
    }
}

/// Where a dying entity should home: its predator, unless that predator is gone.
///
/// A dead predator leaves its prey shrinking in place.
pub fn homing_target(entities: &[Entity], entity: &Entity) -> Option<Vec2> {
    let predator_id = entity.consumed_by()?;
    entities
        .binary_search_by_key(&predator_id, |e| e.id)
        .ok()
        .map(|i| &entities[i])
        .filter(|p| !p.is_dead())
        .map(|p| p.pos)
}
