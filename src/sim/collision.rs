//! Consumption resolution
//!
//! After movement, every active hole (player and bots, in id order) checks
//! every active obstacle and then every other active hole. A hole swallows
//! anything whose center lies inside its radius, provided it is strictly
//! bigger (obstacles) or bigger by more than the eating buffer (holes).
//!
//! Checks run against live values: a hole that grows mid-pass can swallow
//! things later in the same pass that it could not at the start of the tick.

use super::state::{ConsumeEvent, Entity, Life, RoundState};
use super::tier::TierTable;
use crate::tuning::Tuning;

/// Can `predator` swallow the obstacle `prey` right now?
pub fn can_eat_obstacle(predator: &Entity, prey: &Entity) -> bool {
    predator.distance_to(prey) < predator.radius && predator.radius > prey.radius
}

/// Can `predator` swallow the hole `prey` right now?
pub fn can_eat_hole(predator: &Entity, prey: &Entity, buffer: f32) -> bool {
    predator.distance_to(prey) < predator.radius && predator.radius > prey.radius + buffer
}

/// Start the swallow: the prey begins dying and the predator grows.
///
/// Returns the event describing the swallow.
fn consume(
    entities: &mut [Entity],
    predator: usize,
    prey: usize,
    tuning: &Tuning,
    tiers: &TierTable,
) -> ConsumeEvent {
    let predator_id = entities[predator].id;

    let victim = &mut entities[prey];
    let reward = if victim.kind.is_hole() {
        let reward = tuning.hole_reward(victim.growth);
        // Scoreboards read the prey's value, so it carries the real reward
        victim.consume_value = reward;
        reward
    } else {
        victim.consume_value
    };
    victim.life = Life::Dying {
        consumed_by: predator_id,
    };
    let event = ConsumeEvent {
        predator: predator_id,
        prey: victim.id,
        prey_kind: victim.kind,
        reward,
    };

    let eater = &mut entities[predator];
    eater.growth += reward;
    eater.radius = eater.radius.max(tiers.radius_for(eater.growth));
    if eater.kind.is_hole() {
        eater.consume_value = tuning.hole_value(eater.growth);
    }

    log::debug!(
        "{} ({}) swallowed {:?} {} for {:.0}, radius now {}",
        eater.label,
        eater.id,
        event.prey_kind,
        event.prey,
        reward,
        eater.radius
    );
    event
}

/// Resolve every swallow for this tick, calling `on_consume` for each one
pub fn resolve(state: &mut RoundState, mut on_consume: impl FnMut(&ConsumeEvent)) {
    let tuning = &state.config.tuning;
    let tiers = &state.config.tiers;
    let entities = &mut state.entities;

    let predators: Vec<usize> = entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind.is_hole() && e.is_active())
        .map(|(i, _)| i)
        .collect();

    for &p in &predators {
        for o in 0..entities.len() {
            if !entities[p].is_active() {
                break;
            }
            let prey = &entities[o];
            if !prey.kind.is_obstacle() || !prey.is_active() {
                continue;
            }
            if can_eat_obstacle(&entities[p], prey) {
                let event = consume(entities, p, o, tuning, tiers);
                on_consume(&event);
            }
        }

        for h in 0..entities.len() {
            if h == p || !entities[p].is_active() {
                continue;
            }
            let prey = &entities[h];
            if !prey.kind.is_hole() || !prey.is_active() {
                continue;
            }
            if can_eat_hole(&entities[p], prey, tuning.eating_buffer) {
                let event = consume(entities, p, h, tuning, tiers);
                on_consume(&event);
            }
        }
    }
}

/// Convenience wrapper collecting the events
pub fn resolve_collect(state: &mut RoundState) -> Vec<ConsumeEvent> {
    let mut events = Vec::new();
    resolve(state, |e| events.push(*e));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RoundConfig;
    use crate::sim::state::EntityKind;
    use crate::sim::theme::ObstacleSize;
    use glam::Vec2;
    use proptest::prelude::*;

    fn scenario(entities: Vec<(EntityKind, Vec2, f32)>) -> RoundState {
        let mut state = RoundState::empty(RoundConfig::default(), 11);
        for (kind, pos, radius) in entities {
            let mut e = Entity::new(0, kind, pos, radius);
            if let EntityKind::Obstacle(size) = kind {
                e.consume_value = state.theme().def(size).value;
            }
            state.insert(e);
        }
        state
    }

    #[test]
    fn test_predator_60_eats_obstacle_50() {
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 60.0),
            (EntityKind::Obstacle(ObstacleSize::Large), Vec2::new(1055.0, 1000.0), 50.0),
        ]);
        let events = resolve_collect(&mut state);
        assert_eq!(events.len(), 1);
        assert_eq!(state.entities[1].life, Life::Dying { consumed_by: 0 });
        assert_eq!(state.entities[0].growth, 50.0);
        assert_eq!(state.entities[0].consume_value, 150.0);
        // Radius never drops below what it was
        assert_eq!(state.entities[0].radius, 60.0);
    }

    #[test]
    fn test_obstacle_needs_strict_advantage() {
        let mut state = scenario(vec![
            (EntityKind::Bot, Vec2::new(1000.0, 1000.0), 60.0),
            (EntityKind::Obstacle(ObstacleSize::Large), Vec2::new(1010.0, 1000.0), 60.0),
        ]);
        assert!(resolve_collect(&mut state).is_empty());
        assert!(state.entities[1].is_active());
    }

    #[test]
    fn test_obstacle_must_be_inside_radius() {
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 30.0),
            (EntityKind::Obstacle(ObstacleSize::Small), Vec2::new(1030.0, 1000.0), 10.0),
        ]);
        assert!(resolve_collect(&mut state).is_empty());
    }

    #[test]
    fn test_buffer_blocks_near_equal_holes() {
        let mut state = scenario(vec![
            (EntityKind::Bot, Vec2::new(1000.0, 1000.0), 40.0),
            (EntityKind::Bot, Vec2::new(1000.0, 1000.0), 41.0),
        ]);
        assert!(resolve_collect(&mut state).is_empty());
        assert!(state.entities.iter().all(|e| e.is_active()));
    }

    #[test]
    fn test_hole_reward_and_value() {
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 75.0),
            (EntityKind::Bot, Vec2::new(1020.0, 1000.0), 40.0),
        ]);
        state.entities[0].growth = 400.0;
        state.entities[1].growth = 100.0;
        let events = resolve_collect(&mut state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reward, 250.0);
        assert_eq!(events[0].prey_kind, EntityKind::Bot);
        let player = &state.entities[0];
        assert_eq!(player.growth, 650.0);
        assert_eq!(player.consume_value, 750.0);
        assert_eq!(state.entities[1].consume_value, 250.0);
        assert_eq!(state.entities[1].life, Life::Dying { consumed_by: 0 });
    }

    #[test]
    fn test_tier_threshold_exact() {
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 30.0),
            (EntityKind::Obstacle(ObstacleSize::Medium), Vec2::new(1005.0, 1000.0), 25.0),
        ]);
        state.entities[0].growth = 35.0;
        state.entities[1].consume_value = 15.0;
        resolve_collect(&mut state);
        let player = &state.entities[0];
        assert_eq!(player.growth, 50.0);
        assert_eq!(player.radius, state.config.tiers.radius_for(50.0));
        assert_eq!(player.radius, 40.0);
    }

    #[test]
    fn test_growth_compounds_within_tick() {
        // After the first obstacle the player reaches tier 2 (radius 40),
        // which brings the second one inside reach
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 30.0),
            (EntityKind::Obstacle(ObstacleSize::Medium), Vec2::new(1010.0, 1000.0), 25.0),
            (EntityKind::Obstacle(ObstacleSize::Small), Vec2::new(1035.0, 1000.0), 10.0),
        ]);
        state.entities[0].growth = 40.0;
        let events = resolve_collect(&mut state);
        assert_eq!(events.len(), 2);
        assert!(state.entities[1].is_dying() && state.entities[2].is_dying());
    }

    #[test]
    fn test_dead_and_dying_never_eaten_twice() {
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 60.0),
            (EntityKind::Bot, Vec2::new(1010.0, 1000.0), 80.0),
            (EntityKind::Obstacle(ObstacleSize::Small), Vec2::new(1000.0, 1000.0), 10.0),
        ]);
        // The player takes the obstacle, then the bot takes the player
        let first = resolve_collect(&mut state);
        assert!(first.iter().any(|e| e.prey == 2));
        let second = resolve_collect(&mut state);
        assert!(second.is_empty());
        assert_eq!(first.iter().filter(|e| e.prey == 2).count(), 1);
    }

    #[test]
    fn test_swallowed_predator_stops_eating() {
        let mut state = scenario(vec![
            (EntityKind::Bot, Vec2::new(1000.0, 1000.0), 100.0),
            (EntityKind::Bot, Vec2::new(1010.0, 1000.0), 40.0),
        ]);
        let events = resolve_collect(&mut state);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].predator, 0);
        assert!(state.entities[0].is_active());
    }

    #[test]
    fn test_one_predator_many_prey() {
        let mut state = scenario(vec![
            (EntityKind::Player, Vec2::new(1000.0, 1000.0), 105.0),
            (EntityKind::Obstacle(ObstacleSize::Small), Vec2::new(1010.0, 1000.0), 10.0),
            (EntityKind::Obstacle(ObstacleSize::Small), Vec2::new(990.0, 1000.0), 10.0),
            (EntityKind::Obstacle(ObstacleSize::Medium), Vec2::new(1000.0, 1050.0), 25.0),
        ]);
        assert_eq!(resolve_collect(&mut state).len(), 3);
    }

    proptest! {
        #[test]
        fn prop_buffer_enforced(a in 10.0f32..200.0, delta in -2.0f32..=2.0, dist in 0.0f32..50.0) {
            let mut state = scenario(vec![
                (EntityKind::Bot, Vec2::new(1000.0, 1000.0), a),
                (EntityKind::Bot, Vec2::new(1000.0 + dist, 1000.0), (a + delta).max(1.0)),
            ]);
            prop_assume!((state.entities[0].radius - state.entities[1].radius).abs() <= 2.0);
            prop_assert!(resolve_collect(&mut state).is_empty());
        }

        #[test]
        fn prop_obstacle_not_smaller_never_eaten(r in 10.0f32..200.0, extra in 0.0f32..50.0, dist in 0.0f32..10.0) {
            let mut state = scenario(vec![
                (EntityKind::Player, Vec2::new(1000.0, 1000.0), r),
                (EntityKind::Obstacle(ObstacleSize::Huge), Vec2::new(1000.0 + dist, 1000.0), r + extra),
            ]);
            prop_assert!(resolve_collect(&mut state).is_empty());
        }
    }
}
