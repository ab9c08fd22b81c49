//! World generation
//!
//! Populates a round: the player at the map center, bots scattered with the
//! starting radius, and obstacles whose category is drawn from the theme table.

use glam::Vec2;
use rand::Rng;

use super::state::{BOT_OUTLINE, Entity, EntityId, EntityKind, PLAYER_COLOR, RoundState};

const BOT_NAMES: [&str; 7] = [
    "PixelKing",
    "VoidWalker",
    "Glitch",
    "RetroRat",
    "BitMuncher",
    "CRT_Dream",
    "ArcadeFire",
];

/// Uniform point inside the map, inset by `margin` on every side
pub fn random_point<R: Rng>(rng: &mut R, bounds: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(margin..bounds.x - margin),
        rng.random_range(margin..bounds.y - margin),
    )
}

/// Create every entity of a fresh round
pub fn populate(state: &mut RoundState) {
    let bots = state.config.bot_count;
    let obstacles = state.config.obstacle_count;
    spawn_player(state);
    spawn_bots(state, bots);
    spawn_obstacles(state, obstacles);
    log::info!(
        "Round seed {}: theme {}, {} bots, {} obstacles",
        state.seed,
        state.theme().name,
        bots,
        obstacles
    );
}

pub fn spawn_player(state: &mut RoundState) -> EntityId {
    let mut player = Entity::new(
        0,
        EntityKind::Player,
        state.bounds() / 2.0,
        state.config.tiers.base_radius(),
    );
    player.consume_value = state.config.tuning.hole_value(0.0);
    player.label = "YOU".to_string();
    player.color = PLAYER_COLOR;
    state.insert(player)
}

pub fn spawn_bots(state: &mut RoundState, count: u32) {
    let bounds = state.bounds();
    let margin = state.config.border_margin;
    for i in 0..count as usize {
        let pos = random_point(&mut state.rng, bounds, margin);
        let mut bot = Entity::new(0, EntityKind::Bot, pos, state.config.tiers.base_radius());
        bot.consume_value = state.config.tuning.hole_value(0.0);
        bot.label = BOT_NAMES[i % BOT_NAMES.len()].to_string();
        bot.color = BOT_OUTLINE;
        bot.wander_target = Some(random_point(&mut state.rng, bounds, 0.0));
        state.insert(bot);
    }
}

pub fn spawn_obstacles(state: &mut RoundState, count: u32) {
    let bounds = state.bounds();
    let margin = state.config.border_margin;
    let theme = state.theme();
    for _ in 0..count {
        let size = theme.pick_size(state.rng.random::<f32>());
        let def = theme.def(size);
        let pos = random_point(&mut state.rng, bounds, margin);
        let mut obstacle = Entity::new(0, EntityKind::Obstacle(size), pos, def.radius);
        obstacle.consume_value = def.value;
        obstacle.color = def.color;
        obstacle.label = def.label.to_string();
        state.insert(obstacle);
    }
}
