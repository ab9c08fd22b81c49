//! PixelVoid - An arena game where voids swallow the map and each other
//!
//! Core modules:
//! - `sim`: Simulation (entities, physics, bot AI, consumption, tiers)
//! - `settings`: Round configuration read at round start
//! - `tuning`: Data-driven game balance
//! - `session`: Host-side round driver (timer, scoring, game over)
//! - `standings`: Final ranking and player stats
//! - `commentary`: Post-round announcer text with local fallback

pub mod commentary;
pub mod session;
pub mod settings;
pub mod sim;
pub mod standings;
pub mod tuning;

pub use session::{Session, SessionPhase};
pub use settings::{ConfigError, RoundConfig};
pub use standings::{PlayerStats, Scoreboard};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Map dimensions (world units)
    pub const MAP_WIDTH: f32 = 3000.0;
    pub const MAP_HEIGHT: f32 = 3000.0;
    /// Spawn inset from the map wall so nothing starts flush against it
    pub const BORDER_MARGIN: f32 = 100.0;

    /// Round length in seconds
    pub const ROUND_DURATION: f32 = 90.0;
    pub const BOT_COUNT: u32 = 7;
    pub const OBSTACLE_COUNT: u32 = 1000;

    /// Largest radius the tier table ever hands out
    pub const MAX_HOLE_RADIUS: f32 = 400.0;

    /// Rank reported for a player who got swallowed before time ran out
    pub const DEAD_PLAYER_RANK: u32 = 99;
}

/// Velocity of magnitude `speed` from `from` toward `to`, or zero once within `arrive_radius`
#[inline]
pub fn steer_toward(from: Vec2, to: Vec2, speed: f32, arrive_radius: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist > arrive_radius {
        delta / dist * speed
    } else {
        Vec2::ZERO
    }
}

/// Clamp a circle center so its edge stays inside `[0, bounds]` on both axes
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.max(radius).min(bounds.x - radius),
        pos.y.max(radius).min(bounds.y - radius),
    )
}
