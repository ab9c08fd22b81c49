//! Data-driven game balance
//!
//! Every gameplay constant a round reads lives here. Values are fixed for the
//! duration of a round.

use serde::{Deserialize, Serialize};

/// Physics and gameplay constants for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Radius advantage one hole needs over another to swallow it
    pub eating_buffer: f32,
    /// Fraction of the remaining distance to the predator closed per second while dying
    pub swallow_rate: f32,
    /// Scale lost per second while dying
    pub shrink_rate: f32,
    /// Scale at which a dying entity snaps to zero and is removed
    pub dead_scale: f32,

    pub player_speed: f32,
    pub bot_speed: f32,
    /// Pointer offsets shorter than this leave the player at rest
    pub input_dead_zone: f32,
    /// Bots stop once this close to their target
    pub arrive_radius: f32,

    /// How far a bot can see threats and prey
    pub view_range: f32,
    /// Distance of the flee point from the bot, directly away from the threat
    pub flee_distance: f32,
    /// A wander point this close counts as reached
    pub wander_reach: f32,
    /// Per-tick chance of picking a new wander point early
    pub wander_retarget_chance: f64,

    /// Growth awarded for swallowing a hole, before the share of its own growth
    pub hole_base_reward: f32,
    /// Share of the prey hole's growth added to the reward
    pub hole_reward_share: f32,
    /// Base consume value of a hole; its growth is added on top
    pub hole_base_value: f32,

    /// Longest frame the simulation integrates in one tick (seconds)
    pub max_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            eating_buffer: 2.0,
            swallow_rate: 5.0,
            shrink_rate: 2.0,
            dead_scale: 0.05,

            player_speed: 250.0,
            bot_speed: 180.0,
            input_dead_zone: 10.0,
            arrive_radius: 10.0,

            view_range: 400.0,
            flee_distance: 500.0,
            wander_reach: 50.0,
            wander_retarget_chance: 0.02,

            hole_base_reward: 200.0,
            hole_reward_share: 0.5,
            hole_base_value: 100.0,

            max_dt: 0.1,
        }
    }
}

impl Tuning {
    /// Growth a predator earns for swallowing a hole with the given growth
    pub fn hole_reward(&self, prey_growth: f32) -> f32 {
        self.hole_base_reward + prey_growth * self.hole_reward_share
    }

    /// Consume value of a hole that has accumulated `growth`
    pub fn hole_value(&self, growth: f32) -> f32 {
        self.hole_base_value + growth
    }

    /// Clamp a raw frame delta to the integration limit
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_dt)
    }
}
