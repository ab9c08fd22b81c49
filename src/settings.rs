//! Round configuration
//!
//! Supplied by the host and read once at round start. Malformed values are a
//! setup error: [`RoundConfig::validate`] rejects them before any entity exists.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::theme::ThemeKind;
use crate::sim::tier::{TierTable, TierTableError};
use crate::tuning::Tuning;

/// Why a round could not be set up
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("bot count must be at least 1")]
    NoBots,
    #[error("obstacle count must be at least 1")]
    NoObstacles,
    #[error("map {width}x{height} is too small for a {margin} border margin")]
    MapTooSmall { width: f32, height: f32, margin: f32 },
    #[error("round duration must be positive, got {0}")]
    RoundDuration(f32),
    #[error("max dt must be positive, got {0}")]
    MaxDt(f32),
    #[error("eating buffer must not be negative, got {0}")]
    EatingBuffer(f32),
    #[error("wander retarget chance must be within [0, 1], got {0}")]
    WanderRetargetChance(f64),
    #[error("shrink rate must be positive, got {0}")]
    ShrinkRate(f32),
    #[error("dead scale must be within [0, 1), got {0}")]
    DeadScale(f32),
    #[error("swallow rate {rate} overshoots the predator with a {max_dt}s step")]
    SwallowRate { rate: f32, max_dt: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("theme {0} has obstacle probabilities that do not sum to 1")]
    ThemeProbabilities(&'static str),
    #[error("invalid tier table: {0}")]
    Tiers(#[from] TierTableError),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host-supplied settings for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub map_width: f32,
    pub map_height: f32,
    /// Round length in seconds
    pub round_duration: f32,
    pub bot_count: u32,
    pub obstacle_count: u32,
    /// Spawn inset from the walls
    pub border_margin: f32,
    pub theme: ThemeKind,
    pub tuning: Tuning,
    pub tiers: TierTable,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            round_duration: ROUND_DURATION,
            bot_count: BOT_COUNT,
            obstacle_count: OBSTACLE_COUNT,
            border_margin: BORDER_MARGIN,
            theme: ThemeKind::default(),
            tuning: Tuning::default(),
            tiers: TierTable::default(),
        }
    }
}

impl RoundConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_count == 0 {
            return Err(ConfigError::NoBots);
        }
        if self.obstacle_count == 0 {
            return Err(ConfigError::NoObstacles);
        }
        if self.border_margin < 0.0
            || self.map_width <= self.border_margin * 2.0
            || self.map_height <= self.border_margin * 2.0
        {
            return Err(ConfigError::MapTooSmall {
                width: self.map_width,
                height: self.map_height,
                margin: self.border_margin,
            });
        }
        if !(self.round_duration > 0.0) {
            return Err(ConfigError::RoundDuration(self.round_duration));
        }
        self.validate_tuning()?;
        let theme = self.theme.theme();
        if !theme.probabilities_valid() {
            return Err(ConfigError::ThemeProbabilities(theme.name));
        }
        self.tiers.validate()?;
        Ok(())
    }

    fn validate_tuning(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        if !(t.max_dt > 0.0) {
            return Err(ConfigError::MaxDt(t.max_dt));
        }
        if !(t.eating_buffer >= 0.0) {
            return Err(ConfigError::EatingBuffer(t.eating_buffer));
        }
        if !(0.0..=1.0).contains(&t.wander_retarget_chance) {
            return Err(ConfigError::WanderRetargetChance(t.wander_retarget_chance));
        }
        if !(t.shrink_rate > 0.0) {
            return Err(ConfigError::ShrinkRate(t.shrink_rate));
        }
        if !(0.0..1.0).contains(&t.dead_scale) {
            return Err(ConfigError::DeadScale(t.dead_scale));
        }
        // A dying entity closes at most the whole gap in one step
        if !(0.0..=1.0).contains(&(t.swallow_rate * t.max_dt)) {
            return Err(ConfigError::SwallowRate {
                rate: t.swallow_rate,
                max_dt: t.max_dt,
            });
        }
        for (name, value) in [
            ("player speed", t.player_speed),
            ("bot speed", t.bot_speed),
            ("view range", t.view_range),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
