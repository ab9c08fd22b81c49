//! Map themes
//!
//! A theme is a lookup table from obstacle size category to its stats and
//! look. Gameplay stats are shared across the stock themes; only colors and
//! labels differ.

use serde::{Deserialize, Serialize};

/// Obstacle size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl ObstacleSize {
    /// Rarest first, the order categories are drawn in
    pub const RAREST_FIRST: [ObstacleSize; 4] = [
        ObstacleSize::Huge,
        ObstacleSize::Large,
        ObstacleSize::Medium,
        ObstacleSize::Small,
    ];
}

/// Stats and look of one obstacle category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleDef {
    pub radius: f32,
    /// Growth granted to whoever swallows it
    pub value: f32,
    pub color: u32,
    /// Selection probability
    pub prob: f32,
    pub label: &'static str,
}

/// Selectable theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeKind {
    #[default]
    City,
    Candy,
    Cyber,
}

impl ThemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKind::City => "city",
            ThemeKind::Candy => "candy",
            ThemeKind::Cyber => "cyber",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "city" => Some(ThemeKind::City),
            "candy" => Some(ThemeKind::Candy),
            "cyber" => Some(ThemeKind::Cyber),
            _ => None,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        match self {
            ThemeKind::City => &CITY,
            ThemeKind::Candy => &CANDY,
            ThemeKind::Cyber => &CYBER,
        }
    }
}

/// Visual and size table for one map theme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: u32,
    pub grid: u32,
    pub small: ObstacleDef,
    pub medium: ObstacleDef,
    pub large: ObstacleDef,
    pub huge: ObstacleDef,
}

impl Theme {
    pub fn def(&self, size: ObstacleSize) -> &ObstacleDef {
        match size {
            ObstacleSize::Small => &self.small,
            ObstacleSize::Medium => &self.medium,
            ObstacleSize::Large => &self.large,
            ObstacleSize::Huge => &self.huge,
        }
    }

    /// Map a uniform draw in `[0, 1)` to a category.
    ///
    /// Categories are walked rarest first; each claims the top slice of the
    /// unit interval matching its probability (stock tables: `> 0.9` huge,
    /// `> 0.7` large, `> 0.4` medium, otherwise small).
    pub fn pick_size(&self, roll: f32) -> ObstacleSize {
        let mut cumulative = 0.0_f64;
        for size in ObstacleSize::RAREST_FIRST {
            cumulative += f64::from(self.def(size).prob);
            if roll > cutoff(cumulative) {
                return size;
            }
        }
        ObstacleSize::Small
    }

    /// Probabilities must be positive and cover the unit interval
    pub fn probabilities_valid(&self) -> bool {
        let probs = ObstacleSize::RAREST_FIRST.map(|s| self.def(s).prob);
        probs.iter().all(|p| *p > 0.0) && (probs.iter().sum::<f32>() - 1.0).abs() < 1e-4
    }
}

/// Lower edge of the slice above `cumulative`, snapped to the decimal the
/// table was written in so `0.1 + 0.2 + 0.3` cuts at exactly `0.4`
fn cutoff(cumulative: f64) -> f32 {
    (((1.0 - cumulative) * CUTOFF_PRECISION).round() / CUTOFF_PRECISION) as f32
}

const CUTOFF_PRECISION: f64 = 1e6;

const fn def(radius: f32, value: f32, color: u32, prob: f32, label: &'static str) -> ObstacleDef {
    ObstacleDef {
        radius,
        value,
        color,
        prob,
        label,
    }
}

pub static CITY: Theme = Theme {
    name: "NEON CITY",
    background: 0x1e1e24,
    grid: 0x3d3d3d,
    small: def(10.0, 5.0, 0xfca5a5, 0.4, "CONES"),
    medium: def(25.0, 15.0, 0x60a5fa, 0.3, "CARS"),
    large: def(60.0, 50.0, 0xa78bfa, 0.2, "HOUSES"),
    huge: def(120.0, 150.0, 0x34d399, 0.1, "TOWERS"),
};

pub static CANDY: Theme = Theme {
    name: "SUGAR RUSH",
    background: 0xfff1f2,
    grid: 0xfda4af,
    small: def(10.0, 5.0, 0xf43f5e, 0.4, "LOLLIPOP"),
    medium: def(25.0, 15.0, 0xd946ef, 0.3, "DONUT"),
    large: def(60.0, 50.0, 0xf59e0b, 0.2, "GINGERBREAD"),
    huge: def(120.0, 150.0, 0xec4899, 0.1, "CAKE CASTLE"),
};

pub static CYBER: Theme = Theme {
    name: "CYBERSPACE",
    background: 0x020617,
    grid: 0x1e293b,
    small: def(10.0, 5.0, 0x22c55e, 0.4, "BIT"),
    medium: def(25.0, 15.0, 0xef4444, 0.3, "BUG"),
    large: def(60.0, 50.0, 0x3b82f6, 0.2, "SERVER"),
    huge: def(120.0, 150.0, 0x8b5cf6, 0.1, "MAINFRAME"),
};
