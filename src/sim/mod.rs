//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform concerns:
//! - The host supplies the frame delta and pointer offset
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)

pub mod ai;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod theme;
pub mod tick;
pub mod tier;

pub use ai::{Decision, Intent};
pub use collision::{can_eat_hole, can_eat_obstacle, resolve};
pub use physics::integrate;
pub use state::{ConsumeEvent, Entity, EntityId, EntityKind, EntityView, Life, RoundState, Snapshot};
pub use theme::{ObstacleDef, ObstacleSize, Theme, ThemeKind};
pub use tick::{TickInput, tick};
pub use tier::{NextTier, Tier, TierTable};
