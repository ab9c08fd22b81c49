//! Round state and core simulation types
//!
//! Everything the tick mutates lives in [`RoundState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::theme::{ObstacleSize, Theme};
use crate::settings::{ConfigError, RoundConfig};

/// Identity of an entity within a round
pub type EntityId = u32;

/// Colors for the two hole kinds (obstacles take theme colors)
pub const PLAYER_COLOR: u32 = 0x000000;
pub const BOT_OUTLINE: u32 = 0xff0055;

/// What an entity is; fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Bot,
    Obstacle(ObstacleSize),
}

impl EntityKind {
    /// Holes are the entities that move and swallow things
    pub fn is_hole(&self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Bot)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::Obstacle(_))
    }
}

/// Lifecycle: `Alive -> Dying -> Dead`, never backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Life {
    Alive,
    /// Being swallowed; shrinks while sliding toward `consumed_by`
    Dying { consumed_by: EntityId },
    Dead,
}

/// The sole mutable simulation unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Accumulated growth currency (xp / mass)
    pub growth: f32,
    /// Growth awarded to whoever swallows this entity
    pub consume_value: f32,
    /// Animation multiplier, 1 = normal size
    pub scale: f32,
    pub life: Life,
    /// Bots only: point being walked toward while idle
    pub wander_target: Option<Vec2>,
    pub label: String,
    pub color: u32,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            growth: 0.0,
            consume_value: 0.0,
            scale: 1.0,
            life: Life::Alive,
            wander_target: None,
            label: String::new(),
            color: 0,
        }
    }

    /// Alive and not being swallowed
    pub fn is_active(&self) -> bool {
        self.life == Life::Alive
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.life, Life::Dying { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.life == Life::Dead
    }

    /// Predator driving the swallow animation, if any
    pub fn consumed_by(&self) -> Option<EntityId> {
        match self.life {
            Life::Dying { consumed_by } => Some(consumed_by),
            _ => None,
        }
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.pos.distance(other.pos)
    }
}

/// One swallow, reported to scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumeEvent {
    pub predator: EntityId,
    pub prey: EntityId,
    pub prey_kind: EntityKind,
    /// Growth the predator gained
    pub reward: f32,
}

/// Read-only view of one entity for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    pub scale: f32,
    pub color: u32,
    pub label: String,
    pub life: Life,
}

/// Everything the renderer and HUD need after a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Camera focal point (player position)
    pub camera: Vec2,
    /// Zoom the camera should ease toward for the player's size
    pub target_zoom: f32,
    /// Integration step actually used
    pub dt: f32,
    /// Non-dead entities
    pub entities: Vec<EntityView>,
    /// Swallows that happened during the tick
    pub events: Vec<ConsumeEvent>,
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub config: RoundConfig,
    pub seed: u64,
    pub rng: Pcg32,
    /// All entities, sorted by id. Index 0 is the player.
    pub entities: Vec<Entity>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: EntityId,
}

impl RoundState {
    /// Validate the config and populate the world
    pub fn new(config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self::empty(config, seed);
        super::spawn::populate(&mut state);
        Ok(state)
    }

    /// A round with no entities, for hand-built scenarios
    pub fn empty(config: RoundConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            entities: Vec::new(),
            time_ticks: 0,
            next_id: 0,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an entity built by the caller, keeping the table sorted
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        entity.id = self.next_entity_id();
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn theme(&self) -> &'static Theme {
        self.config.theme.theme()
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.map_width, self.config.map_height)
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == EntityKind::Player)
    }

    pub fn player_index(&self) -> Option<usize> {
        self.entities.iter().position(|e| e.kind == EntityKind::Player)
    }

    pub fn holes(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_hole())
    }

    /// Zoom for a hole of `radius`: 1 at the start size, bottoming out at 0.35
    pub fn zoom_for(&self, radius: f32) -> f32 {
        let base = self.config.tiers.base_radius();
        (1.0 / (1.0 + (radius - base) / 300.0)).max(0.35)
    }

    /// Renderer view of the current state
    pub fn snapshot(&self, dt: f32, events: Vec<ConsumeEvent>) -> Snapshot {
        let player = self.player();
        Snapshot {
            camera: player.map_or(self.bounds() / 2.0, |p| p.pos),
            target_zoom: player.map_or(1.0, |p| self.zoom_for(p.radius)),
            dt,
            entities: self
                .entities
                .iter()
                .filter(|e| !e.is_dead())
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos,
                    radius: e.radius,
                    scale: e.scale,
                    color: e.color,
                    label: e.label.clone(),
                    life: e.life,
                })
                .collect(),
            events,
        }
    }
}
