//! Scoring and final standings
//!
//! Score and kills belong to the host, not the simulation: the scoreboard only
//! listens to consumption events for the player.

use serde::{Deserialize, Serialize};

use crate::consts::DEAD_PLAYER_RANK;
use crate::sim::{ConsumeEvent, EntityId, EntityKind, RoundState};

/// End-of-round summary handed to the commentary collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub score: u64,
    pub kills: u32,
    /// Growth accumulated by the player, floored
    pub max_size: u64,
    /// 1-based; [`DEAD_PLAYER_RANK`] if the player was swallowed
    pub rank: u32,
}

impl PlayerStats {
    /// Won means first place and still alive
    pub fn won(&self) -> bool {
        self.rank == 1
    }

    /// Objects consumed, as the announcer counts them
    pub fn objects_consumed(&self) -> u64 {
        self.score / 10
    }
}

/// Running score for one hole
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub kills: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `event` if `owner` was the predator
    pub fn record(&mut self, owner: EntityId, event: &ConsumeEvent) {
        if event.predator != owner {
            return;
        }
        self.score += event.reward.max(0.0).floor() as u64;
        if event.prey_kind == EntityKind::Bot {
            self.kills += 1;
        }
    }
}

/// Player's 1-based position among all holes ordered by radius, largest first.
///
/// Ties keep id order. A player still being swallowed keeps its place; once it
/// is fully dead the rank is [`DEAD_PLAYER_RANK`].
pub fn player_rank(state: &RoundState) -> u32 {
    let Some(player) = state.player() else {
        return DEAD_PLAYER_RANK;
    };
    if player.is_dead() {
        return DEAD_PLAYER_RANK;
    }
    let mut holes: Vec<_> = state.holes().collect();
    holes.sort_by(|a, b| b.radius.total_cmp(&a.radius));
    holes
        .iter()
        .position(|e| e.id == player.id)
        .map_or(DEAD_PLAYER_RANK, |i| i as u32 + 1)
}

/// Summarize the round for the player
pub fn final_stats(state: &RoundState, scoreboard: &Scoreboard) -> PlayerStats {
    PlayerStats {
        score: scoreboard.score,
        kills: scoreboard.kills,
        max_size: state.player().map_or(0, |p| p.growth.max(0.0).floor() as u64),
        rank: player_rank(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RoundConfig;
    use crate::sim::{Entity, Life, ObstacleSize};
    use glam::Vec2;

    fn event(predator: EntityId, prey_kind: EntityKind, reward: f32) -> ConsumeEvent {
        ConsumeEvent {
            predator,
            prey: 9,
            prey_kind,
            reward,
        }
    }

    #[test]
    fn test_scoreboard_counts_only_owner() {
        let mut board = Scoreboard::new();
        board.record(0, &event(0, EntityKind::Obstacle(ObstacleSize::Small), 5.0));
        board.record(0, &event(0, EntityKind::Bot, 250.5));
        board.record(0, &event(3, EntityKind::Bot, 200.0));
        assert_eq!(board.score, 255);
        assert_eq!(board.kills, 1);
    }

    fn round_with_radii(player: f32, bots: &[f32]) -> RoundState {
        let mut state = RoundState::empty(RoundConfig::default(), 0);
        state.insert(Entity::new(0, EntityKind::Player, Vec2::new(500.0, 500.0), player));
        for r in bots {
            state.insert(Entity::new(0, EntityKind::Bot, Vec2::new(900.0, 900.0), *r));
        }
        state
    }

    #[test]
    fn test_rank_by_radius() {
        assert_eq!(player_rank(&round_with_radii(60.0, &[30.0, 40.0])), 1);
        assert_eq!(player_rank(&round_with_radii(35.0, &[30.0, 40.0])), 2);
        assert_eq!(player_rank(&round_with_radii(20.0, &[30.0, 40.0])), 3);
    }

    #[test]
    fn test_dead_player_rank() {
        let mut state = round_with_radii(60.0, &[30.0]);
        state.entities[0].life = Life::Dead;
        assert_eq!(player_rank(&state), DEAD_PLAYER_RANK);
        let stats = final_stats(&state, &Scoreboard::new());
        assert!(!stats.won());
    }

    #[test]
    fn test_dying_player_keeps_rank() {
        let mut state = round_with_radii(35.0, &[30.0, 40.0]);
        state.entities[0].life = Life::Dying { consumed_by: 2 };
        assert_eq!(player_rank(&state), 2);
    }

    #[test]
    fn test_final_stats() {
        let mut state = round_with_radii(60.0, &[30.0]);
        state.entities[0].growth = 123.7;
        let board = Scoreboard { score: 321, kills: 2 };
        let stats = final_stats(&state, &board);
        assert_eq!(
            stats,
            PlayerStats {
                score: 321,
                kills: 2,
                max_size: 123,
                rank: 1
            }
        );
        assert!(stats.won());
        assert_eq!(stats.objects_consumed(), 32);
    }
}
