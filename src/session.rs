//! Host-side round driver
//!
//! Owns everything the simulation deliberately does not: the round timer, the
//! player's score, camera zoom smoothing, and deciding when the round is over.

use crate::settings::{ConfigError, RoundConfig};
use crate::sim::{RoundState, Snapshot, TickInput, tick};
use crate::standings::{PlayerStats, Scoreboard, final_stats};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    /// Round finished; `won` means first place and alive at the end
    GameOver { won: bool },
}

/// One round from spawn to game over
#[derive(Debug, Clone)]
pub struct Session {
    pub round: RoundState,
    pub scoreboard: Scoreboard,
    pub phase: SessionPhase,
    /// Seconds remaining
    pub time_left: f32,
    /// Smoothed camera zoom
    pub zoom: f32,
}

impl Session {
    pub fn new(config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        let time_left = config.round_duration;
        let round = RoundState::new(config, seed)?;
        Ok(Self {
            round,
            scoreboard: Scoreboard::new(),
            phase: SessionPhase::Playing,
            time_left,
            zoom: 1.0,
        })
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::GameOver { .. })
    }

    /// Run one frame. Returns `None` once the round has ended.
    pub fn advance(&mut self, input: &TickInput, frame_dt: f32) -> Option<Snapshot> {
        if self.is_over() {
            return None;
        }

        let snapshot = tick(&mut self.round, input, frame_dt);
        let dt = snapshot.dt;

        if let Some(player) = self.round.player() {
            let id = player.id;
            for event in &snapshot.events {
                self.scoreboard.record(id, event);
            }
        }
        self.zoom += (snapshot.target_zoom - self.zoom) * (dt * 2.0).min(1.0);

        self.time_left = (self.time_left - dt).max(0.0);
        let player_gone = self.round.player().is_none_or(|p| p.is_dead());
        if self.time_left <= 0.0 || player_gone {
            self.finish();
        }
        Some(snapshot)
    }

    fn finish(&mut self) {
        let stats = self.stats();
        let won = stats.won();
        self.phase = SessionPhase::GameOver { won };
        log::info!(
            "Round over after {} ticks: rank {}, score {}, kills {}, size {}{}",
            self.round.time_ticks,
            stats.rank,
            stats.score,
            stats.kills,
            stats.max_size,
            if won { " - VICTORY" } else { "" }
        );
    }

    /// Player summary; final once the session is over
    pub fn stats(&self) -> PlayerStats {
        final_stats(&self.round, &self.scoreboard)
    }
}
