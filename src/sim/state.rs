//! Game timer, score and session history
//!
//! A game runs for a fixed time; when it ends (timeout or the player
//! stopping it) its score is appended to the session history. History is
//! kept for the life of the process only.

use serde::{Deserialize, Serialize};

use super::aim::AimVector;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Timeout,
    Stopped,
}

/// Things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    GameOver { score: u32, reason: GameOverReason },
    BackboardToggled { paused: bool },
    ThrowLaunched { aim: AimVector },
    /// Aim arrived while a throw was already in flight
    AimIgnored,
    ThrowResolved { scored: bool },
}

/// Game and session state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// A game is running
    pub ongoing: bool,
    /// Seconds left in the running game
    pub time_left: f32,
    /// Baskets in the running (or last) game
    pub score: u32,
    /// Final scores of finished games, oldest first
    session_scores: Vec<u32>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start/stop trigger
    pub fn toggle(&mut self, game_time: f32) -> GameEvent {
        if self.ongoing {
            self.finish(GameOverReason::Stopped)
        } else {
            self.start(game_time)
        }
    }

    fn start(&mut self, game_time: f32) -> GameEvent {
        self.ongoing = true;
        self.score = 0;
        self.time_left = game_time;
        log::info!("Game started ({}s)", game_time);
        GameEvent::GameStarted
    }

    /// End the running game and record its score
    fn finish(&mut self, reason: GameOverReason) -> GameEvent {
        debug_assert!(self.ongoing);
        self.ongoing = false;
        self.time_left = self.time_left.max(0.0);
        self.session_scores.push(self.score);
        log::info!(
            "Game over ({:?}): score {} (high {}, games {})",
            reason,
            self.score,
            self.high_score(),
            self.games_played()
        );
        GameEvent::GameOver {
            score: self.score,
            reason,
        }
    }

    /// Count down; ends the game once time is up
    pub fn tick(&mut self, dt: f32) -> Option<GameEvent> {
        if !self.ongoing {
            return None;
        }
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            Some(self.finish(GameOverReason::Timeout))
        } else {
            None
        }
    }

    /// Credit a basket (only while a game is running)
    pub fn record_basket(&mut self) {
        if self.ongoing {
            self.score += 1;
        }
    }

    pub fn session_scores(&self) -> &[u32] {
        &self.session_scores
    }

    /// Score of the most recent finished game
    pub fn last_score(&self) -> u32 {
        self.session_scores.last().copied().unwrap_or(0)
    }

    /// Best finished game this session
    pub fn high_score(&self) -> u32 {
        self.session_scores.iter().copied().max().unwrap_or(0)
    }

    pub fn games_played(&self) -> usize {
        self.session_scores.len()
    }
}
