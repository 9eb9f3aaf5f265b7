//! Session lifecycle transitions
//!
//! `Idle -> Active` and `Over -> Active` via [`GameState::start`];
//! `Active -> Over` via [`GameState::end`].

use super::state::{BackgroundTier, GameEvent, GamePhase, GameState};

impl GameState {
    /// Reset every session value and enter the active phase
    ///
    /// The basket keeps its position; the RNG stream continues so
    /// consecutive runs differ.
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.fruits.clear();
        self.spawn_timer = 0.0;
        self.difficulty_timer = 0.0;
        self.spawn_interval = self.tuning.initial_spawn_interval_ms;
        self.tier = BackgroundTier::Level1;
        self.events.clear();
        self.phase = GamePhase::Active;

        log::info!("Session started");
        self.push_event(GameEvent::Started);
        self.push_event(GameEvent::ScoreChanged(self.score));
        self.push_event(GameEvent::LivesChanged(self.lives));
        self.push_event(GameEvent::TierChanged(self.tier));
    }

    /// Leave the active phase; entity state stays until the next start
    pub fn end(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        self.phase = GamePhase::Over;
        log::info!("Game over with score {}", self.score);
        self.push_event(GameEvent::GameOver { final_score: self.score });
    }
}
