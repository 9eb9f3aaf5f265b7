//! UI overlay contract
//!
//! The DOM side of the HUD: loading indicator, game-over screen, score and
//! lives readouts, and the canvas background class.

use crate::sim::state::BackgroundTier;

/// Text shown on the game-over screen
pub fn final_score_text(score: u32) -> String {
    format!("Your score: {}", score)
}

/// Display collaborator invoked at session boundaries and on HUD changes
pub trait Overlay {
    fn set_loading_visible(&mut self, visible: bool);
    fn show_game_over(&mut self, final_score: u32);
    fn hide_game_over(&mut self);
    fn set_score(&mut self, score: u32);
    fn set_lives(&mut self, lives: u32);
    fn set_background(&mut self, tier: BackgroundTier);
}

/// Snapshot of what the overlay currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    pub loading_visible: bool,
    /// `Some(text)` while the game-over screen is shown
    pub game_over: Option<String>,
    pub score: u32,
    pub lives: u32,
    pub background: BackgroundTier,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            loading_visible: true,
            game_over: None,
            score: 0,
            lives: 0,
            background: BackgroundTier::Level1,
        }
    }
}

/// Overlay that only records state (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct HeadlessOverlay {
    pub hud: HudState,
}

impl Overlay for HeadlessOverlay {
    fn set_loading_visible(&mut self, visible: bool) {
        self.hud.loading_visible = visible;
    }

    fn show_game_over(&mut self, final_score: u32) {
        self.hud.game_over = Some(final_score_text(final_score));
    }

    fn hide_game_over(&mut self) {
        self.hud.game_over = None;
    }

    fn set_score(&mut self, score: u32) {
        self.hud.score = score;
    }

    fn set_lives(&mut self, lives: u32) {
        self.hud.lives = lives;
    }

    fn set_background(&mut self, tier: BackgroundTier) {
        self.hud.background = tier;
    }
}
