//! Fruit Catch - a falling-fruit arcade game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, physics, collisions, session state)
//! - `input`: Input event queue and basket control
//! - `assets`: Sprite readiness registry and transparency keying
//! - `renderer`: Backend-agnostic draw lists with placeholder fallbacks
//! - `ui`: Overlay contract (HUD, loading, game over)
//! - `driver`: Frame clock and tick fault isolation
//! - `game`: Ties the above together behind one serialized entry point
//! - `platform`: Browser bindings (wasm32 only)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod driver;
pub mod game;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canonical input step, independent of the real frame rate
    pub const CONTROL_DT: f32 = 1.0 / 60.0;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const INITIAL_SPAWN_INTERVAL_MS: f32 = 900.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 300.0;
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 80.0;
    pub const DIFFICULTY_PERIOD_MS: f32 = 8000.0;

    /// Sprite animation: frames alternate every 500ms
    pub const FRAME_DURATION_MS: f32 = 500.0;

    /// Fruit is missed once it falls this far past the bottom edge
    pub const MISS_MARGIN: f32 = 40.0;

    /// Fruit size range (square side, px)
    pub const FRUIT_MIN_SIZE: f32 = 96.0;
    pub const FRUIT_SIZE_RANGE: f32 = 80.0;
    /// Minimum distance from the left/right edges when spawning
    pub const SPAWN_MARGIN: f32 = 16.0;

    /// Fall speed: (BASE + U(0,RANGE)) * (value/DIVISOR) + min(score*BONUS, CAP)
    pub const FALL_BASE: f32 = 80.0;
    pub const FALL_RANGE: f32 = 120.0;
    pub const FALL_VALUE_DIVISOR: f32 = 3.0;
    pub const FALL_SCORE_BONUS: f32 = 0.5;
    pub const FALL_SCORE_BONUS_CAP: f32 = 200.0;
    /// Multiplier: 1 + min(score/DIVISOR, CAP)
    pub const SPEED_SCORE_DIVISOR: f32 = 40.0;
    pub const SPEED_MULTIPLIER_CAP: f32 = 4.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 140.0;
    pub const BASKET_HEIGHT: f32 = 100.0;
    pub const BASKET_SPEED: f32 = 700.0;
    pub const BASKET_MARGIN_X: f32 = 8.0;
    pub const BASKET_BOTTOM_MARGIN: f32 = 20.0;

    /// Background tier score thresholds
    pub const TIER_2_SCORE: u32 = 25;
    pub const TIER_3_SCORE: u32 = 50;

    /// Default playfield before the first resize (HTML canvas default size)
    pub const DEFAULT_CANVAS_WIDTH: f32 = 300.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 150.0;
}
