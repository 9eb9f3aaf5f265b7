//! Game state and core simulation types
//!
//! The whole session lives in one [`GameState`] owned by the game; nothing
//! here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::FruitKind;
use super::collision::Aabb;
use crate::assets::AssetId;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never started
    Idle,
    /// Active gameplay
    Active,
    /// Out of lives; only a restart leaves this phase
    Over,
}

/// Cosmetic background level derived from score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundTier {
    Level1,
    Level2,
    Level3,
}

impl BackgroundTier {
    pub fn for_score(score: u32, tuning: &Tuning) -> Self {
        if score >= tuning.tier_3_score {
            BackgroundTier::Level3
        } else if score >= tuning.tier_2_score {
            BackgroundTier::Level2
        } else {
            BackgroundTier::Level1
        }
    }

    /// CSS class applied to the canvas
    pub fn css_class(self) -> &'static str {
        match self {
            BackgroundTier::Level1 => "bg-level-1",
            BackgroundTier::Level2 => "bg-level-2",
            BackgroundTier::Level3 => "bg-level-3",
        }
    }
}

/// Logical (CSS pixel) size of the play surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// The player's basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (px/s) for key-driven movement
    pub speed: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub bottom_margin: f32,
}

impl Basket {
    /// Basket centred horizontally and anchored to the bottom of `field`
    pub fn new(tuning: &Tuning, field: &Playfield) -> Self {
        let mut basket = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.basket_width, tuning.basket_height),
            speed: tuning.basket_speed,
            margin_left: tuning.basket_margin_left,
            margin_right: tuning.basket_margin_right,
            bottom_margin: tuning.basket_bottom_margin,
        };
        basket.pos.x = field.width / 2.0 - basket.size.x / 2.0;
        basket.anchor(field);
        basket
    }

    /// Smallest and largest legal x for this playfield
    ///
    /// When the field is narrower than the basket plus margins the range is
    /// empty and [`Basket::clamp`] pins the basket to the left margin.
    pub fn x_range(&self, field: &Playfield) -> (f32, f32) {
        (
            self.margin_left,
            field.width - self.size.x - self.margin_right,
        )
    }

    /// Clamp x into the playfield margins (call after every write)
    pub fn clamp(&mut self, field: &Playfield) {
        let (min_x, max_x) = self.x_range(field);
        self.pos.x = self.pos.x.min(max_x).max(min_x);
    }

    /// Re-anchor to the bottom edge after a resize
    pub fn anchor(&mut self, field: &Playfield) {
        self.pos.y = field.height - (self.size.y + self.bottom_margin);
        self.clamp(field);
    }

    /// Centre the basket on a horizontal coordinate
    pub fn center_on(&mut self, x: f32, field: &Playfield) {
        self.pos.x = x - self.size.x / 2.0;
        self.clamp(field);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A falling fruit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub id: u32,
    pub kind: FruitKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Side length of the square sprite
    pub size: f32,
    /// Pixels per second
    pub fall_speed: f32,
    pub value: u32,
    pub frame_index: u32,
    /// Milliseconds spent on the current frame
    pub frame_timer: f32,
    pub frames: u32,
    /// Shared sprite; many fruit reference the same asset
    pub asset: AssetId,
}

impl Fruit {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    /// Advance the spritesheet animation by `dt_ms`
    pub fn animate(&mut self, dt_ms: f32, frame_duration_ms: f32) {
        self.frame_timer += dt_ms;
        if self.frame_timer > frame_duration_ms {
            self.frame_index = (self.frame_index + 1) % self.frames.max(1);
            self.frame_timer = 0.0;
        }
    }
}

/// Notable things that happened during a tick or lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    FruitSpawned { id: u32, kind: FruitKind },
    FruitCaught { id: u32, kind: FruitKind, value: u32 },
    FruitMissed { id: u32, kind: FruitKind },
    ScoreChanged(u32),
    LivesChanged(u32),
    SpawnIntervalChanged(f32),
    TierChanged(BackgroundTier),
    GameOver { final_score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub basket: Basket,
    /// Active fruit in insertion order
    pub fruits: Vec<Fruit>,
    /// Milliseconds since the last spawn
    pub spawn_timer: f32,
    /// Milliseconds between spawns
    pub spawn_interval: f32,
    /// Milliseconds since the last difficulty step
    pub difficulty_timer: f32,
    pub tier: BackgroundTier,
    /// Seed the RNG was last initialised from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session
    pub fn new(seed: u64, tuning: Tuning, playfield: Playfield) -> Self {
        let basket = Basket::new(&tuning, &playfield);
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: tuning.starting_lives,
            basket,
            fruits: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval: tuning.initial_spawn_interval_ms,
            difficulty_timer: 0.0,
            tier: BackgroundTier::Level1,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
            tuning,
            playfield,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Update logical canvas size; re-anchors the basket
    pub fn resize(&mut self, playfield: Playfield) {
        self.playfield = playfield;
        self.basket.anchor(&self.playfield);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
