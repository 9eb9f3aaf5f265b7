//! Simulation module
//!
//! All gameplay logic lives here. This module is pure:
//! - Elapsed-time driven (milliseconds), one evaluation per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod lifecycle;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{FruitKind, FruitSpec};
pub use collision::{Aabb, is_caught};
pub use spawn::{fall_speed, spawn_fruit};
pub use state::{BackgroundTier, Basket, Fruit, GameEvent, GamePhase, GameState, Playfield};
pub use tick::tick;
