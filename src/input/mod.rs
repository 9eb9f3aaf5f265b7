//! Player input
//!
//! DOM handlers push [`InputEvent`]s into an [`InputQueue`]; the game drains
//! it once per frame and applies the events through a [`BasketController`].

pub mod controller;
pub mod queue;

pub use controller::{BasketController, Direction, HeldKeys};
pub use queue::{InputEvent, InputQueue};
