//! Fruit spawning
//!
//! Kind and size are independent rolls; fall speed scales with both the
//! fruit's value and the current score.

use glam::Vec2;
use rand::Rng;

use super::catalog::FruitKind;
use super::state::{Fruit, Playfield};
use crate::assets::AssetId;
use crate::tuning::Tuning;

/// Fall speed in px/s for a fruit of `value` at `score`
///
/// `roll` is a uniform sample in `[0, 1)`.
pub fn fall_speed(roll: f32, value: u32, score: u32, tuning: &Tuning) -> f32 {
    let base = (tuning.fall_base + roll * tuning.fall_range)
        * (value as f32 / tuning.fall_value_divisor)
        + tuning.score_speed_bonus(score);
    base * tuning.speed_multiplier(score)
}

/// Create a new fruit just above the visible area
///
/// The caller assigns the entity ID and inserts it into the store.
pub fn spawn_fruit<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    score: u32,
    field: &Playfield,
    tuning: &Tuning,
) -> Fruit {
    let kind = FruitKind::ALL[rng.random_range(0..FruitKind::ALL.len())];
    let spec = kind.spec();

    let size = tuning.fruit_min_size + rng.random::<f32>() * tuning.fruit_size_range;
    let x = (rng.random::<f32>() * (field.width - tuning.spawn_margin - size))
        .max(tuning.spawn_margin);
    let speed = fall_speed(rng.random::<f32>(), spec.value, score, tuning);

    Fruit {
        id,
        kind,
        pos: Vec2::new(x, -size),
        size,
        fall_speed: speed,
        value: spec.value,
        frame_index: 0,
        frame_timer: 0.0,
        frames: spec.frames,
        asset: AssetId::Fruit(kind),
    }
}
