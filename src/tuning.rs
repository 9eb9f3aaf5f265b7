//! Game balance tuning
//!
//! Every number the simulation reads comes from here. Defaults mirror
//! [`crate::consts`]; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    pub starting_lives: u32,
    pub initial_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    pub spawn_interval_step_ms: f32,
    pub difficulty_period_ms: f32,

    // === Fruit ===
    pub frame_duration_ms: f32,
    pub miss_margin: f32,
    pub fruit_min_size: f32,
    pub fruit_size_range: f32,
    pub spawn_margin: f32,

    // === Fall speed ===
    pub fall_base: f32,
    pub fall_range: f32,
    pub fall_value_divisor: f32,
    pub fall_score_bonus: f32,
    pub fall_score_bonus_cap: f32,
    pub speed_score_divisor: f32,
    pub speed_multiplier_cap: f32,

    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,
    pub basket_speed: f32,
    pub basket_margin_left: f32,
    pub basket_margin_right: f32,
    pub basket_bottom_margin: f32,
    /// Key-driven movement step in seconds
    pub control_dt: f32,

    // === Cosmetic ===
    pub tier_2_score: u32,
    pub tier_3_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            difficulty_period_ms: DIFFICULTY_PERIOD_MS,

            frame_duration_ms: FRAME_DURATION_MS,
            miss_margin: MISS_MARGIN,
            fruit_min_size: FRUIT_MIN_SIZE,
            fruit_size_range: FRUIT_SIZE_RANGE,
            spawn_margin: SPAWN_MARGIN,

            fall_base: FALL_BASE,
            fall_range: FALL_RANGE,
            fall_value_divisor: FALL_VALUE_DIVISOR,
            fall_score_bonus: FALL_SCORE_BONUS,
            fall_score_bonus_cap: FALL_SCORE_BONUS_CAP,
            speed_score_divisor: SPEED_SCORE_DIVISOR,
            speed_multiplier_cap: SPEED_MULTIPLIER_CAP,

            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_speed: BASKET_SPEED,
            basket_margin_left: BASKET_MARGIN_X,
            basket_margin_right: BASKET_MARGIN_X,
            basket_bottom_margin: BASKET_BOTTOM_MARGIN,
            control_dt: CONTROL_DT,

            tier_2_score: TIER_2_SCORE,
            tier_3_score: TIER_3_SCORE,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if !(self.min_spawn_interval_ms > 0.0) {
            return invalid("min_spawn_interval_ms", "must be positive");
        }
        if self.initial_spawn_interval_ms < self.min_spawn_interval_ms {
            return invalid(
                "initial_spawn_interval_ms",
                "must not be below min_spawn_interval_ms",
            );
        }
        if self.spawn_interval_step_ms < 0.0 {
            return invalid("spawn_interval_step_ms", "must not be negative");
        }
        if !(self.difficulty_period_ms > 0.0) {
            return invalid("difficulty_period_ms", "must be positive");
        }
        if !(self.frame_duration_ms > 0.0) {
            return invalid("frame_duration_ms", "must be positive");
        }
        if !(self.fruit_min_size > 0.0) || self.fruit_size_range < 0.0 {
            return invalid("fruit_min_size", "fruit sizes must be positive");
        }
        if !(self.fall_value_divisor > 0.0) || !(self.speed_score_divisor > 0.0) {
            return invalid("fall_value_divisor", "divisors must be positive");
        }
        if !(self.basket_width > 0.0) || !(self.basket_height > 0.0) {
            return invalid("basket_width", "basket size must be positive");
        }
        if self.tier_3_score < self.tier_2_score {
            return invalid("tier_3_score", "must not be below tier_2_score");
        }
        Ok(())
    }

    /// Speed multiplier for a given score, in `[1, 1 + speed_multiplier_cap]`
    pub fn speed_multiplier(&self, score: u32) -> f32 {
        1.0 + (score as f32 / self.speed_score_divisor).min(self.speed_multiplier_cap)
    }

    /// Additive fall speed bonus for a given score
    pub fn score_speed_bonus(&self, score: u32) -> f32 {
        (self.fall_score_bonus * score as f32).min(self.fall_score_bonus_cap)
    }
}
