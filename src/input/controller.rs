//! Basket control from held keys and pointer position
//!
//! Both sources write `basket.x` directly and the last writer wins; every
//! write is followed by a clamp.

use super::queue::InputEvent;
use crate::sim::state::{Basket, Playfield};

/// Logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a DOM key identifier
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Which directions are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Applies input to the basket
#[derive(Debug, Clone, Default)]
pub struct BasketController {
    held: HeldKeys,
}

impl BasketController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }

    /// Release every key (e.g. on window blur)
    pub fn release_all(&mut self) {
        self.held = HeldKeys::default();
    }

    /// Apply one queued event
    pub fn apply(&mut self, event: &InputEvent, basket: &mut Basket, field: &Playfield) {
        match event {
            InputEvent::KeyDown(key) => {
                if let Some(dir) = Direction::from_key(key) {
                    self.held.set(dir, true);
                }
            }
            InputEvent::KeyUp(key) => {
                if let Some(dir) = Direction::from_key(key) {
                    self.held.set(dir, false);
                }
            }
            InputEvent::PointerMove { x } => basket.center_on(*x, field),
        }
    }

    /// Key-driven movement for one canonical control step
    ///
    /// Moves `speed * step` per held direction regardless of real frame
    /// time. Returns whether any movement key was held.
    pub fn control_tick(&self, basket: &mut Basket, field: &Playfield, step: f32) -> bool {
        let delta = basket.speed * step;
        if self.held.left {
            basket.pos.x -= delta;
        }
        if self.held.right {
            basket.pos.x += delta;
        }
        basket.clamp(field);
        self.held.any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CONTROL_DT;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn setup() -> (BasketController, Basket, Playfield) {
        let field = Playfield::new(800.0, 600.0);
        (BasketController::new(), Basket::new(&Tuning::default(), &field), field)
    }

    #[test]
    fn key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ArrowUp"), None);
    }

    #[test]
    fn held_left_moves_by_fixed_step() {
        let (mut ctl, mut basket, field) = setup();
        let start = basket.pos.x;
        ctl.apply(&InputEvent::KeyDown("ArrowLeft".into()), &mut basket, &field);
        assert!(ctl.control_tick(&mut basket, &field, CONTROL_DT));
        assert!((basket.pos.x - (start - 700.0 / 60.0)).abs() < 1e-3);

        ctl.apply(&InputEvent::KeyUp("ArrowLeft".into()), &mut basket, &field);
        let x = basket.pos.x;
        assert!(!ctl.control_tick(&mut basket, &field, CONTROL_DT));
        assert_eq!(basket.pos.x, x);
    }

    #[test]
    fn both_keys_cancel() {
        let (mut ctl, mut basket, field) = setup();
        let start = basket.pos.x;
        ctl.apply(&InputEvent::KeyDown("a".into()), &mut basket, &field);
        ctl.apply(&InputEvent::KeyDown("d".into()), &mut basket, &field);
        ctl.control_tick(&mut basket, &field, CONTROL_DT);
        assert!((basket.pos.x - start).abs() < 1e-3);
    }

    #[test]
    fn pointer_centres_basket() {
        let (mut ctl, mut basket, field) = setup();
        ctl.apply(&InputEvent::PointerMove { x: 400.0 }, &mut basket, &field);
        assert_eq!(basket.pos.x, 330.0);
    }

    #[test]
    fn pointer_then_key_last_writer_wins() {
        let (mut ctl, mut basket, field) = setup();
        ctl.apply(&InputEvent::KeyDown("ArrowRight".into()), &mut basket, &field);
        ctl.apply(&InputEvent::PointerMove { x: 200.0 }, &mut basket, &field);
        assert_eq!(basket.pos.x, 130.0);
        ctl.control_tick(&mut basket, &field, CONTROL_DT);
        assert!((basket.pos.x - (130.0 + 700.0 / 60.0)).abs() < 1e-3);
    }

    #[test]
    fn release_all_clears_held() {
        let (mut ctl, mut basket, field) = setup();
        ctl.apply(&InputEvent::KeyDown("a".into()), &mut basket, &field);
        ctl.release_all();
        assert!(!ctl.held().any());
    }

    fn event_strategy() -> impl Strategy<Value = InputEvent> {
        prop_oneof![
            prop::sample::select(vec!["ArrowLeft", "ArrowRight", "a", "d", "x"])
                .prop_map(|k| InputEvent::KeyDown(k.to_string())),
            prop::sample::select(vec!["ArrowLeft", "ArrowRight", "a", "d"])
                .prop_map(|k| InputEvent::KeyUp(k.to_string())),
            (-2000.0f32..3000.0).prop_map(|x| InputEvent::PointerMove { x }),
        ]
    }

    proptest! {
        #[test]
        fn basket_always_within_margins(
            width in 160.0f32..2000.0,
            steps in prop::collection::vec((event_strategy(), 0u32..5), 1..60),
        ) {
            let field = Playfield::new(width, 600.0);
            let mut basket = Basket::new(&Tuning::default(), &field);
            let mut ctl = BasketController::new();
            let (min_x, max_x) = basket.x_range(&field);

            for (event, ticks) in &steps {
                ctl.apply(event, &mut basket, &field);
                prop_assert!(basket.pos.x >= min_x && basket.pos.x <= max_x);
                for _ in 0..*ticks {
                    ctl.control_tick(&mut basket, &field, CONTROL_DT);
                    prop_assert!(basket.pos.x >= min_x && basket.pos.x <= max_x);
                }
            }
        }
    }
}
