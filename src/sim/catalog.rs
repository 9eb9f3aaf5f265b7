//! Fruit kind catalog
//!
//! Static, immutable table of every fruit that can fall.

use serde::{Deserialize, Serialize};

/// Static description of one fruit kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruitSpec {
    pub name: &'static str,
    /// Sprite file name under [`SPRITE_DIR`]
    pub file: &'static str,
    /// Points awarded on catch; also scales fall speed
    pub value: u32,
    /// Frames in the vertical spritesheet
    pub frames: u32,
}

/// Directory sprite files are served from
pub const SPRITE_DIR: &str = "./Fruits/";

/// Basket sprite file name
pub const BASKET_FILE: &str = "Basket.png";

/// Fruit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Strawberry,
    Blueberry,
    Carrot,
    Banana,
    Apple,
}

const STRAWBERRY: FruitSpec = FruitSpec { name: "strawberry", file: "Strawberry.png", value: 2, frames: 2 };
const BLUEBERRY: FruitSpec = FruitSpec { name: "blueberry", file: "Blueberry.png", value: 1, frames: 2 };
const CARROT: FruitSpec = FruitSpec { name: "carrot", file: "Carrot.png", value: 3, frames: 2 };
const BANANA: FruitSpec = FruitSpec { name: "banana", file: "Banana.png", value: 4, frames: 2 };
const APPLE: FruitSpec = FruitSpec { name: "apple", file: "Apple.png", value: 5, frames: 2 };

impl FruitKind {
    /// Every kind, in catalog order (uniform spawn selection indexes this)
    pub const ALL: [FruitKind; 5] = [
        FruitKind::Strawberry,
        FruitKind::Blueberry,
        FruitKind::Carrot,
        FruitKind::Banana,
        FruitKind::Apple,
    ];

    pub const fn spec(self) -> &'static FruitSpec {
        match self {
            FruitKind::Strawberry => &STRAWBERRY,
            FruitKind::Blueberry => &BLUEBERRY,
            FruitKind::Carrot => &CARROT,
            FruitKind::Banana => &BANANA,
            FruitKind::Apple => &APPLE,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn value(self) -> u32 {
        self.spec().value
    }

    pub fn frames(self) -> u32 {
        self.spec().frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_values() {
        let values: Vec<u32> = FruitKind::ALL.iter().map(|k| k.value()).collect();
        assert_eq!(values, vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn every_kind_is_animated() {
        for kind in FruitKind::ALL {
            assert!(kind.frames() >= 1, "{} has no frames", kind.name());
            assert!(kind.spec().file.ends_with(".png"));
        }
    }
}
