//! Sprite assets
//!
//! Image decoding happens in the browser; the core only tracks whether each
//! sprite is usable and how big it is. Rendering reads this to choose
//! between the sprite and its placeholder.

pub mod registry;
pub mod transparency;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::catalog::{BASKET_FILE, FruitKind, SPRITE_DIR};

pub use registry::{AssetRegistry, AssetState, SpriteInfo};
pub use transparency::{Rgba, key_near_black};

/// Identifies a sprite image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Basket,
    Fruit(FruitKind),
}

impl AssetId {
    /// Every sprite the game loads
    pub fn all() -> impl Iterator<Item = AssetId> {
        std::iter::once(AssetId::Basket).chain(FruitKind::ALL.into_iter().map(AssetId::Fruit))
    }

    pub fn file(self) -> &'static str {
        match self {
            AssetId::Basket => BASKET_FILE,
            AssetId::Fruit(kind) => kind.spec().file,
        }
    }

    /// URL relative to the page
    pub fn path(self) -> String {
        format!("{}{}", SPRITE_DIR, self.file())
    }
}

/// Asset loading failures; all of them degrade to placeholder rendering
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("failed to load {0:?}")]
    Load(AssetId),

    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    PixelBuffer { len: usize, width: u32, height: u32 },

    #[error("pixel access unavailable: {0}")]
    PixelAccess(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(AssetId::Basket.path(), "./Fruits/Basket.png");
        assert_eq!(AssetId::Fruit(FruitKind::Apple).path(), "./Fruits/Apple.png");
    }

    #[test]
    fn all_assets_listed_once() {
        let ids: Vec<AssetId> = AssetId::all().collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], AssetId::Basket);
    }
}
