//! Registry of sprite readiness, keyed by [`AssetId`]

use std::collections::HashMap;

use super::AssetId;

/// Raw pixel dimensions of a decoded sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteInfo {
    pub width: u32,
    pub height: u32,
}

impl SpriteInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height of one frame of a vertical spritesheet
    pub fn frame_height(&self, frames: u32) -> f32 {
        self.height as f32 / frames.max(1) as f32
    }
}

/// Load state of one sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetState {
    #[default]
    Loading,
    Ready(SpriteInfo),
    /// Never retried; renders as placeholder for the rest of the process
    Failed,
}

/// Shared across all fruit of a kind for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    states: HashMap<AssetId, AssetState>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Registry with every game sprite in `Loading`
    pub fn with_game_assets() -> Self {
        let mut registry = Self::new();
        for id in AssetId::all() {
            registry.states.insert(id, AssetState::Loading);
        }
        registry
    }

    /// Unknown assets report `Loading`
    pub fn state(&self, id: AssetId) -> AssetState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Sprite info if the asset can be drawn
    pub fn ready(&self, id: AssetId) -> Option<SpriteInfo> {
        match self.state(id) {
            AssetState::Ready(info) => Some(info),
            AssetState::Loading | AssetState::Failed => None,
        }
    }

    pub fn mark_ready(&mut self, id: AssetId, info: SpriteInfo) {
        log::debug!("Asset ready: {:?} ({}x{})", id, info.width, info.height);
        self.states.insert(id, AssetState::Ready(info));
    }

    pub fn mark_failed(&mut self, id: AssetId) {
        log::warn!("Asset failed to load: {}", id.path());
        self.states.insert(id, AssetState::Failed);
    }

    /// True once no asset is still loading
    pub fn is_settled(&self) -> bool {
        self.states
            .values()
            .all(|s| !matches!(s, AssetState::Loading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::FruitKind;

    #[test]
    fn starts_loading() {
        let reg = AssetRegistry::with_game_assets();
        assert_eq!(reg.state(AssetId::Basket), AssetState::Loading);
        assert!(reg.ready(AssetId::Basket).is_none());
        assert!(!reg.is_settled());
    }

    #[test]
    fn ready_and_failed() {
        let mut reg = AssetRegistry::with_game_assets();
        reg.mark_ready(AssetId::Basket, SpriteInfo::new(140, 100));
        reg.mark_failed(AssetId::Fruit(FruitKind::Apple));

        assert_eq!(reg.ready(AssetId::Basket), Some(SpriteInfo::new(140, 100)));
        assert_eq!(reg.state(AssetId::Fruit(FruitKind::Apple)), AssetState::Failed);
        assert!(reg.ready(AssetId::Fruit(FruitKind::Apple)).is_none());
    }

    #[test]
    fn settles_when_nothing_loading() {
        let mut reg = AssetRegistry::with_game_assets();
        for id in AssetId::all() {
            reg.mark_failed(id);
        }
        assert!(reg.is_settled());
    }

    #[test]
    fn frame_height_splits_sheet() {
        assert_eq!(SpriteInfo::new(64, 128).frame_height(2), 64.0);
        assert_eq!(SpriteInfo::new(64, 128).frame_height(0), 128.0);
    }
}
