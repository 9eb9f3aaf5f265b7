//! Scene composition
//!
//! Pure read of the session and asset registry. Sprites that are not ready
//! (still loading or failed) always fall back to a placeholder shape, so a
//! frame can be built at any time.

use glam::Vec2;

use super::draw::{DrawCmd, DrawList, TextAlign, colors};
use crate::assets::{AssetId, AssetRegistry};
use crate::sim::collision::Aabb;
use crate::sim::state::{Basket, Fruit, GameState};

const BASKET_LABEL: &str = "BASKET";
const BASKET_LABEL_FONT: &str = "18px sans-serif";
/// Baseline offset below the basket centre
const BASKET_LABEL_BASELINE: f32 = 6.0;

/// Build the draw list for the current state
pub fn build_frame(state: &GameState, assets: &AssetRegistry) -> DrawList {
    let mut list = DrawList::new();
    list.push(DrawCmd::Clear {
        rect: Aabb::new(
            Vec2::ZERO,
            Vec2::new(state.playfield.width, state.playfield.height),
        ),
    });

    draw_basket(&mut list, &state.basket, assets);
    for fruit in &state.fruits {
        draw_fruit(&mut list, fruit, assets);
    }
    list
}

fn draw_basket(list: &mut DrawList, basket: &Basket, assets: &AssetRegistry) {
    let dst = basket.bounds();
    match assets.ready(AssetId::Basket) {
        Some(info) => list.push(DrawCmd::Sprite {
            asset: AssetId::Basket,
            src: Aabb::new(Vec2::ZERO, Vec2::new(info.width as f32, info.height as f32)),
            dst,
        }),
        None => {
            list.push(DrawCmd::FillRect {
                rect: dst,
                color: colors::BASKET_PLACEHOLDER,
            });
            list.push(DrawCmd::Text {
                text: BASKET_LABEL,
                pos: dst.center() + Vec2::new(0.0, BASKET_LABEL_BASELINE),
                font: BASKET_LABEL_FONT,
                align: TextAlign::Center,
                color: colors::BASKET_LABEL,
            });
        }
    }
}

fn draw_fruit(list: &mut DrawList, fruit: &Fruit, assets: &AssetRegistry) {
    let dst = fruit.bounds();
    match assets.ready(fruit.asset) {
        Some(info) => {
            // Vertical spritesheet: one frame per row band
            let frame_height = info.frame_height(fruit.frames);
            let src = Aabb::new(
                Vec2::new(0.0, fruit.frame_index as f32 * frame_height),
                Vec2::new(info.width as f32, frame_height),
            );
            list.push(DrawCmd::Sprite {
                asset: fruit.asset,
                src,
                dst,
            });
        }
        None => list.push(DrawCmd::FillCircle {
            center: dst.center(),
            radius: fruit.size / 2.0,
            color: colors::FRUIT_PLACEHOLDER,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteInfo;
    use crate::sim::catalog::FruitKind;
    use crate::sim::state::Playfield;
    use crate::tuning::Tuning;

    fn state_with_fruit(frame_index: u32) -> GameState {
        let mut state = GameState::new(1, Tuning::default(), Playfield::new(800.0, 600.0));
        state.start();
        let id = state.next_entity_id();
        state.fruits.push(Fruit {
            id,
            kind: FruitKind::Banana,
            pos: Vec2::new(100.0, 50.0),
            size: 120.0,
            fall_speed: 100.0,
            value: 4,
            frame_index,
            frame_timer: 0.0,
            frames: 2,
            asset: AssetId::Fruit(FruitKind::Banana),
        });
        state
    }

    #[test]
    fn placeholders_while_loading() {
        let state = state_with_fruit(0);
        let list = build_frame(&state, &AssetRegistry::with_game_assets());

        assert!(matches!(list.commands[0], DrawCmd::Clear { .. }));
        assert!(matches!(
            list.commands[1],
            DrawCmd::FillRect { color: colors::BASKET_PLACEHOLDER, .. }
        ));
        match &list.commands[2] {
            DrawCmd::Text { text, pos, align, .. } => {
                assert_eq!(*text, "BASKET");
                assert_eq!(*align, TextAlign::Center);
                assert_eq!(*pos, Vec2::new(400.0, 480.0 + 50.0 + 6.0));
            }
            other => panic!("expected label, got {:?}", other),
        }
        match &list.commands[3] {
            DrawCmd::FillCircle { center, radius, .. } => {
                assert_eq!(*center, Vec2::new(160.0, 110.0));
                assert_eq!(*radius, 60.0);
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn failed_assets_use_placeholders() {
        let state = state_with_fruit(0);
        let mut assets = AssetRegistry::with_game_assets();
        assets.mark_failed(AssetId::Basket);
        assets.mark_failed(AssetId::Fruit(FruitKind::Banana));

        let list = build_frame(&state, &assets);
        assert!(!list.commands.iter().any(|c| matches!(c, DrawCmd::Sprite { .. })));
    }

    #[test]
    fn ready_fruit_selects_frame_slice() {
        let state = state_with_fruit(1);
        let mut assets = AssetRegistry::with_game_assets();
        assets.mark_ready(AssetId::Basket, SpriteInfo::new(280, 200));
        assets.mark_ready(AssetId::Fruit(FruitKind::Banana), SpriteInfo::new(64, 128));

        let list = build_frame(&state, &assets);
        assert_eq!(list.len(), 3);
        assert_eq!(
            list.commands[1],
            DrawCmd::Sprite {
                asset: AssetId::Basket,
                src: Aabb::new(Vec2::ZERO, Vec2::new(280.0, 200.0)),
                dst: state.basket.bounds(),
            }
        );
        assert_eq!(
            list.commands[2],
            DrawCmd::Sprite {
                asset: AssetId::Fruit(FruitKind::Banana),
                src: Aabb::new(Vec2::new(0.0, 64.0), Vec2::new(64.0, 64.0)),
                dst: Aabb::new(Vec2::new(100.0, 50.0), Vec2::splat(120.0)),
            }
        );
    }

    #[test]
    fn build_frame_does_not_mutate() {
        let state = state_with_fruit(0);
        let before = state.fruits.clone();
        let _ = build_frame(&state, &AssetRegistry::new());
        assert_eq!(state.fruits, before);
    }
}
