//! Platform abstraction layer (browser)
//!
//! Handles the DOM side of the game:
//! - HUD and overlays
//! - Canvas2D drawing surface and DPR-aware resizing
//! - Sprite loading and transparency keying
//! - Tuning overrides embedded in the page

pub mod web;

pub use web::{
    CanvasSurface, DomOverlay, SpriteStore, load_sprites, load_tuning, now, resize_canvas,
};
