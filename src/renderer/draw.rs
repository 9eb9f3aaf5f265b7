//! Draw commands for a 2D canvas

use glam::Vec2;
use thiserror::Error;

use crate::assets::AssetId;
use crate::sim::collision::Aabb;

/// 8-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` for canvas fill styles
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BASKET_PLACEHOLDER: Color = Color::rgb(0x8b, 0x5e, 0x3c);
    pub const BASKET_LABEL: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const FRUIT_PLACEHOLDER: Color = Color::rgb(0xcc, 0xcc, 0xcc);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing operation, in logical pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear a region to transparent
    Clear { rect: Aabb },
    FillRect { rect: Aabb, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Text {
        text: &'static str,
        pos: Vec2,
        font: &'static str,
        align: TextAlign,
        color: Color,
    },
    /// Copy `src` (in image pixels) of a ready sprite into `dst`
    Sprite { asset: AssetId, src: Aabb, dst: Aabb },
}

/// Commands for one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Execute every command on `surface`, stopping at the first failure
    pub fn submit<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), RenderError> {
        for cmd in &self.commands {
            surface.draw(cmd)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("sprite {0:?} has no drawable image")]
    MissingImage(AssetId),

    #[error("surface error: {0}")]
    Backend(String),
}

/// A 2D drawing backend
pub trait Surface {
    fn draw(&mut self, cmd: &DrawCmd) -> Result<(), RenderError>;
}
