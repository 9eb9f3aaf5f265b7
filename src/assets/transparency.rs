//! Near-black background keying
//!
//! Sprites ship on a black background. Any visible pixel whose colour
//! channels are all below the threshold becomes fully transparent.

use bytemuck::{Pod, Zeroable};

use super::AssetError;

/// Channel values below this count as background
pub const KEY_THRESHOLD: u8 = 16;

/// One RGBA8 pixel, as laid out in canvas `ImageData`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn is_background(&self) -> bool {
        self.a > 0 && self.r < KEY_THRESHOLD && self.g < KEY_THRESHOLD && self.b < KEY_THRESHOLD
    }
}

/// Make near-black pixels transparent in place
///
/// Returns whether any pixel changed, so callers can keep the original
/// image when nothing was keyed.
pub fn key_near_black(pixels: &mut [u8], width: u32, height: u32) -> Result<bool, AssetError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(AssetError::PixelBuffer {
            len: pixels.len(),
            width,
            height,
        });
    }

    let pixels: &mut [Rgba] = bytemuck::cast_slice_mut(pixels);
    let mut changed = false;
    for px in pixels.iter_mut().filter(|px| px.is_background()) {
        px.a = 0;
        changed = true;
    }
    Ok(changed)
}
