//! Browser bindings via `web-sys`

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    ImageData,
};

use crate::assets::{AssetError, AssetId, SpriteInfo, key_near_black};
use crate::game::Game;
use crate::renderer::{DrawCmd, RenderError, Surface, TextAlign};
use crate::sim::BackgroundTier;
use crate::tuning::Tuning;
use crate::ui::{Overlay, final_score_text};

fn js_error(err: JsValue) -> String {
    format!("{:?}", err)
}

/// High-resolution timestamp (ms), same clock as animation callbacks
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

// ============================================================================
// OVERLAY
// ============================================================================

/// HUD backed by DOM elements; missing elements are skipped
pub struct DomOverlay {
    canvas: HtmlCanvasElement,
    loading: Option<HtmlElement>,
    game_over: Option<HtmlElement>,
    final_score: Option<HtmlElement>,
    score: Option<HtmlElement>,
    lives: Option<HtmlElement>,
}

impl DomOverlay {
    pub fn new(document: &Document, canvas: HtmlCanvasElement) -> Self {
        let find = |id: &str| {
            let el = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if el.is_none() {
                log::warn!("Overlay element #{} not found", id);
            }
            el
        };
        Self {
            loading: find("loading"),
            game_over: find("gameOver"),
            final_score: find("finalScore"),
            score: find("score"),
            lives: find("lives"),
            canvas,
        }
    }

    fn set_display(el: &Option<HtmlElement>, display: &str) {
        if let Some(el) = el {
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_text(el: &Option<HtmlElement>, text: &str) {
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }
}

impl Overlay for DomOverlay {
    fn set_loading_visible(&mut self, visible: bool) {
        Self::set_display(&self.loading, if visible { "flex" } else { "none" });
    }

    fn show_game_over(&mut self, final_score: u32) {
        Self::set_text(&self.final_score, &final_score_text(final_score));
        Self::set_display(&self.game_over, "flex");
    }

    fn hide_game_over(&mut self) {
        Self::set_display(&self.game_over, "none");
    }

    fn set_score(&mut self, score: u32) {
        Self::set_text(&self.score, &score.to_string());
    }

    fn set_lives(&mut self, lives: u32) {
        Self::set_text(&self.lives, &lives.to_string());
    }

    fn set_background(&mut self, tier: BackgroundTier) {
        self.canvas.set_class_name(tier.css_class());
    }
}

// ============================================================================
// SPRITES
// ============================================================================

/// A drawable sprite: the original image, or a keyed copy on an offscreen canvas
#[derive(Clone)]
pub enum SpriteImage {
    Image(HtmlImageElement),
    Keyed(HtmlCanvasElement),
}

/// Decoded sprites shared between the loader and the surface
pub type SpriteStore = Rc<RefCell<HashMap<AssetId, SpriteImage>>>;

/// Copy `img` to an offscreen canvas and key out its near-black background
///
/// `Ok(None)` means nothing was keyed and the original should be used.
fn key_image(document: &Document, img: &HtmlImageElement) -> Result<Option<HtmlCanvasElement>, AssetError> {
    let (width, height) = (img.natural_width(), img.natural_height());
    let access = |e: JsValue| AssetError::PixelAccess(js_error(e));

    let off: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(access)?
        .dyn_into()
        .map_err(|_| AssetError::PixelAccess("not a canvas".into()))?;
    off.set_width(width);
    off.set_height(height);
    let ctx = context_2d(&off).map_err(|e| AssetError::PixelAccess(e.to_string()))?;

    ctx.draw_image_with_html_image_element(img, 0.0, 0.0).map_err(access)?;
    // Throws for cross-origin images
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(access)?;
    let mut pixels = data.data().0;
    if !key_near_black(&mut pixels, width, height)? {
        return Ok(None);
    }

    let keyed = ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels.as_slice()), width, height)
        .map_err(access)?;
    ctx.put_image_data(&keyed, 0.0, 0.0).map_err(access)?;
    Ok(Some(off))
}

/// Start loading every game sprite; readiness is reported to `game`
///
/// Loading never blocks the frame loop: until an image arrives the renderer
/// draws placeholders, and a failed image stays a placeholder.
pub fn load_sprites<O: Overlay + 'static>(
    document: &Document,
    game: Rc<RefCell<Game<O>>>,
    store: SpriteStore,
) {
    for id in AssetId::all() {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Cannot create image for {:?}: {}", id, js_error(e));
                game.borrow_mut().assets.mark_failed(id);
                continue;
            }
        };

        // Load
        {
            let game = game.clone();
            let store = store.clone();
            let document = document.clone();
            let img_clone = img.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let sprite = match key_image(&document, &img_clone) {
                    Ok(Some(canvas)) => SpriteImage::Keyed(canvas),
                    Ok(None) => SpriteImage::Image(img_clone.clone()),
                    Err(e) => {
                        log::debug!("Transparency skipped for {:?}: {}", id, e);
                        SpriteImage::Image(img_clone.clone())
                    }
                };
                store.borrow_mut().insert(id, sprite);
                let info = SpriteInfo::new(img_clone.natural_width(), img_clone.natural_height());
                game.borrow_mut().assets.mark_ready(id, info);
            });
            img.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        // Error
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                log::warn!("{}", AssetError::Load(id));
                game.borrow_mut().assets.mark_failed(id);
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        img.set_src(&id.path());
    }
}

// ============================================================================
// SURFACE
// ============================================================================

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderError> {
    canvas
        .get_context("2d")
        .map_err(|e| RenderError::Backend(js_error(e)))?
        .ok_or_else(|| RenderError::Backend("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RenderError::Backend("not a 2d context".into()))
}

/// Canvas2D implementation of [`Surface`]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteStore,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, sprites: SpriteStore) -> Result<Self, RenderError> {
        Ok(Self {
            ctx: context_2d(canvas)?,
            sprites,
        })
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, cmd: &DrawCmd) -> Result<(), RenderError> {
        let backend = |e: JsValue| RenderError::Backend(js_error(e));
        match cmd {
            DrawCmd::Clear { rect } => {
                self.ctx.clear_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCmd::FillRect { rect, color } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.fill_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCmd::FillCircle { center, radius, color } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.begin_path();
                self.ctx
                    .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .map_err(backend)?;
                self.ctx.fill();
            }
            DrawCmd::Text { text, pos, font, align, color } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.set_font(font);
                self.ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                self.ctx
                    .fill_text(text, pos.x as f64, pos.y as f64)
                    .map_err(backend)?;
            }
            DrawCmd::Sprite { asset, src, dst } => {
                let sprites = self.sprites.borrow();
                let sprite = sprites.get(asset).ok_or(RenderError::MissingImage(*asset))?;
                let (sx, sy, sw, sh) = (src.min.x as f64, src.min.y as f64, src.size.x as f64, src.size.y as f64);
                let (dx, dy, dw, dh) = (dst.min.x as f64, dst.min.y as f64, dst.size.x as f64, dst.size.y as f64);
                let drawn = match sprite {
                    SpriteImage::Image(img) => self
                        .ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            img, sx, sy, sw, sh, dx, dy, dw, dh,
                        ),
                    SpriteImage::Keyed(canvas) => self
                        .ctx
                        .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            canvas, sx, sy, sw, sh, dx, dy, dw, dh,
                        ),
                };
                drawn.map_err(backend)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// RESIZE / CONFIG
// ============================================================================

/// Match the backing store to physical pixels and report logical size
pub fn resize_canvas<O: Overlay>(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    game: &mut Game<O>,
) {
    let ratio = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0);
    let w = match canvas.client_width() {
        0 => canvas.width() as f64,
        cw => cw as f64,
    };
    let h = match canvas.client_height() {
        0 => canvas.height() as f64,
        ch => ch as f64,
    };

    canvas.set_width((w * ratio) as u32);
    canvas.set_height((h * ratio) as u32);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", w));
    let _ = style.set_property("height", &format!("{}px", h));
    if let Err(e) = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0) {
        log::warn!("Failed to scale canvas context: {}", js_error(e));
    }

    game.resize(w as f32, h as f32);
    log::debug!("Canvas resized to {}x{} (dpr {})", w, h, ratio);
}

/// Read tuning overrides from `<script id="tuning" type="application/json">`
pub fn load_tuning(document: &Document) -> Tuning {
    let Some(json) = document
        .get_element_by_id("tuning")
        .and_then(|el| el.text_content())
    else {
        return Tuning::default();
    };

    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning overrides");
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning overrides: {}", e);
            Tuning::default()
        }
    }
}
