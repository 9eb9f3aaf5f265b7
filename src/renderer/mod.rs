//! Rendering module
//!
//! [`build_frame`] turns game state into a backend-agnostic [`DrawList`];
//! a [`Surface`] executes it. The browser backend lives in `platform`.

pub mod draw;
pub mod scene;

pub use draw::{Color, DrawCmd, DrawList, RenderError, Surface, TextAlign, colors};
pub use scene::build_frame;
