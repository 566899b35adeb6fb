//! infinityu render library
//!
//! Renderer abstraction for the infinityu board. The bundled
//! `DisplayListRenderer` records each frame as an ordered list of draw
//! commands for a surface backend to replay.

mod display_list;
mod renderer;

pub use display_list::{
    DisplayList, DisplayListRenderer, DrawCommand, GRID_DOT_RADIUS, MAX_GRID_DOTS, OUTLINE_WIDTH,
};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, Theme};
