//! Rendering for shadow cards
//!
//! This module is organized into submodules:
//! - `defaults`: Default style values
//! - `geometry`: Shadow segments and rounded regions
//! - `paint`: Drawing attributes per element
//! - `pipeline`: Cache ownership, invalidation and layered drawing
//! - `display_list`: Recording surface for inspection and replay
//! - `svg`: SVG output

pub mod defaults;
pub mod display_list;
pub mod geometry;
pub mod paint;
pub mod pipeline;
pub mod svg;

// Re-export commonly used items
pub use display_list::{DisplayList, DrawCommand};
pub use geometry::{GeometryCache, RoundRect, Segment, compute_geometry};
pub use paint::{BlendMode, BlurMask, BlurStyle, Paint, PaintState, PaintStyle, resolve_paints};
pub use pipeline::{CacheState, RenderPipeline};
pub use svg::SvgSurface;

/// Something draw calls can be issued against.
///
/// Coordinates are in view space. Implementations decide what a blur mask or
/// blend mode means for their output.
pub trait Surface {
    fn draw_line(&mut self, segment: Segment, paint: &Paint);
    fn draw_round_rect(&mut self, shape: RoundRect, paint: &Paint);
}

/// Child content drawn on top of the card's own layers
pub trait Content {
    fn render(&self, surface: &mut dyn Surface);
}

impl<F: Fn(&mut dyn Surface)> Content for F {
    fn render(&self, surface: &mut dyn Surface) {
        self(surface)
    }
}

/// A card with nothing inside
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl Content for NoContent {
    fn render(&self, _surface: &mut dyn Surface) {}
}
