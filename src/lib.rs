//! Shadow cards: a rectangular container with a rounded background, an
//! optional border and a drop shadow whose four edges toggle independently.
//!
//! The flow is: load a [`StyleConfig`] from an attribute source, hand it to a
//! [`RenderPipeline`], feed the pipeline bounds changes, and draw it onto any
//! [`Surface`] with the card's children as [`Content`].
//!
//! ```
//! use shadowcard::{Density, Insets, Px, Size, render_svg};
//!
//! let svg = render_svg(
//!     r##"app:corner_radius = "16dp"  app:enable_border = "true""##,
//!     Size::new(Px(200.0), Px(100.0)),
//!     Insets::default(),
//!     Density::MDPI,
//! )
//! .unwrap();
//! assert!(svg.contains(r#"rx="16""#));
//! ```

use pest_derive::Parser;

pub mod ast;
pub mod errors;
pub mod log;
pub mod parse;
pub mod render;
pub mod style;
pub mod types;

pub use ast::{AttrValue, Attribute, AttributeSet, DimensionUnit};
pub use errors::{LoadError, ParseError, SourceContext};
pub use render::{
    CacheState, Content, DisplayList, GeometryCache, NoContent, Paint, PaintState, RenderPipeline,
    Surface, SvgSurface,
};
pub use style::{Recompute, StyleChange, StyleConfig};
pub use types::{Color, Density, Dp, Edge, Edges, Insets, NumericError, Px, Rect, Size};

#[derive(Parser)]
#[grammar = "attrs.pest"]
pub struct AttrParser;

/// Render a card described by an attribute source to SVG.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn render_svg(
    source: &str,
    bounds: Size,
    padding: Insets,
    density: Density,
) -> Result<String, miette::Report> {
    let style = StyleConfig::from_source("<input>", source, density)?;
    let mut pipeline = RenderPipeline::new(style);
    pipeline.on_bounds_changed(bounds, padding);

    let mut svg = SvgSurface::new(bounds);
    pipeline.draw(&mut svg, &NoContent);
    svg.finish()
}
